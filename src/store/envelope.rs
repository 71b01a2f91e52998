//! Response envelope decoding.
//!
//! Collections arrive as `{"data": {"payload": [...]}}`; single entities as
//! `{"data": {...}}`.

use serde_json::Value;

use crate::client::ClientError;
use crate::entity::Entity;

/// Extract the entity array of a fetch-all response.
pub fn decode_collection<E: Entity>(mut body: Value) -> Result<Vec<E>, ClientError> {
    let payload = body
        .pointer_mut("/data/payload")
        .map(Value::take)
        .ok_or_else(|| ClientError::Decode("response is missing data.payload".to_string()))?;

    Ok(serde_json::from_value(payload)?)
}

/// Extract the entity of a create/update response.
pub fn decode_entity<E: Entity>(mut body: Value) -> Result<E, ClientError> {
    let data = body
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| ClientError::Decode("response is missing data".to_string()))?;

    Ok(serde_json::from_value(data)?)
}
