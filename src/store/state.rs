//! Normalized collection state and its selectors.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::entity::{Entity, EntityId};
use crate::mvi::StoreState;
use crate::store::error::StoreError;

/// Per-resource state: records keyed by id plus fetch-all bookkeeping.
///
/// `loading` and `error` are only written by fetch-all transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<E: Entity> {
    records: HashMap<EntityId, E>,
    loading: bool,
    error: Option<StoreError>,
}

impl<E: Entity> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            loading: false,
            error: None,
        }
    }
}

impl<E: Entity> StoreState for CollectionState<E> {}

impl<E: Entity> CollectionState<E> {
    /// All records, in unspecified order.
    pub fn select_all(&self) -> Vec<&E> {
        self.records.values().collect()
    }

    pub fn select_by_id(&self, id: &EntityId) -> Option<&E> {
        self.records.get(id)
    }

    pub fn select_loading(&self) -> bool {
        self.loading
    }

    pub fn select_error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn records(&self) -> &HashMap<EntityId, E> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert or overwrite `entity` under its own id.
    pub fn upsert(&mut self, entity: E) {
        self.records.insert(entity.id(), entity);
    }

    /// Remove the entry for `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: &EntityId) -> Option<E> {
        self.records.remove(id)
    }

    /// Replace every record with `entities`, keyed by their ids.
    pub(crate) fn replace_all(&mut self, entities: impl IntoIterator<Item = E>) {
        self.records = entities.into_iter().map(|e| (e.id(), e)).collect();
    }

    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn finish_loading(&mut self, error: Option<StoreError>) {
        self.loading = false;
        if error.is_some() {
            self.error = error;
        }
    }

    /// JSON view: `{records: {id: entity}, loading, error}`.
    pub fn to_json(&self) -> Value {
        let records: Map<String, Value> = self
            .records
            .iter()
            .map(|(id, entity)| {
                let value = serde_json::to_value(entity).unwrap_or(Value::Null);
                (id.to_string(), value)
            })
            .collect();

        serde_json::json!({
            "records": records,
            "loading": self.loading,
            "error": self.error,
        })
    }
}
