//! Conversation list store with a "mark as read" extension.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{ClientError, ResourceClient, Transport};
use crate::config::Config;
use crate::entity::{Entity, EntityId};
use crate::store::{
    create_store, decode_entity, DeriveError, DerivedStore, Dispatch, Extension, StoreError,
};

pub const RESOURCE: &str = "conversations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread_count: u32,
}

impl Entity for Conversation {
    fn id(&self) -> EntityId {
        EntityId::Int(self.id)
    }
}

/// Zeroes a conversation's unread count and caches the server's copy.
pub struct MarkAsRead;

impl MarkAsRead {
    pub const ACTION: &'static str = "markAsRead";
}

#[async_trait]
impl Extension<Conversation> for MarkAsRead {
    fn name(&self) -> &str {
        Self::ACTION
    }

    fn fallback_message(&self) -> Option<&str> {
        Some("Failed to mark conversation as read")
    }

    async fn execute(&self, client: &ResourceClient, arg: &Value) -> Result<Conversation, ClientError> {
        let id: EntityId = serde_json::from_value(arg.clone())?;
        let body = client.update(&id, json!({ "unreadCount": 0 })).await?;
        decode_entity(body)
    }
}

/// The `conversations` resource: base operations plus [`MarkAsRead`].
pub struct ConversationStore {
    inner: DerivedStore<Conversation>,
}

impl ConversationStore {
    pub fn new(client: ResourceClient) -> Result<Self, DeriveError> {
        let base = create_store::<Conversation>(RESOURCE, client);
        let inner = DerivedStore::new(base).with_extension(MarkAsRead)?;
        Ok(Self { inner })
    }

    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Result<Self, DeriveError> {
        Self::new(ResourceClient::from_config(config, RESOURCE, transport))
    }

    pub async fn mark_as_read<D>(&self, dispatcher: &D, id: i64) -> Result<Conversation, StoreError>
    where
        D: Dispatch<Conversation> + ?Sized,
    {
        self.inner
            .run_extension(dispatcher, MarkAsRead::ACTION, json!(id))
            .await
    }
}

impl Deref for ConversationStore {
    type Target = DerivedStore<Conversation>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
