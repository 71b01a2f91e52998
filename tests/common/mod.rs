//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use entity_store::client::{ApiRequest, ClientError, ClientOptions, ResourceClient, Transport};
use entity_store::entity::{Entity, Record};
use entity_store::store::{Dispatch, Transition};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

pub const ORIGIN: &str = "http://api.test";

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Scripted transport -------------------------------------------------------

struct Reply {
    result: Result<Value, ClientError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// In-memory transport that records requests and replays queued replies.
///
/// Replies are consumed in request order; an empty queue answers `null`.
#[derive(Default)]
pub struct ScriptedTransport {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, body: Value) {
        self.replies.lock().push_back(Reply {
            result: Ok(body),
            gate: None,
        });
    }

    pub fn fail(&self, err: ClientError) {
        self.replies.lock().push_back(Reply {
            result: Err(err),
            gate: None,
        });
    }

    /// Queue a reply that is held back until the returned sender fires.
    pub fn reply_gated(&self, result: Result<Value, ClientError>) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.replies.lock().push_back(Reply {
            result,
            gate: Some(gate),
        });
        release
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.lock().push(request);
        let reply = self.replies.lock().pop_front();

        match reply {
            Some(Reply { result, gate }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Ok(Value::Null),
        }
    }
}

pub fn scripted_client(resource: &str, transport: Arc<ScriptedTransport>) -> ResourceClient {
    ResourceClient::new(ORIGIN, resource, ClientOptions::default(), transport)
}

// -- Dispatch spies -----------------------------------------------------------

/// Dispatcher that only records what it receives.
pub struct RecordingDispatcher<E: Entity> {
    transitions: Mutex<Vec<Transition<E>>>,
}

impl<E: Entity> RecordingDispatcher<E> {
    pub fn new() -> Self {
        Self {
            transitions: Mutex::new(Vec::new()),
        }
    }

    pub fn transitions(&self) -> Vec<Transition<E>> {
        self.transitions.lock().clone()
    }

    pub fn action_types(&self) -> Vec<String> {
        self.transitions
            .lock()
            .iter()
            .map(|t| t.action_type().to_string())
            .collect()
    }
}

impl<E: Entity> Dispatch<E> for RecordingDispatcher<E> {
    fn dispatch(&self, transition: Transition<E>) {
        self.transitions.lock().push(transition);
    }
}

// -- Fixtures -----------------------------------------------------------------

pub fn note(id: i64, title: &str) -> Record {
    Record::new(id).with("title", title)
}

pub fn collection(entities: Value) -> Value {
    json!({ "data": { "payload": entities } })
}

pub fn envelope(entity: Value) -> Value {
    json!({ "data": entity })
}

pub fn conversation_json(id: i64, title: &str, unread: u32) -> Value {
    json!({
        "id": id,
        "title": title,
        "lastMessage": format!("last message in {}", title),
        "timestamp": "2024-05-01T10:00:00Z",
        "unreadCount": unread
    })
}
