//! The generic entity-store factory and its asynchronous operations.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::client::{ClientError, ResourceClient};
use crate::entity::{Entity, EntityId};
use crate::root::RootStore;
use crate::store::envelope::{decode_collection, decode_entity};
use crate::store::error::{ErrorKind, StoreError};
use crate::store::intent::{EntityIntent, Operation, Phase, Transition};
use crate::store::reducer::EntityReducer;
use crate::store::state::CollectionState;

/// Receives transitions produced by store operations.
///
/// Each call is one atomic reducer pass.
pub trait Dispatch<E: Entity>: Send + Sync {
    fn dispatch(&self, transition: Transition<E>);
}

impl<E: Entity, D: Dispatch<E> + ?Sized> Dispatch<E> for Arc<D> {
    fn dispatch(&self, transition: Transition<E>) {
        (**self).dispatch(transition)
    }
}

/// Build the generic store for `name` backed by `client`.
pub fn create_store<E: Entity>(name: impl Into<String>, client: ResourceClient) -> EntityStore<E> {
    let name = name.into();
    EntityStore {
        reducer: EntityReducer::new(name.clone()),
        name,
        client,
    }
}

/// Self-contained store for one resource: reducer, operations, selectors.
#[derive(Clone)]
pub struct EntityStore<E: Entity> {
    name: String,
    client: ResourceClient,
    reducer: EntityReducer<E>,
}

impl<E: Entity> EntityStore<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    pub fn reducer(&self) -> &EntityReducer<E> {
        &self.reducer
    }

    pub fn initial_state(&self) -> CollectionState<E> {
        CollectionState::default()
    }

    /// Names of the operations this store dispatches.
    pub fn actions(&self) -> Vec<String> {
        Operation::ALL
            .iter()
            .map(|op| op.name().to_string())
            .collect()
    }

    fn transition(&self, request_id: Uuid, intent: EntityIntent<E>) -> Transition<E> {
        Transition::new(self.name.clone(), request_id, intent)
    }

    /// Drive one operation through requested → succeeded | failed.
    pub(crate) async fn run<D, A, T, W, F>(
        &self,
        dispatcher: &D,
        wrap: W,
        arg: A,
        call: F,
    ) -> Result<T, StoreError>
    where
        D: Dispatch<E> + ?Sized,
        T: Clone,
        W: Fn(Phase<A, T>) -> EntityIntent<E>,
        F: Future<Output = Result<T, StoreError>>,
    {
        let request_id = Uuid::new_v4();
        dispatcher.dispatch(self.transition(request_id, wrap(Phase::Requested(arg))));

        match call.await {
            Ok(value) => {
                dispatcher.dispatch(
                    self.transition(request_id, wrap(Phase::Succeeded(value.clone()))),
                );
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(
                    resource = %self.name,
                    request_id = %request_id,
                    error = %err,
                    "Operation failed"
                );
                dispatcher.dispatch(self.transition(request_id, wrap(Phase::Failed(err.clone()))));
                Err(err)
            }
        }
    }

    /// Load the whole collection, replacing the cached records.
    pub async fn fetch_all<D>(&self, dispatcher: &D) -> Result<Vec<E>, StoreError>
    where
        D: Dispatch<E> + ?Sized,
    {
        let call = async {
            let body = self.client.list().await.map_err(failure(Operation::FetchAll))?;
            decode_collection::<E>(body).map_err(failure(Operation::FetchAll))
        };

        self.run(dispatcher, EntityIntent::FetchAll, (), call).await
    }

    /// Create an entity from a partial representation.
    pub async fn create<D, P>(&self, dispatcher: &D, data: &P) -> Result<E, StoreError>
    where
        D: Dispatch<E> + ?Sized,
        P: Serialize + Sync + ?Sized,
    {
        let data = to_body(data, Operation::Create)?;
        let call = async {
            let body = self
                .client
                .create(data.clone())
                .await
                .map_err(failure(Operation::Create))?;
            decode_entity::<E>(body).map_err(failure(Operation::Create))
        };

        self.run(dispatcher, EntityIntent::Create, data.clone(), call)
            .await
    }

    /// Patch an entity. The cached entry is keyed by the id the server
    /// returns.
    pub async fn update<D, P>(
        &self,
        dispatcher: &D,
        id: impl Into<EntityId>,
        data: &P,
    ) -> Result<E, StoreError>
    where
        D: Dispatch<E> + ?Sized,
        P: Serialize + Sync + ?Sized,
    {
        let id = id.into();
        let data = to_body(data, Operation::Update)?;
        let call = async {
            let body = self
                .client
                .update(&id, data.clone())
                .await
                .map_err(failure(Operation::Update))?;
            let entity = decode_entity::<E>(body).map_err(failure(Operation::Update))?;
            if entity.id() != id {
                tracing::warn!(
                    resource = %self.name,
                    requested = %id,
                    returned = %entity.id(),
                    "Update returned a different id; caching under the returned id"
                );
            }
            Ok::<_, StoreError>(entity)
        };

        self.run(dispatcher, EntityIntent::Update, (id.clone(), data.clone()), call)
            .await
    }

    /// Delete an entity and drop it from the cache.
    pub async fn remove<D>(&self, dispatcher: &D, id: impl Into<EntityId>) -> Result<EntityId, StoreError>
    where
        D: Dispatch<E> + ?Sized,
    {
        let id = id.into();
        let call = async {
            self.client
                .delete(&id)
                .await
                .map_err(failure(Operation::Remove))?;
            Ok::<_, StoreError>(id.clone())
        };

        self.run(dispatcher, EntityIntent::Remove, id.clone(), call)
            .await
    }

    pub fn select_all(&self, root: &RootStore) -> Vec<E> {
        root.select(&self.name, |state: &CollectionState<E>| {
            state.select_all().into_iter().cloned().collect()
        })
        .unwrap_or_default()
    }

    pub fn select_by_id(&self, root: &RootStore, id: impl Into<EntityId>) -> Option<E> {
        let id = id.into();
        root.select(&self.name, |state: &CollectionState<E>| {
            state.select_by_id(&id).cloned()
        })
        .flatten()
    }

    pub fn select_loading(&self, root: &RootStore) -> bool {
        root.select(&self.name, |state: &CollectionState<E>| state.select_loading())
            .unwrap_or(false)
    }

    pub fn select_error(&self, root: &RootStore) -> Option<StoreError> {
        root.select(&self.name, |state: &CollectionState<E>| {
            state.select_error().cloned()
        })
        .flatten()
    }
}

fn failure(operation: Operation) -> impl Fn(ClientError) -> StoreError {
    move |err| {
        StoreError::from_client(
            operation.error_kind(),
            &err,
            Some(operation.fallback_message()),
        )
    }
}

fn to_body<P: Serialize + ?Sized>(data: &P, operation: Operation) -> Result<Value, StoreError> {
    serde_json::to_value(data).map_err(|e| {
        StoreError::new(
            operation.error_kind(),
            format!("Invalid request body: {}", e),
        )
    })
}

/// Error for an extension action name that is not registered.
pub(crate) fn unknown_action(store: &str, action: &str) -> StoreError {
    StoreError::new(
        ErrorKind::Extension(action.to_string()),
        format!("Action '{}' is not registered on store '{}'", action, store),
    )
}
