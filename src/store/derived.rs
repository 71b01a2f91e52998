//! Derived resource stores: a base store plus resource-specific operations.
//!
//! Composition happens entirely here. The base store and its reducer never
//! learn about the extensions layered on top of them.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::client::{ClientError, ResourceClient};
use crate::entity::Entity;
use crate::mvi::Reducer;
use crate::store::error::{ErrorKind, StoreError};
use crate::store::factory::{unknown_action, Dispatch, EntityStore};
use crate::store::intent::{EntityIntent, Phase, Transition};
use crate::store::reducer::{EntityReducer, ResourceReducer};
use crate::store::state::CollectionState;

/// A resource-specific asynchronous operation.
///
/// Follows the same requested/succeeded/failed protocol as the base
/// operations. On success, [`Extension::patch`] is applied to the state the
/// base reducer produced.
#[async_trait]
pub trait Extension<E: Entity>: Send + Sync + 'static {
    /// Action name; must not collide with any other action of the store.
    fn name(&self) -> &str;

    /// Message used when the transport failure carries none.
    fn fallback_message(&self) -> Option<&str> {
        None
    }

    /// Perform the network call and decode the resulting entity.
    async fn execute(&self, client: &ResourceClient, arg: &Value) -> Result<E, ClientError>;

    /// Apply a successful result. Upserts the returned entity by default.
    fn patch(&self, state: &mut CollectionState<E>, entity: &E) {
        state.upsert(entity.clone());
    }
}

/// Errors raised while composing a derived store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    #[error("Action '{action}' is already defined on store '{store}'")]
    ActionCollision { store: String, action: String },
}

/// Base reducer followed by every matching extension patch.
pub struct ComposedReducer<E: Entity> {
    base: EntityReducer<E>,
    extensions: Vec<Arc<dyn Extension<E>>>,
}

impl<E: Entity> Clone for ComposedReducer<E> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            extensions: self.extensions.clone(),
        }
    }
}

impl<E: Entity> Reducer for ComposedReducer<E> {
    type State = CollectionState<E>;
    type Intent = Transition<E>;

    fn reduce(&self, state: Self::State, transition: &Self::Intent) -> Self::State {
        let mut state = self.base.reduce(state, transition);

        if !transition.is_for(self.base.resource()) {
            return state;
        }

        if let EntityIntent::Extension {
            name,
            phase: Phase::Succeeded(entity),
        } = &transition.intent
        {
            for extension in self.extensions.iter().filter(|x| x.name() == name) {
                extension.patch(&mut state, entity);
            }
        }

        state
    }
}

impl<E: Entity> ResourceReducer<E> for ComposedReducer<E> {
    fn resource(&self) -> &str {
        self.base.resource()
    }
}

/// A base entity store decorated with extension operations.
///
/// Dereferences to the base store, so the four generic operations and the
/// selectors are available unchanged.
pub struct DerivedStore<E: Entity> {
    base: EntityStore<E>,
    extensions: Vec<Arc<dyn Extension<E>>>,
}

impl<E: Entity> DerivedStore<E> {
    pub fn new(base: EntityStore<E>) -> Self {
        Self {
            base,
            extensions: Vec::new(),
        }
    }

    /// Register an extension.
    ///
    /// # Errors
    /// Returns [`DeriveError::ActionCollision`] if the name is already taken
    /// by a base action or another extension.
    pub fn with_extension<X: Extension<E>>(mut self, extension: X) -> Result<Self, DeriveError> {
        let action = extension.name().to_string();
        if self.actions().contains(&action) {
            return Err(DeriveError::ActionCollision {
                store: self.base.name().to_string(),
                action,
            });
        }

        self.extensions.push(Arc::new(extension));
        Ok(self)
    }

    pub fn base(&self) -> &EntityStore<E> {
        &self.base
    }

    /// Base actions followed by extension actions.
    pub fn actions(&self) -> Vec<String> {
        let mut actions = self.base.actions();
        actions.extend(self.extensions.iter().map(|x| x.name().to_string()));
        actions
    }

    pub fn reducer(&self) -> ComposedReducer<E> {
        ComposedReducer {
            base: self.base.reducer().clone(),
            extensions: self.extensions.clone(),
        }
    }

    /// Run the extension registered as `action` with `arg`.
    ///
    /// An unregistered action fails immediately without dispatching.
    pub async fn run_extension<D>(
        &self,
        dispatcher: &D,
        action: &str,
        arg: Value,
    ) -> Result<E, StoreError>
    where
        D: Dispatch<E> + ?Sized,
    {
        let extension = self
            .extensions
            .iter()
            .find(|x| x.name() == action)
            .cloned()
            .ok_or_else(|| unknown_action(self.base.name(), action))?;

        let call = async {
            extension
                .execute(self.base.client(), &arg)
                .await
                .map_err(|err| {
                    StoreError::from_client(
                        ErrorKind::Extension(action.to_string()),
                        &err,
                        extension.fallback_message(),
                    )
                })
        };

        let name = action.to_string();
        let wrap = move |phase: Phase<Value, E>| EntityIntent::Extension {
            name: name.clone(),
            phase,
        };

        self.base.run(dispatcher, wrap, arg.clone(), call).await
    }
}

impl<E: Entity> Deref for DerivedStore<E> {
    type Target = EntityStore<E>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
