//! Aggregate state container.
//!
//! Holds every registered resource's collection under its name and routes
//! dispatched transitions to the owning reducer. Built once at startup and
//! passed to consumers explicitly.

use std::any::Any;
use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::entity::Entity;
use crate::store::{CollectionState, Dispatch, ResourceReducer, Transition};

/// Errors that can occur while assembling the container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("Store '{resource}' is already registered")]
    DuplicateResource { resource: String },
}

/// Type-erased view of one registered store.
trait AnySlice: Send + Sync {
    fn reduce(&mut self, transition: &dyn Any);
    fn state(&self) -> &dyn Any;
    fn to_json(&self) -> Value;
}

struct Slice<E: Entity, R: ResourceReducer<E>> {
    state: CollectionState<E>,
    reducer: R,
}

impl<E: Entity, R: ResourceReducer<E>> AnySlice for Slice<E, R> {
    fn reduce(&mut self, transition: &dyn Any) {
        if let Some(transition) = transition.downcast_ref::<Transition<E>>() {
            let state = std::mem::take(&mut self.state);
            self.state = self.reducer.reduce(state, transition);
        }
    }

    fn state(&self) -> &dyn Any {
        &self.state
    }

    fn to_json(&self) -> Value {
        self.state.to_json()
    }
}

/// Builder for [`RootStore`].
#[derive(Default)]
pub struct RootStoreBuilder {
    slices: BTreeMap<String, Box<dyn AnySlice>>,
}

impl RootStoreBuilder {
    /// Register a store's reducer under its resource name, with an empty
    /// initial collection.
    ///
    /// # Errors
    /// Returns [`RegisterError::DuplicateResource`] if the name is taken.
    pub fn register<E, R>(mut self, reducer: R) -> Result<Self, RegisterError>
    where
        E: Entity,
        R: ResourceReducer<E>,
    {
        let resource = reducer.resource().to_string();
        if self.slices.contains_key(&resource) {
            return Err(RegisterError::DuplicateResource { resource });
        }

        tracing::info!(resource = %resource, "Store registered");
        self.slices.insert(
            resource,
            Box::new(Slice {
                state: CollectionState::<E>::default(),
                reducer,
            }),
        );
        Ok(self)
    }

    pub fn build(self) -> RootStore {
        RootStore {
            slices: RwLock::new(self.slices),
        }
    }
}

/// Process-wide state tree with a single dispatch entry point.
///
/// Every reducer pass runs under one write lock, so transitions never
/// interleave.
pub struct RootStore {
    slices: RwLock<BTreeMap<String, Box<dyn AnySlice>>>,
}

impl RootStore {
    pub fn builder() -> RootStoreBuilder {
        RootStoreBuilder::default()
    }

    /// Registered resource names, sorted.
    pub fn resources(&self) -> Vec<String> {
        self.slices.read().keys().cloned().collect()
    }

    /// Read one resource's collection through `f`.
    ///
    /// Returns `None` if no store is registered under `resource` or its
    /// entity type is not `E`.
    pub fn select<E, T>(&self, resource: &str, f: impl FnOnce(&CollectionState<E>) -> T) -> Option<T>
    where
        E: Entity,
    {
        let slices = self.slices.read();
        slices
            .get(resource)?
            .state()
            .downcast_ref::<CollectionState<E>>()
            .map(f)
    }

    /// Owned copy of one resource's collection.
    pub fn snapshot<E: Entity>(&self, resource: &str) -> Option<CollectionState<E>> {
        self.select(resource, |state: &CollectionState<E>| state.clone())
    }

    /// JSON view of the whole tree, keyed by resource name.
    pub fn to_json(&self) -> Value {
        let slices = self.slices.read();
        let tree: Map<String, Value> = slices
            .iter()
            .map(|(name, slice)| (name.clone(), slice.to_json()))
            .collect();
        Value::Object(tree)
    }
}

impl<E: Entity> Dispatch<E> for RootStore {
    fn dispatch(&self, transition: Transition<E>) {
        tracing::debug!(
            action = %transition.action_type(),
            request_id = %transition.request_id,
            "Dispatch"
        );

        let mut slices = self.slices.write();
        match slices.get_mut(&transition.resource) {
            Some(slice) => slice.reduce(&transition),
            None => tracing::trace!(
                resource = %transition.resource,
                "No store registered for transition"
            ),
        }
    }
}
