//! Reducer for the four generic lifecycle operations.

use std::marker::PhantomData;

use crate::entity::Entity;
use crate::mvi::Reducer;
use crate::store::intent::{EntityIntent, Phase, Transition};
use crate::store::state::CollectionState;

/// A reducer over one named resource's collection.
///
/// This is what the aggregate container registers.
pub trait ResourceReducer<E: Entity>:
    Reducer<State = CollectionState<E>, Intent = Transition<E>>
{
    fn resource(&self) -> &str;
}

/// Reducer produced by the store factory for one resource.
///
/// Transitions addressed to other resources, extension transitions, and the
/// failed phases of create/update/remove leave the state untouched.
pub struct EntityReducer<E: Entity> {
    resource: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityReducer<E> {
    fn clone(&self) -> Self {
        Self::new(self.resource.clone())
    }
}

impl<E: Entity> EntityReducer<E> {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> ResourceReducer<E> for EntityReducer<E> {
    fn resource(&self) -> &str {
        &self.resource
    }
}

impl<E: Entity> Reducer for EntityReducer<E> {
    type State = CollectionState<E>;
    type Intent = Transition<E>;

    fn reduce(&self, mut state: Self::State, transition: &Self::Intent) -> Self::State {
        if !transition.is_for(&self.resource) {
            return state;
        }

        match &transition.intent {
            EntityIntent::FetchAll(Phase::Requested(())) => state.begin_loading(),
            EntityIntent::FetchAll(Phase::Succeeded(entities)) => {
                state.replace_all(entities.iter().cloned());
                state.finish_loading(None);
            }
            EntityIntent::FetchAll(Phase::Failed(err)) => {
                state.finish_loading(Some(err.clone()));
            }
            EntityIntent::Create(Phase::Succeeded(entity))
            | EntityIntent::Update(Phase::Succeeded(entity)) => {
                state.upsert(entity.clone());
            }
            EntityIntent::Remove(Phase::Succeeded(id)) => {
                state.remove(id);
            }
            _ => {}
        }

        state
    }
}
