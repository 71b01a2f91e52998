//! Lifecycle transitions dispatched by store operations.

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::entity::{Entity, EntityId};
use crate::mvi::Intent;
use crate::store::error::{ErrorKind, StoreError};

/// The four generic operations every entity store provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchAll,
    Create,
    Update,
    Remove,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::FetchAll,
        Operation::Create,
        Operation::Update,
        Operation::Remove,
    ];

    /// Action name, used in transition tags.
    pub fn name(self) -> &'static str {
        match self {
            Operation::FetchAll => "fetchAll",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Remove => "remove",
        }
    }

    pub fn error_kind(self) -> ErrorKind {
        match self {
            Operation::FetchAll => ErrorKind::FetchError,
            Operation::Create => ErrorKind::CreateError,
            Operation::Update => ErrorKind::UpdateError,
            Operation::Remove => ErrorKind::DeleteError,
        }
    }

    /// Message used when the transport failure carries none.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchAll => "Failed to fetch data",
            Operation::Create => "Failed to create item",
            Operation::Update => "Failed to update item",
            Operation::Remove => "Failed to delete item",
        }
    }
}

/// One phase of an asynchronous operation.
///
/// `A` is the argument recorded when requested, `T` the success value.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<A, T> {
    Requested(A),
    Succeeded(T),
    Failed(StoreError),
}

impl<A, T> Phase<A, T> {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Requested(_) => "pending",
            Phase::Succeeded(_) => "fulfilled",
            Phase::Failed(_) => "rejected",
        }
    }
}

/// Operation + phase pair carried by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityIntent<E: Entity> {
    FetchAll(Phase<(), Vec<E>>),
    Create(Phase<Value, E>),
    Update(Phase<(EntityId, Value), E>),
    Remove(Phase<EntityId, EntityId>),
    /// Resource-specific operation registered on a derived store.
    Extension { name: String, phase: Phase<Value, E> },
}

impl<E: Entity> EntityIntent<E> {
    pub fn action_name(&self) -> &str {
        match self {
            EntityIntent::FetchAll(_) => Operation::FetchAll.name(),
            EntityIntent::Create(_) => Operation::Create.name(),
            EntityIntent::Update(_) => Operation::Update.name(),
            EntityIntent::Remove(_) => Operation::Remove.name(),
            EntityIntent::Extension { name, .. } => name,
        }
    }

    pub fn phase_label(&self) -> &'static str {
        match self {
            EntityIntent::FetchAll(phase) => phase.label(),
            EntityIntent::Create(phase) => phase.label(),
            EntityIntent::Update(phase) => phase.label(),
            EntityIntent::Remove(phase) => phase.label(),
            EntityIntent::Extension { phase, .. } => phase.label(),
        }
    }
}

/// A dispatched transition, scoped to one resource.
///
/// All three phases of one operation invocation share a `request_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<E: Entity> {
    pub resource: String,
    pub request_id: Uuid,
    pub intent: EntityIntent<E>,
}

impl<E: Entity> Transition<E> {
    pub fn new(resource: impl Into<String>, request_id: Uuid, intent: EntityIntent<E>) -> Self {
        Self {
            resource: resource.into(),
            request_id,
            intent,
        }
    }

    pub fn is_for(&self, resource: &str) -> bool {
        self.resource == resource
    }

    /// Tag of the form `{resource}/{action}/{phase}`.
    pub fn action_type(&self) -> ActionType<'_, E> {
        ActionType(self)
    }
}

impl<E: Entity> Intent for Transition<E> {}

/// Display adapter for a transition's tag.
pub struct ActionType<'a, E: Entity>(&'a Transition<E>);

impl<E: Entity> fmt::Display for ActionType<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.0.resource,
            self.0.intent.action_name(),
            self.0.intent.phase_label()
        )
    }
}
