//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::StoreState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function of `(State, &Intent) -> State`; the receiver
/// only carries configuration (resource name, registered extensions).
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    ///
    /// Intents the reducer does not recognize return `state` unchanged.
    fn reduce(&self, state: Self::State, intent: &Self::Intent) -> Self::State;
}
