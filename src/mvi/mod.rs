//! Model-View-Intent (MVI) primitives shared by every store.
//!
//! # Architecture
//!
//! ```text
//! Operation ──→ Intent ──→ Reducer ──→ State ──→ Selectors
//!     ↑                                              │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! - **State**: owned snapshot of one resource's collection
//! - **Intent**: a lifecycle transition produced by an operation
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
