//! Generic entity stores.
//!
//! [`create_store`] turns a resource name and a [`ResourceClient`] into an
//! [`EntityStore`]: normalized [`CollectionState`], an [`EntityReducer`], the
//! four lifecycle operations, and selectors. [`DerivedStore`] layers
//! resource-specific [`Extension`]s over a base store.
//!
//! ```text
//! fetch_all() ──→ Requested ──→ client.list() ──→ Succeeded(entities)
//!                                     └─────────→ Failed(FetchError)
//! ```
//!
//! [`ResourceClient`]: crate::client::ResourceClient

mod derived;
mod envelope;
mod error;
mod factory;
mod intent;
mod reducer;
mod state;

pub use derived::{ComposedReducer, DeriveError, DerivedStore, Extension};
pub use envelope::{decode_collection, decode_entity};
pub use error::{ErrorKind, StoreError, UNKNOWN_ERROR};
pub use factory::{create_store, Dispatch, EntityStore};
pub use intent::{ActionType, EntityIntent, Operation, Phase, Transition};
pub use reducer::{EntityReducer, ResourceReducer};
pub use state::CollectionState;
