//! Base trait for store state.

/// Marker trait for state objects held by a store.
///
/// States should be:
/// - Owned (Clone to create snapshots for readers)
/// - Self-contained (all data selectors need)
/// - Comparable (PartialEq for detecting changes)
pub trait StoreState: Clone + PartialEq + Default + Send + Sync + 'static {}
