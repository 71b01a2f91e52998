//! Client-side entity stores mirroring REST resources as normalized,
//! cached collections.
//!
//! - [`client`]: resource-scoped HTTP access
//! - [`store`]: the generic store factory and derived-store composition
//! - [`resources`]: concrete stores (conversations)
//! - [`root`]: the aggregate state container

pub mod client;
pub mod config;
pub mod entity;
pub mod mvi;
pub mod resources;
pub mod root;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr so stdout stays free for program output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}
