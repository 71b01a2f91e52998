//! Configuration: API endpoint defaults and per-resource overrides.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ResourceConfig};
