use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

/// Settings shared by every resource client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host + port of the REST API (e.g., "https://app.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version segment (default: "v1").
    #[serde(default = "default_version")]
    pub version: String,
    /// Prefix every path with `/enterprise` (default: false).
    #[serde(default)]
    pub enterprise: bool,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// Per-resource endpoint overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name, used both as path segment and store name.
    pub name: String,
    /// API version override for this resource.
    #[serde(default)]
    pub version: Option<String>,
    /// Enterprise prefix override for this resource.
    #[serde(default)]
    pub enterprise: Option<bool>,
    /// Absolute URL serving the collection instead of the REST path
    /// (sandbox/mock builds).
    #[serde(default)]
    pub list_url: Option<String>,
}

impl ResourceConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            enterprise: None,
            list_url: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_version() -> String {
    crate::client::DEFAULT_API_VERSION.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_version(),
            enterprise: false,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            resources: vec![ResourceConfig::named("conversations")],
        }
    }
}

impl Config {
    /// Look up the override entry for a resource.
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }
}
