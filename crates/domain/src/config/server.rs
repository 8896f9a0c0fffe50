use serde::{Deserialize, Serialize};

/// Listening side of the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest incoming query accepted, in bytes.
    #[serde(default = "default_max_request_size")]
    pub max_request_size: usize,

    /// Largest reply sent back before the sections are cleared.
    #[serde(default = "default_max_response_size")]
    pub max_response_size: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            max_request_size: default_max_request_size(),
            max_response_size: default_max_response_size(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_max_request_size() -> usize {
    2048
}

fn default_max_response_size() -> u16 {
    4096
}
