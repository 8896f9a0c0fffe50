use serde::{Deserialize, Serialize};

/// The authoritative server queries are forwarded to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Zone the backend is authoritative for; replaces the stripped labels.
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,
}

impl BackendConfig {
    pub fn socket_addr(&self) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            domain: default_domain(),
            timeout_ms: default_timeout_ms(),
            max_response_size: default_max_response_size(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5353
}

fn default_domain() -> String {
    "example.com.".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_response_size() -> usize {
    4096
}
