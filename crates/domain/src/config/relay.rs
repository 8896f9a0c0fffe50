use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Non-root labels of the zone this relay answers for
    /// (`cookie.example.com.` has 3). They are stripped together with the
    /// command labels before forwarding.
    #[serde(default = "default_zone_labels")]
    pub zone_labels: usize,

    #[serde(default = "default_num_workers")]
    pub num_workers: usize,

    /// Pause applied by a worker after a failed request.
    #[serde(default = "default_worker_pause_ms")]
    pub worker_pause_ms: u64,

    #[serde(default)]
    pub transformer: TransformerKind,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            zone_labels: default_zone_labels(),
            num_workers: default_num_workers(),
            worker_pause_ms: default_worker_pause_ms(),
            transformer: TransformerKind::default(),
        }
    }
}

/// Response transformer installed at startup.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformerKind {
    #[default]
    Cookie,

    Passthrough,
}

impl TransformerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Passthrough => "passthrough",
        }
    }
}

impl std::str::FromStr for TransformerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(format!("unknown transformer '{}'", other)),
        }
    }
}

fn default_zone_labels() -> usize {
    3
}

fn default_num_workers() -> usize {
    40
}

fn default_worker_pause_ms() -> u64 {
    3000
}
