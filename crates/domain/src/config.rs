pub mod backend;
pub mod errors;
pub mod logging;
pub mod relay;
pub mod root;
pub mod server;

pub use backend::BackendConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use relay::{RelayConfig, TransformerKind};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
