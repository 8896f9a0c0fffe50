//! qname-relay Domain Layer
pub mod command;
pub mod config;
pub mod errors;

pub use command::{CommandMapping, CommandValue, ParsedCommand, ValueKind};
pub use config::{CliOverrides, Config, ConfigError, TransformerKind};
pub use errors::DomainError;
