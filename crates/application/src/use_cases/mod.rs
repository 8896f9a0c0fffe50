pub mod relay;

pub use relay::{RelayOutcome, RelayQueryUseCase, RelaySettings};
