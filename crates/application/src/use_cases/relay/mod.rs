mod message_surgery;
mod relay_query;

pub use message_surgery::{encode_within, restore_labels, strip_labels, truncate_sections};
pub use relay_query::{RelayOutcome, RelayQueryUseCase, RelaySettings};
