#![allow(dead_code)]
#![allow(unused_imports)]

mod messages;
mod mock_ports;

pub use messages::{backend_reply, oversized_reply, query_bytes, BACKEND_DOMAIN};
pub use mock_ports::{MockBackendTransport, RecordingTransformer};
