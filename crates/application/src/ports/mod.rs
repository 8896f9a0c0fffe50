mod backend_transport;
mod response_transformer;

pub use backend_transport::{BackendTransport, TransportResponse};
pub use response_transformer::ResponseTransformer;
