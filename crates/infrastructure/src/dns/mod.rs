pub mod server;
pub mod transformers;
pub mod transport;

pub use server::{RelayServer, RelayServerConfig};
pub use transformers::{build_transformer, CookieTransformer, PassthroughTransformer};
pub use transport::UdpTransport;
