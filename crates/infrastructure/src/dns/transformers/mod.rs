pub mod cookie;
pub mod passthrough;

use qname_relay_application::ports::ResponseTransformer;
use qname_relay_domain::TransformerKind;
use std::sync::Arc;

pub use cookie::CookieTransformer;
pub use passthrough::PassthroughTransformer;

pub fn build_transformer(kind: TransformerKind) -> Arc<dyn ResponseTransformer> {
    match kind {
        TransformerKind::Cookie => Arc::new(CookieTransformer::new()),
        TransformerKind::Passthrough => Arc::new(PassthroughTransformer),
    }
}
