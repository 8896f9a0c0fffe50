use async_trait::async_trait;
use qname_relay_domain::DomainError;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request/response round trip with the authoritative backend.
///
/// Implementations must not share a receive path between concurrent
/// exchanges: a reply read by one call always belongs to the query that call
/// sent.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    async fn exchange(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;

    /// Backend address, for diagnostics.
    fn server(&self) -> String;
}
