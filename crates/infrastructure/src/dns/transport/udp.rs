//! Plain UDP exchange with the authoritative backend (RFC 1035 §4.2.1).
//!
//! Every exchange binds its own ephemeral socket and connects it to the
//! backend, so the kernel only delivers datagrams from that address and a
//! reply can never be picked up by another in-flight query.

use super::map_io_error;
use async_trait::async_trait;
use qname_relay_application::ports::{BackendTransport, TransportResponse};
use qname_relay_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest backend reply read, matching a common EDNS(0) buffer size.
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }

    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    async fn round_trip(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let server = self.server_addr.to_string();

        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| map_io_error(&server, e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| map_io_error(&server, e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| map_io_error(&server, e))?;

        debug!(server = %self.server_addr, bytes_sent, "Query sent to backend");

        let mut recv_buf = vec![0u8; self.max_response_size];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| map_io_error(&server, e))?;
        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "Backend reply received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl BackendTransport for UdpTransport {
    async fn exchange(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.round_trip(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_transport_creation() {
        let addr: SocketAddr = "127.0.0.1:5353".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert_eq!(transport.server_addr(), addr);
        assert_eq!(transport.protocol_name(), "UDP");
        assert_eq!(transport.server(), "127.0.0.1:5353");
    }

    #[test]
    fn test_bind_addr_follows_family() {
        let v6 = UdpTransport::new("[::1]:53".parse().unwrap());
        assert!(v6.bind_addr().is_ipv6());
        let v4 = UdpTransport::new("10.0.0.1:53".parse().unwrap());
        assert!(v4.bind_addr().is_ipv4());
    }

    #[tokio::test]
    async fn test_exchange_round_trip() {
        let backend = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let backend_addr = backend.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (n, from) = backend.recv_from(&mut buf).await.unwrap();
            let mut reply = buf[..n].to_vec();
            reply.reverse();
            backend.send_to(&reply, from).await.unwrap();
        });

        let transport = UdpTransport::new(backend_addr);
        let response = transport
            .exchange(&[1, 2, 3], Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(response.bytes, vec![3, 2, 1]);
        assert_eq!(response.protocol_used, "UDP");
    }

    #[tokio::test]
    async fn test_exchange_times_out_on_silent_backend() {
        let backend = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::new(backend.local_addr().unwrap());

        let result = transport
            .exchange(&[0u8; 12], Duration::from_millis(50))
            .await;
        assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
        drop(backend);
    }
}
