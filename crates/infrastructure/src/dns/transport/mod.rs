pub mod udp;

use qname_relay_domain::DomainError;
use std::io;

pub use udp::UdpTransport;

/// Maps a socket error onto the transport variants of [`DomainError`].
pub(crate) fn map_io_error(server: &str, error: io::Error) -> DomainError {
    match error.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            DomainError::TransportConnectionReset {
                server: server.to_string(),
            }
        }
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::IoError(format!("{}: {}", server, error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_io_error_kinds() {
        let refused = map_io_error("b", io::Error::from(io::ErrorKind::ConnectionRefused));
        assert!(matches!(refused, DomainError::TransportConnectionRefused { .. }));

        let reset = map_io_error("b", io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(matches!(reset, DomainError::TransportConnectionReset { .. }));

        let other = map_io_error("b", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(other, DomainError::IoError(_)));
        assert!(other.is_transport_error());
    }
}
