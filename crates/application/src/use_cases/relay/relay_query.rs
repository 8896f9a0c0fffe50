use super::message_surgery::{encode_within, restore_labels, strip_labels, truncate_sections};
use crate::ports::{BackendTransport, ResponseTransformer};
use crate::services::CommandParser;
use hickory_proto::error::ProtoError;
use hickory_proto::op::Message;
use hickory_proto::rr::Name;
use qname_relay_domain::DomainError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Zone the backend is authoritative for.
    pub backend_domain: Name,

    /// Non-root labels of the relay's own zone.
    pub zone_labels: usize,

    /// Bound on one backend round trip.
    pub timeout: Duration,

    /// Largest reply returned before sections are cleared.
    pub max_response_size: u16,
}

/// Reply produced for one incoming packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The query could not be decoded; the backend's bytes are returned as-is.
    Raw(Vec<u8>),

    Transformed(Vec<u8>),

    /// The transformed reply was too large; only the question is kept.
    Truncated(Vec<u8>),
}

impl RelayOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Raw(b) | Self::Transformed(b) | Self::Truncated(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(b) | Self::Transformed(b) | Self::Truncated(b) => b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Transformed(_) => "transformed",
            Self::Truncated(_) => "truncated",
        }
    }
}

/// Runs a single query through the relay: decode, strip the command labels,
/// forward, restore the client's name, transform and encode.
pub struct RelayQueryUseCase {
    transport: Arc<dyn BackendTransport>,
    transformer: Arc<dyn ResponseTransformer>,
    parser: CommandParser,
    settings: RelaySettings,
}

impl RelayQueryUseCase {
    pub fn new(
        transport: Arc<dyn BackendTransport>,
        transformer: Arc<dyn ResponseTransformer>,
        mut settings: RelaySettings,
    ) -> Self {
        settings.backend_domain.set_fqdn(true);
        let parser = CommandParser::new(transformer.command_mapping(), settings.zone_labels);
        Self {
            transport,
            transformer,
            parser,
            settings,
        }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    pub fn transformer_name(&self) -> &'static str {
        self.transformer.name()
    }

    pub fn backend_protocol(&self) -> &'static str {
        self.transport.protocol_name()
    }

    pub async fn execute(&self, request_bytes: &[u8]) -> Result<RelayOutcome, DomainError> {
        let start = Instant::now();

        let mut request = match Message::from_vec(request_bytes) {
            Ok(message) if !message.queries().is_empty() => message,
            Ok(_) => {
                warn!(bytes = request_bytes.len(), "Query has no question, relaying raw");
                return self.relay_raw(request_bytes).await;
            }
            Err(e) => {
                warn!(error = %e, bytes = request_bytes.len(), "Malformed query, relaying raw");
                return self.relay_raw(request_bytes).await;
            }
        };

        let original_qname = request.queries()[0].name().clone();
        let command = self.parser.parse_name(&original_qname);

        let forwarded_qname = strip_labels(
            &original_qname,
            command.consumed_labels() + self.settings.zone_labels,
            &self.settings.backend_domain,
        )?;

        debug!(
            qname = %original_qname,
            forwarded = %forwarded_qname,
            consumed_labels = command.consumed_labels(),
            keywords = command.len(),
            "Forwarding query to backend"
        );

        let mut queries = request.take_queries();
        queries[0].set_name(forwarded_qname);
        request.add_queries(queries);

        let forwarded_bytes = request.to_vec().map_err(|e| {
            DomainError::InvalidDnsRequest(format!("Failed to encode forwarded query: {}", e))
        })?;

        let reply = self
            .transport
            .exchange(&forwarded_bytes, self.settings.timeout)
            .await?;

        debug!(
            server = %self.transport.server(),
            protocol = reply.protocol_used,
            bytes = reply.bytes.len(),
            "Backend replied"
        );

        let mut response = Message::from_vec(&reply.bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "Failed to parse backend reply from {}: {}",
                self.transport.server(),
                e
            ))
        })?;

        restore_labels(
            &mut response,
            &original_qname,
            &self.settings.backend_domain,
            self.settings.zone_labels,
        );
        self.transformer.transform(&mut response, &command);

        let outcome = self.encode_response(response)?;

        debug!(
            qname = %original_qname,
            outcome = outcome.as_str(),
            bytes = outcome.bytes().len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query relayed"
        );

        Ok(outcome)
    }

    async fn relay_raw(&self, request_bytes: &[u8]) -> Result<RelayOutcome, DomainError> {
        let reply = self
            .transport
            .exchange(request_bytes, self.settings.timeout)
            .await?;
        debug!(
            protocol = reply.protocol_used,
            bytes = reply.bytes.len(),
            "Raw reply from backend"
        );
        Ok(RelayOutcome::Raw(reply.bytes))
    }

    fn encode_response(&self, mut response: Message) -> Result<RelayOutcome, DomainError> {
        let max_size = self.settings.max_response_size;
        let encode_error = |e: ProtoError| {
            DomainError::InvalidDnsResponse(format!("Failed to encode reply: {}", e))
        };

        if let Some(bytes) = encode_within(&response, max_size).map_err(encode_error)? {
            return Ok(RelayOutcome::Transformed(bytes));
        }

        warn!(max_size, "Reply too large, clearing answer/authority/additional");
        truncate_sections(&mut response);
        let bytes = response.to_vec().map_err(encode_error)?;
        Ok(RelayOutcome::Truncated(bytes))
    }
}
