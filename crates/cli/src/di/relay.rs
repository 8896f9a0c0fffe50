use anyhow::Context;
use hickory_proto::rr::Name;
use qname_relay_application::ports::BackendTransport;
use qname_relay_application::use_cases::{RelayQueryUseCase, RelaySettings};
use qname_relay_domain::Config;
use qname_relay_infrastructure::dns::{build_transformer, UdpTransport};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub fn build_relay(config: &Config) -> anyhow::Result<Arc<RelayQueryUseCase>> {
    let backend_addr: SocketAddr = config
        .backend
        .socket_addr()
        .parse()
        .with_context(|| format!("invalid backend address {}", config.backend.socket_addr()))?;

    let backend_domain = Name::from_str(&config.backend.domain)
        .with_context(|| format!("invalid backend domain {}", config.backend.domain))?;

    let transport = Arc::new(
        UdpTransport::new(backend_addr).with_max_response_size(config.backend.max_response_size),
    );
    let transformer = build_transformer(config.relay.transformer);

    info!(
        backend = %backend_addr,
        protocol = transport.protocol_name(),
        backend_domain = %backend_domain,
        zone_labels = config.relay.zone_labels,
        transformer = transformer.name(),
        "Relay pipeline built"
    );

    Ok(Arc::new(RelayQueryUseCase::new(
        transport,
        transformer,
        RelaySettings {
            backend_domain,
            zone_labels: config.relay.zone_labels,
            timeout: Duration::from_millis(config.backend.timeout_ms),
            max_response_size: config.server.max_response_size,
        },
    )))
}
