use qname_relay_application::use_cases::RelayQueryUseCase;
use qname_relay_domain::Config;
use qname_relay_infrastructure::dns::{RelayServer, RelayServerConfig};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{info, warn};

pub async fn start_dns_server(
    config: &Config,
    use_case: Arc<RelayQueryUseCase>,
) -> anyhow::Result<()> {
    let bind_addr = if config.server.bind_address.contains(':') {
        format!("[{}]:{}", config.server.bind_address, config.server.port)
    } else {
        format!("{}:{}", config.server.bind_address, config.server.port)
    };
    let socket_addr: SocketAddr = bind_addr.parse()?;

    info!(
        bind_address = %socket_addr,
        num_workers = config.relay.num_workers,
        "Starting relay"
    );

    let socket = create_udp_socket(socket_addr)?;
    let server = RelayServer::new(
        socket,
        use_case,
        RelayServerConfig {
            num_workers: config.relay.num_workers,
            worker_pause: Duration::from_millis(config.relay.worker_pause_ms),
            max_request_size: config.server.max_request_size,
        },
    );

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
