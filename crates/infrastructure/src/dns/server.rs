use qname_relay_application::use_cases::RelayQueryUseCase;
use qname_relay_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

type Datagram = (Vec<u8>, SocketAddr);
type SharedQueue = Arc<Mutex<mpsc::UnboundedReceiver<Datagram>>>;

#[derive(Debug, Clone)]
pub struct RelayServerConfig {
    pub num_workers: usize,

    /// How long a worker sleeps after a request fails.
    pub worker_pause: Duration,

    /// Receive buffer; longer datagrams are truncated by the kernel.
    pub max_request_size: usize,
}

impl Default for RelayServerConfig {
    fn default() -> Self {
        Self {
            num_workers: 40,
            worker_pause: Duration::from_secs(3),
            max_request_size: 2048,
        }
    }
}

/// Listens on one UDP socket and hands each datagram to a fixed pool of
/// workers through an unbounded queue.
///
/// The queue applies no backpressure: if the backend stalls, datagrams pile
/// up in memory until workers catch up.
pub struct RelayServer {
    socket: Arc<UdpSocket>,
    use_case: Arc<RelayQueryUseCase>,
    config: RelayServerConfig,
}

impl RelayServer {
    pub fn new(
        socket: UdpSocket,
        use_case: Arc<RelayQueryUseCase>,
        config: RelayServerConfig,
    ) -> Self {
        Self {
            socket: Arc::new(socket),
            use_case,
            config,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serves until `shutdown` resolves. Queued datagrams are dropped on
    /// shutdown; requests already taken by a worker are finished.
    pub async fn run<F>(self, shutdown: F)
    where
        F: std::future::Future<Output = ()> + Send,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Datagram>();
        let queue: SharedQueue = Arc::new(Mutex::new(rx));
        let (stop_tx, stop_rx) = watch::channel(false);

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.num_workers.max(1) {
            workers.spawn(run_worker(
                worker_id,
                queue.clone(),
                self.socket.clone(),
                self.use_case.clone(),
                self.config.worker_pause,
                stop_rx.clone(),
            ));
        }

        info!(
            bind_address = ?self.socket.local_addr().ok(),
            num_workers = self.config.num_workers,
            transformer = self.use_case.transformer_name(),
            backend_protocol = self.use_case.backend_protocol(),
            "Relay ready"
        );

        tokio::select! {
            _ = receive_loop(self.socket.clone(), tx, self.config.max_request_size) => {}
            _ = shutdown => info!("Shutdown requested"),
        }

        let _ = stop_tx.send(true);
        while workers.join_next().await.is_some() {}
        info!("Relay stopped");
    }
}

async fn receive_loop(
    socket: Arc<UdpSocket>,
    tx: mpsc::UnboundedSender<Datagram>,
    max_request_size: usize,
) {
    let mut recv_buf = vec![0u8; max_request_size];

    loop {
        match socket.recv_from(&mut recv_buf).await {
            Ok((len, from)) => {
                debug!(client = %from, bytes = len, "Datagram received");
                if tx.send((recv_buf[..len].to_vec(), from)).is_err() {
                    warn!("Worker queue closed, stopping receiver");
                    break;
                }
            }
            Err(e) => error!(error = %e, "UDP recv error"),
        }
    }
}

async fn run_worker(
    worker_id: usize,
    queue: SharedQueue,
    socket: Arc<UdpSocket>,
    use_case: Arc<RelayQueryUseCase>,
    worker_pause: Duration,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        let next = tokio::select! {
            item = async { queue.lock().await.recv().await } => item,
            _ = stop.wait_for(|stopped| *stopped) => None,
        };
        let Some((request, client)) = next else {
            break;
        };

        let result = match use_case.execute(&request).await {
            Ok(outcome) => socket
                .send_to(outcome.bytes(), client)
                .await
                .map(|_| ())
                .map_err(|e| DomainError::IoError(format!("reply to {}: {}", client, e))),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            if e.is_transport_error() {
                warn!(
                    worker = worker_id,
                    client = %client,
                    request_bytes = request.len(),
                    error = %e,
                    "Transport failed, pausing worker"
                );
            } else {
                error!(
                    worker = worker_id,
                    client = %client,
                    request_bytes = request.len(),
                    error = %e,
                    "Request failed, pausing worker"
                );
            }
            tokio::select! {
                _ = tokio::time::sleep(worker_pause) => {}
                _ = stop.wait_for(|stopped| *stopped) => break,
            }
        }
    }

    debug!(worker = worker_id, "Worker exiting");
}
