//! Server lifecycle: bind, serve, wait for health, stop.

use super::retry::retry_with_backoff;
use super::router::route_request;
use crate::config::{resolve_listen_addr, Config, ConfigError};
use crate::metrics;
use crate::mock::MockSet;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

const HEALTH_CHECK_ATTEMPTS: u32 = 5;
const HEALTH_CHECK_INITIAL_DELAY: Duration = Duration::from_millis(500);
const HEALTH_CHECK_MAX_DELAY: Duration = Duration::from_secs(5);
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Error types for server lifecycle
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server is already running on {0}")]
    AlreadyRunning(SocketAddr),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to health check server: {0}")]
    HealthCheck(String),
}

struct Running {
    local_addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

/// Mock LLM server serving all three provider APIs from one listener.
pub struct MockLlmServer {
    config: Config,
    mocks: Arc<MockSet>,
    running: Mutex<Option<Running>>,
}

impl MockLlmServer {
    /// Build the mock registries from `config`. Nothing is bound until `start`.
    pub fn new(config: Config) -> Self {
        let mocks = Arc::new(MockSet::from_config(&config));
        metrics::set_registered_mocks(&mocks);
        Self {
            config,
            mocks,
            running: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mocks(&self) -> Arc<MockSet> {
        Arc::clone(&self.mocks)
    }

    /// Bind the listener, start serving, and wait until `/health` answers.
    ///
    /// Returns the base URL clients should use.
    pub async fn start(&self) -> Result<String, ServerError> {
        if let Some(addr) = self.local_addr() {
            return Err(ServerError::AlreadyRunning(addr));
        }

        let addr = resolve_listen_addr(&self.config.listen_addr)?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;
        info!("Mock LLM server bound to {}", local_addr);

        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(serve(listener, Arc::clone(&self.mocks), shutdown_rx));
        let base_url = base_url_for(local_addr);

        if let Err(e) = wait_until_healthy(&base_url).await {
            let _ = shutdown_tx.send(());
            handle.abort();
            return Err(e);
        }

        let mut running = self.running.lock();
        if let Some(existing) = running.as_ref() {
            // Lost a race with a concurrent start
            let _ = shutdown_tx.send(());
            return Err(ServerError::AlreadyRunning(existing.local_addr));
        }
        *running = Some(Running {
            local_addr,
            shutdown_tx,
            handle,
        });

        info!("Mock LLM server ready at {}", base_url);
        Ok(base_url)
    }

    /// Address the listener is bound to, while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().as_ref().map(|r| r.local_addr)
    }

    /// Base URL for clients, while running
    pub fn base_url(&self) -> Option<String> {
        self.local_addr().map(base_url_for)
    }

    /// Stop accepting connections. No-op if the server is not running.
    ///
    /// Only the listener is closed. Keep-alive connections accepted before the
    /// call keep being served until the client hangs up.
    pub async fn stop(&self) {
        let running = self.running.lock().take();
        let Some(running) = running else {
            return;
        };
        let _ = running.shutdown_tx.send(());
        if let Err(e) = running.handle.await {
            debug!("Server task ended abnormally: {}", e);
        }
        info!("Mock LLM server on {} stopped", running.local_addr);
    }
}

async fn serve(
    listener: TcpListener,
    mocks: Arc<MockSet>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, remote)) => {
                        let mocks = Arc::clone(&mocks);
                        tokio::spawn(async move {
                            let io = TokioIo::new(stream);
                            let service = service_fn(move |req| {
                                let mocks = Arc::clone(&mocks);
                                async move { route_request(req, mocks).await }
                            });
                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                debug!("Connection error from {}: {}", remote, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Accept error: {}", e);
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Mock LLM server shutting down");
                break;
            }
        }
    }
}

async fn wait_until_healthy(base_url: &str) -> Result<(), ServerError> {
    let client = reqwest::Client::builder()
        .timeout(HEALTH_CHECK_TIMEOUT)
        .no_proxy()
        .build()
        .map_err(|e| ServerError::HealthCheck(e.to_string()))?;
    let url = format!("{base_url}/health");

    retry_with_backoff(
        HEALTH_CHECK_ATTEMPTS,
        HEALTH_CHECK_INITIAL_DELAY,
        HEALTH_CHECK_MAX_DELAY,
        || {
            let client = &client;
            let url = &url;
            async move {
                let response = client.get(url).send().await.map_err(|e| e.to_string())?;
                if response.status() != reqwest::StatusCode::OK {
                    return Err(format!("health check failed: {}", response.status()));
                }
                Ok(())
            }
        },
    )
    .await
    .map_err(ServerError::HealthCheck)
}

/// Unspecified bind addresses are reached through loopback.
fn base_url_for(addr: SocketAddr) -> String {
    let ip = match addr.ip() {
        IpAddr::V4(v4) if v4.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(v6) if v6.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}
