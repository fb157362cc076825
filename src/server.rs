//! HTTP server lifecycle: startup, timeouts, and graceful shutdown.
//!
//! The server owns the listening socket and serves each accepted
//! connection on its own task. Shutdown is event-driven: the accept loop
//! reacts to whichever fires first, an OS signal or a fatal accept error,
//! then stops accepting, drains in-flight connections within the
//! configured grace period, and forcibly closes whatever remains.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::hasher::Md5Hasher;
use crate::routes::app_router;
use crate::state::AppState;
use crate::storage::{LogStore, MemStore, StorageBackend};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - the storage backend (durable log, or in-memory when configured)
/// - the MD5 hasher
/// - the Axum router with tracing and timeout layers
/// - the listener and connection-serving loop
///
/// Returns once shutdown completes; the storage backend is closed last,
/// after the final connection is gone.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be opened, the bind
/// fails, or the accept loop dies.
pub async fn run(config: Config) -> Result<()> {
    let storage: Arc<dyn StorageBackend> = match config.storage_backend.as_str() {
        "memory" => Arc::new(MemStore::new()),
        _ => Arc::new(
            LogStore::open(&config.storage_path)
                .await
                .context("failed to open storage log")?,
        ),
    };

    let state = AppState::new(storage.clone(), Arc::new(Md5Hasher::new()));
    let app = app_router(state, &config);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let result = serve(listener, app, &config, shutdown_signal()).await;

    if let Err(e) = storage.close().await {
        error!("storage close failed: {}", e);
    }

    result
}

/// Serves connections from `listener` until `shutdown` resolves or the
/// accept loop hits a fatal error, then drains.
///
/// Each connection gets hyper's http1 driver with a header read timeout
/// equal to the configured idle timeout, which bounds both the initial
/// header read and keep-alive waits between requests. In-flight requests
/// get up to the grace period to finish once draining starts.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    config: &Config,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let service = TowerToHyperService::new(app);
    let graceful = GracefulShutdown::new();
    let mut conns: JoinSet<()> = JoinSet::new();
    let mut shutdown = std::pin::pin!(shutdown);
    let mut fatal: Option<std::io::Error> = None;

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let io = TokioIo::new(stream);
                    let service = service.clone();

                    let mut builder = http1::Builder::new();
                    builder
                        .timer(TokioTimer::new())
                        .header_read_timeout(config.idle_timeout());

                    let conn = graceful.watch(builder.serve_connection(io, service));
                    conns.spawn(async move {
                        if let Err(e) = conn.await {
                            debug!(%peer, "connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("accept failed: {}", e);
                    fatal = Some(e);
                    break;
                }
            },
            // Reap finished connection tasks as we go.
            Some(_) = conns.join_next(), if !conns.is_empty() => {}
            _ = &mut shutdown => {
                info!("shutdown requested, draining connections");
                break;
            }
        }
    }

    // Stop accepting before draining.
    drop(listener);

    tokio::select! {
        _ = graceful.shutdown() => {
            info!("all connections drained");
        }
        _ = tokio::time::sleep(config.shutdown_grace()) => {
            warn!(
                "grace period of {}s expired, closing remaining connections",
                config.shutdown_grace
            );
            conns.abort_all();
        }
    }

    match fatal {
        Some(e) => Err(e).context("accept loop failed"),
        None => Ok(()),
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
    }
}
