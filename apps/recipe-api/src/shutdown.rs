use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

/// Resolves on Ctrl+C or SIGTERM and records the signal in `signalled`.
pub async fn shutdown_signal(signalled: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }

    signalled.notify_one();
}

/// Drives `server` to completion, but gives up `drain_timeout` after
/// `signalled` fires. Returns `None` when the deadline cut the drain short.
pub async fn serve_until_drained<F>(
    server: F,
    signalled: Arc<Notify>,
    drain_timeout: Duration,
) -> Option<F::Output>
where
    F: Future,
{
    let deadline = async {
        signalled.notified().await;
        tracing::info!(
            timeout_secs = drain_timeout.as_secs(),
            "allowing connections to drain"
        );
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        output = server => Some(output),
        _ = deadline => {
            tracing::warn!(
                timeout_secs = drain_timeout.as_secs(),
                "connections still open after drain timeout, forcing shutdown"
            );
            None
        }
    }
}
