use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::{Mutex, Notify};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::history_service::HistoryService;

const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ShutdownCoordinator {
    notify: Arc<Notify>,
    shutting_down: AtomicBool,
    inner: Mutex<Option<Arc<HistoryService>>>,
}

impl ShutdownCoordinator {
    pub fn new(history: Arc<HistoryService>) -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            shutting_down: AtomicBool::new(false),
            inner: Mutex::new(Some(history)),
        }
    }

    pub async fn wait_for_shutdown(&self) {
        self.notify.notified().await;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Relaxed)
    }

    /// Flags the service as shutting down, releases the server and waits
    /// (bounded) for in-flight history writes.
    pub async fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::Relaxed);
        info!("Initiating graceful shutdown sequence");

        let Some(history) = self.inner.lock().await.take() else {
            warn!("Shutdown already called");
            return;
        };

        // Notify all waiting tasks
        self.notify.notify_waiters();

        match tokio::time::timeout(DRAIN_TIMEOUT, history.drain()).await {
            Ok(()) => info!("History writes drained"),
            Err(_) => warn!("Timed out waiting for history writes"),
        }

        info!("Graceful shutdown sequence complete");
    }
}

pub async fn listen_for_shutdown_signals() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }

    info!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use history_models::MemoryHistoryStore;
    use weather_client::{ClientConfig, OpenWeatherClient};

    fn coordinator() -> ShutdownCoordinator {
        let forecasts =
            OpenWeatherClient::new(ClientConfig::new("test-key")).unwrap();
        let history = HistoryService::new(
            Arc::new(MemoryHistoryStore::new()),
            Arc::new(forecasts),
        );
        ShutdownCoordinator::new(Arc::new(history))
    }

    #[tokio::test]
    async fn test_shutdown_flags_and_releases_waiters() {
        let coordinator = coordinator();
        assert!(!coordinator.is_shutting_down());

        let released = tokio::time::timeout(Duration::from_secs(1), async {
            tokio::join!(coordinator.wait_for_shutdown(), async {
                tokio::task::yield_now().await;
                coordinator.shutdown().await;
            })
        })
        .await;

        assert!(released.is_ok());
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn test_second_shutdown_is_a_no_op() {
        let coordinator = coordinator();

        coordinator.shutdown().await;
        coordinator.shutdown().await;

        assert!(coordinator.is_shutting_down());
    }
}
