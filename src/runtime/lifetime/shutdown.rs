use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C，然后停止后台任务
pub async fn listen_for_shutdown(sweeper: Option<JoinHandle<()>>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping background tasks...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let Some(sweeper) = sweeper else {
        return;
    };

    sweeper.abort();
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), sweeper).await {
        Ok(_) => info!("Expiry sweep task stopped"),
        Err(_) => error!(
            "Expiry sweep task did not stop within {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}
