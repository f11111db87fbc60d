use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::{StaticConfig, get_config};
use crate::services::{IdentifierGenerator, MappingStore};
use crate::storage::StorageFactory;
use crate::utils::SystemClock;

pub struct StartupContext {
    pub store: Arc<MappingStore>,
    /// 定期清理任务；`links.sweep_interval_secs = 0` 时为 None
    pub sweeper: Option<JoinHandle<()>>,
}

/// 按配置打开存储并构建 MappingStore（服务器与 CLI 共用）
pub async fn build_store(config: &StaticConfig) -> Result<Arc<MappingStore>> {
    let repository = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", repository.backend_name());

    let store = MappingStore::new(
        repository,
        IdentifierGenerator::default(),
        Arc::new(SystemClock),
        config.links.lifetime(),
    );
    debug!("Link lifetime: {}s", store.lifetime().num_seconds());

    Ok(Arc::new(store))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();
    let store = build_store(&config).await?;

    let sweeper = match config.links.sweep_interval_secs {
        0 => {
            debug!("Expiry sweep disabled, relying on lazy reclamation");
            None
        }
        secs => Some(spawn_sweep_task(store.clone(), Duration::from_secs(secs))),
    };

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { store, sweeper })
}

/// 后台定期删除过期映射
pub fn spawn_sweep_task(store: Arc<MappingStore>, period: Duration) -> JoinHandle<()> {
    info!("Expiry sweep enabled, every {}s", period.as_secs());

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // 第一次 tick 立即返回
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = store.sweep_expired().await {
                error!("Expiry sweep failed: {}", e);
            }
        }
    })
}
