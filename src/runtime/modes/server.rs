//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::{AppStartTime, health_routes, shortener_routes};
use crate::config::{ServerConfig, get_config};
use crate::runtime::lifetime;

/// Build CORS middleware from configuration
fn build_cors_middleware(server: &ServerConfig) -> Cors {
    // 关闭时使用浏览器默认的同源策略
    if !server.cors_allow_any_origin {
        return Cors::default();
    }

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "HEAD", "POST"])
        .allow_any_header()
        .max_age(3600)
}

/// Run the HTTP server
///
/// Records the start time, builds the store, serves until the server exits
/// or Ctrl+C arrives.
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let store = startup.store.clone();
    let config = get_config();
    let server_config = config.server.clone();

    let cpu_count = server_config.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_config = server_config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000")),
            )
            .service(health_routes())
            .service(shortener_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", server_config.host, server_config.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(startup.sweeper) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
