pub mod health;
pub mod home;
pub mod redirect;
pub mod shorten;

pub use health::{AppStartTime, HealthService, health_routes};
pub use home::HomeService;
pub use redirect::RedirectService;
pub use shorten::ShortenService;

/// 短链接路由：首页、创建、重定向
///
/// 必须在其他固定前缀的 scope 之后注册，`/{code}` 会匹配任意单段路径。
pub fn shortener_routes() -> actix_web::Scope {
    use actix_web::web;

    web::scope("")
        .route("/", web::get().to(HomeService::home))
        .route("/", web::post().to(ShortenService::add))
        .route(
            "/{code:[A-Za-z0-9_-]+}",
            web::get().to(RedirectService::handle_redirect),
        )
        .route(
            "/{code:[A-Za-z0-9_-]+}",
            web::head().to(RedirectService::handle_redirect),
        )
}
