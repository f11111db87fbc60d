use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error};

use crate::services::MappingStore;

pub struct RedirectService {}

impl RedirectService {
    /// `GET /{code}`：302 到目标地址；不存在或已过期时 302 回首页并带上 code
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<Arc<MappingStore>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match store.redirect_location(&code).await {
            Ok(location) => {
                debug!("Redirecting '{}' -> {}", code, location);
                Self::found(&location)
            }
            Err(e) => {
                error!("Storage error during redirect lookup for '{}': {}", code, e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn found(location: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", location))
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .finish()
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}
