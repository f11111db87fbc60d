use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::ChoteError;
use crate::services::MappingStore;

/// `POST /` 表单字段
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(rename = "longUrl")]
    pub long_url: String,
    #[serde(rename = "shortUrl", default)]
    pub short_url: Option<String>,
}

pub struct ShortenService;

impl ShortenService {
    /// 创建映射，成功时以纯文本返回 code
    pub async fn add(
        form: web::Form<ShortenForm>,
        store: web::Data<Arc<MappingStore>>,
    ) -> impl Responder {
        let form = form.into_inner();

        match store.add(&form.long_url, form.short_url.as_deref()).await {
            Ok(code) => HttpResponse::Ok()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body(code),
            Err(e) => Self::error_response(&e),
        }
    }

    /// 业务拒绝返回 4xx 并带上提示文本，其余错误统一 500
    pub fn error_response(err: &ChoteError) -> HttpResponse {
        if !err.is_rejection() {
            error!("Failed to create mapping: {}", err);
            return HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body("Internal Server Error");
        }

        // 并发写入输掉竞争时用 409 与 CodeTaken 区分
        let status = match err {
            ChoteError::UniquenessViolation(_) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        debug!("Rejected mapping request: {}", err);

        HttpResponse::build(status)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let cases = [
            (ChoteError::code_taken("taken"), StatusCode::BAD_REQUEST),
            (ChoteError::invalid_code("bad"), StatusCode::BAD_REQUEST),
            (ChoteError::uniqueness_violation("race"), StatusCode::CONFLICT),
            (ChoteError::database_operation("locked"), StatusCode::INTERNAL_SERVER_ERROR),
            (ChoteError::config("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ShortenService::error_response(&err).status(), expected, "{:?}", err);
        }
    }
}
