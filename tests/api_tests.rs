//! HTTP interface tests
//!
//! POST / creates mappings, GET /{code} redirects, GET /health reports.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use chrono::Duration;
use chote::api::{AppStartTime, health_routes, shortener_routes};
use chote::services::CODE_TAKEN_MESSAGE;
use common::{Harness, ScriptedSource, memory_harness};

macro_rules! test_app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($h.store.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(health_routes())
                .service(shortener_routes()),
        )
        .await
    };
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn harness() -> Harness {
    memory_harness(ScriptedSource::default())
}

// =============================================================================
// POST /
// =============================================================================

#[actix_rt::test]
async fn test_post_with_preferred_code_returns_code() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::post()
        .uri("/")
        .set_form([("longUrl", "https://example.com/a"), ("shortUrl", "abc123")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "abc123");
}

#[actix_rt::test]
async fn test_post_without_code_generates_one() {
    let h = memory_harness(ScriptedSource::with_codes(&["gen001"]));
    let app = test_app!(h);

    let req = TestRequest::post()
        .uri("/")
        .set_form([("longUrl", "https://example.com/a")])
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "gen001");
}

#[actix_rt::test]
async fn test_post_taken_code_is_bad_request_with_message() {
    let h = harness();
    h.store.add("https://first.test", Some("abc123")).await.unwrap();
    let app = test_app!(h);

    let req = TestRequest::post()
        .uri("/")
        .set_form([("longUrl", "https://second.test"), ("shortUrl", "abc123")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, CODE_TAKEN_MESSAGE);
}

#[actix_rt::test]
async fn test_post_invalid_code_is_bad_request() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::post()
        .uri("/")
        .set_form([("longUrl", "https://x.test"), ("shortUrl", "bad code")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_post_missing_long_url_is_rejected() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::post()
        .uri("/")
        .set_form([("shortUrl", "abc123")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
    assert_eq!(h.store.count().await.unwrap(), 0);
}

// =============================================================================
// GET /{code}
// =============================================================================

#[actix_rt::test]
async fn test_redirect_to_target() {
    let h = harness();
    h.store.add("https://example.com/a", Some("abc123")).await.unwrap();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/abc123").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "https://example.com/a");
}

#[actix_rt::test]
async fn test_redirect_unknown_code_falls_back_to_form() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/nothing").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/?shortUrl=nothing");
}

#[actix_rt::test]
async fn test_redirect_expired_code_falls_back_and_is_reclaimed() {
    let h = harness();
    h.store.add("https://old.test", Some("abc123")).await.unwrap();
    h.clock.advance(Duration::minutes(3));
    let app = test_app!(h);

    let req = TestRequest::get().uri("/abc123").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/?shortUrl=abc123");
    assert_eq!(h.store.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_path_outside_code_charset_is_not_routed() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/a.b").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// GET / and /health
// =============================================================================

#[actix_rt::test]
async fn test_home_echoes_fallback_code() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/?shortUrl=abc123").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("'abc123'"));
    assert!(body.contains("120 seconds"));
}

#[actix_rt::test]
async fn test_health_reports_backend_and_count() {
    let h = harness();
    h.store.add("https://a.test", Some("one")).await.unwrap();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"]["backend"], "memory");
    assert_eq!(json["storage"]["mappings"], 1);
    assert_eq!(json["link_lifetime_secs"], 120);
}

#[actix_rt::test]
async fn test_liveness() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_health_head_returns_status_only() {
    let h = harness();
    let app = test_app!(h);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/health")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}
