// tests/health_endpoint_tests.rs
use async_trait::async_trait;
use hyper::{Body, Request, StatusCode};
use mockito::Server;
use service_health::config::SecretString;
use service_health::health::{
    CacheProbe, DatabaseProbe, DependencyProbe, HealthAggregator, MessagingApiProbe, ProbeError,
};
use service_health::server::{HealthHandler, ServerBuilder};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const TOKEN: &str = "42:integration-token";

struct Healthy(&'static str);

#[async_trait]
impl DependencyProbe for Healthy {
    fn name(&self) -> &'static str {
        self.0
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    async fn probe(&self) -> Result<(), ProbeError> {
        Ok(())
    }
}

fn messaging_probe(base_url: &str) -> Arc<dyn DependencyProbe> {
    Arc::new(MessagingApiProbe::new(
        base_url,
        SecretString::new(TOKEN),
        Duration::from_secs(2),
    ))
}

fn unreachable_database() -> Arc<dyn DependencyProbe> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://nobody@127.0.0.1:1/none")
        .unwrap();
    Arc::new(DatabaseProbe::new(pool, Duration::from_millis(300)))
}

fn unreachable_cache() -> Arc<dyn DependencyProbe> {
    Arc::new(CacheProbe::new("redis://127.0.0.1:1/0", Duration::from_millis(300)))
}

async fn get_health(handler: HealthHandler) -> (StatusCode, serde_json::Value) {
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let response = handler.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_messaging_api_500_marks_api_down() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/bot{}/getMe", TOKEN).as_str())
        .with_status(500)
        .create_async()
        .await;

    let handler = HealthHandler::new(HealthAggregator::new(
        Arc::new(Healthy("database")),
        Arc::new(Healthy("redis")),
        messaging_probe(&server.url()),
    ));

    let (status, body) = get_health(handler).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "health": "partial",
            "status": {"database": true, "redis": true, "api": false}
        })
    );
}

#[tokio::test]
async fn test_real_probes_all_failing_still_return_200() {
    let handler = HealthHandler::new(HealthAggregator::new(
        unreachable_database(),
        unreachable_cache(),
        messaging_probe("http://127.0.0.1:1"),
    ));

    let (status, body) = get_health(handler).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "health": "partial",
            "status": {"database": false, "redis": false, "api": false}
        })
    );
}

#[tokio::test]
async fn test_only_api_reachable() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/bot{}/getMe", TOKEN).as_str())
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let aggregator = HealthAggregator::new(
        unreachable_database(),
        unreachable_cache(),
        messaging_probe(&server.url()),
    );

    let report = aggregator.aggregate().await;

    assert!(!report.is_ok());
    assert!(!report.components().database);
    assert!(!report.components().redis);
    assert!(report.components().api);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_served_over_tcp() {
    // Reserve a free port, then hand it to the server.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let addr = format!("127.0.0.1:{}", port).parse().unwrap();

    let handler = HealthHandler::new(HealthAggregator::new(
        Arc::new(Healthy("database")),
        Arc::new(Healthy("redis")),
        Arc::new(Healthy("api")),
    ));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(
        ServerBuilder::new(addr)
            .with_handler(handler)
            .serve_with_shutdown(async move {
                let _ = stop_rx.await;
            }),
    );

    let url = format!("http://127.0.0.1:{}/health", port);
    let client = reqwest::Client::new();
    let mut response = None;
    for _ in 0..50 {
        match client.get(&url).send().await {
            Ok(r) => {
                response = Some(r);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
        }
    }
    let response = response.expect("server never came up");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"health":"ok","status":{"database":true,"redis":true,"api":true}}"#
    );

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
