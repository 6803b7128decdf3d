// src/server/handler.rs
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Body, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::task::{Context, Poll};
use tower::Service;
use tracing::Instrument;
use uuid::Uuid;

use crate::health::HealthAggregator;

pub const HEALTH_PATH: &str = "/health";

/// Routes `GET /health` to the aggregator. Dependency failures only show
/// up in the JSON body; the status code is 200 on every check.
#[derive(Clone)]
pub struct HealthHandler {
    aggregator: HealthAggregator,
}

impl HealthHandler {
    pub fn new(aggregator: HealthAggregator) -> Self {
        Self { aggregator }
    }

    async fn handle(aggregator: HealthAggregator, req: Request<Body>) -> Response<Body> {
        if req.uri().path() != HEALTH_PATH {
            return plain(StatusCode::NOT_FOUND, "Not Found");
        }
        if req.method() != Method::GET {
            let mut response = plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET"));
            return response;
        }

        let report = aggregator.aggregate().await;
        match serde_json::to_vec(&report) {
            Ok(body) => {
                let mut response = Response::new(Body::from(body));
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                response
            }
            Err(e) => {
                tracing::error!(%e, "failed to serialize health report");
                plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

fn plain(status: StatusCode, message: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = status;
    response
}

impl Service<Request<Body>> for HealthHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let aggregator = self.aggregator.clone();
        let span = tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
            path = %req.uri().path(),
        );

        Box::pin(
            async move {
                let response = Self::handle(aggregator, req).await;
                tracing::debug!(status = %response.status(), "request complete");
                Ok(response)
            }
            .instrument(span),
        )
    }
}
