/**
 * Standard Middleware and Shutdown
 *
 * Both services wrap their routers in the same stack:
 *
 * 1. `x-request-id` assigned (UUID) if absent and echoed on the response
 * 2. Request/response tracing
 * 3. Whole-request timeout (`REQUEST_TIMEOUT`, answered with
 *    `500 {"error":"server error"}`)
 * 4. Panic recovery (answered the same way)
 *
 * There is no body-limit layer: it would answer 413 where the services
 * promise 400. `StrictJson` enforces `MAX_BODY_BYTES` while reading.
 *
 * `shutdown_signal` resolves on SIGINT or SIGTERM and is passed to
 * `axum::serve(..).with_graceful_shutdown(..)`, so in-flight requests are
 * allowed to finish.
 */

use std::any::Any;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::shared::error::{error_response, SERVER_ERROR};

/// Upper bound on the whole request, dependency calls included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Wrap a router in the standard middleware stack
pub fn with_standard_layers(router: Router) -> Router {
    with_layers(router, REQUEST_TIMEOUT)
}

fn with_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            request_timeout,
            enforce_request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Abandon the handler once `limit` has passed
async fn enforce_request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!(?limit, "Request timed out");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
        }
    }
}

/// A panicking handler gets the same body as any other server error
fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
}

/// Resolve when the process is asked to stop (SIGINT, or SIGTERM on unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};
    use axum::routing::get;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_request_id_is_assigned_and_echoed() {
        let app = with_standard_layers(Router::new().route("/ping", get(|| async { "pong" })));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/ping").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let response = server
            .get("/ping")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("abc-123"),
            )
            .await;
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_slow_handler_gets_json_500() {
        let app = with_layers(
            Router::new().route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "too late"
                }),
            ),
            Duration::from_millis(50),
        );
        let server = TestServer::new(app).unwrap();

        let response = server.get("/slow").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), r#"{"error":"server error"}"#);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_panics_become_500() {
        let app = with_standard_layers(Router::new().route(
            "/boom",
            get(|| async {
                if true {
                    panic!("handler exploded");
                }
                "unreachable"
            }),
        ));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/boom").await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), r#"{"error":"server error"}"#);
    }
}
