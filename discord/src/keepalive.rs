use std::net::SocketAddr;

use axum::{routing::get, Router};
use eyre::WrapErr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

pub(crate) const KEEP_ALIVE_BODY: &str = "Bot is online and running!";

pub(crate) fn create_router() -> Router {
    Router::new().route("/", get(home)).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(
                DefaultOnResponse::new()
                    .level(tracing::Level::DEBUG)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

async fn home() -> &'static str {
    KEEP_ALIVE_BODY
}

/// Serves the uptime-ping endpoint on its own task; failures are logged and
/// never stop the bot.
pub(crate) fn spawn(port: u16) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = serve(port).await {
            tracing::error!("Keep-alive server stopped: {:?}", e);
        }
    })
}

async fn serve(port: u16) -> eyre::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err("Failed to bind keep-alive address")?;

    tracing::info!("Keep-alive server listening on {}", addr);

    axum::serve(listener, create_router())
        .await
        .wrap_err("Keep-alive server error")
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::{create_router, KEEP_ALIVE_BODY};

    #[tokio::test]
    async fn root_returns_confirmation_text() {
        let resp = create_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], KEEP_ALIVE_BODY.as_bytes());
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let resp = create_router()
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
