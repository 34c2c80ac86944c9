use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Extension, Json, Router};
use ghl_insights::dashboard::DashboardPage;
use ghl_insights::error::AppError;
use ghl_insights::metrics::MetricsSnapshot;
use ghl_insights::render::{render_error_page, render_not_found, render_page};
use serde_json::json;
use tracing::warn;

pub(crate) fn dashboard_router() -> Router {
    Router::new()
        .route("/", axum::routing::get(root_redirect))
        .route("/dashboard/:slug", axum::routing::get(dashboard_page_endpoint))
        .route(
            "/api/v1/metrics/snapshot",
            axum::routing::get(snapshot_endpoint),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn root_redirect() -> Redirect {
    Redirect::to("/dashboard/summary")
}

pub(crate) async fn dashboard_page_endpoint(
    Path(slug): Path<String>,
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let Some(page) = DashboardPage::from_slug(&slug) else {
        return (StatusCode::NOT_FOUND, Html(render_not_found(&slug)));
    };

    match state.provider.snapshot() {
        Ok(snapshot) => (
            StatusCode::OK,
            Html(render_page(page, &snapshot, state.filler_seed)),
        ),
        Err(err) => {
            warn!(page = page.slug(), error = %err, "metrics source failed; serving error banner");
            (StatusCode::SERVICE_UNAVAILABLE, Html(render_error_page(&err)))
        }
    }
}

pub(crate) async fn snapshot_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<MetricsSnapshot>, AppError> {
    let snapshot = state.provider.snapshot()?;
    Ok(Json((*snapshot).clone()))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_provider;
    use axum::body::Body;
    use axum::http::Request;
    use axum_prometheus::PrometheusMetricLayer;
    use ghl_insights::config::DashboardConfig;
    use metrics_exporter_prometheus::PrometheusHandle;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, OnceLock};
    use std::time::Duration;
    use tower::util::ServiceExt;

    // The Prometheus recorder is process-global; install it once and share
    // the handle across tests.
    fn prometheus_handle() -> Arc<PrometheusHandle> {
        static HANDLE: OnceLock<Arc<PrometheusHandle>> = OnceLock::new();
        HANDLE
            .get_or_init(|| {
                let (_, handle) = PrometheusMetricLayer::pair();
                Arc::new(handle)
            })
            .clone()
    }

    fn test_state() -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: prometheus_handle(),
            provider: build_provider(&DashboardConfig {
                snapshot_ttl: Duration::from_secs(60),
                filler_seed: Some(11),
            }),
            filler_seed: 11,
        }
    }

    #[tokio::test]
    async fn known_slug_renders_the_page() {
        let response = dashboard_page_endpoint(
            Path("business-questions".to_string()),
            Extension(test_state()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_slug_returns_not_found_shell() {
        let response = dashboard_page_endpoint(Path("settings".to_string()), Extension(test_state()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn snapshot_endpoint_serves_the_model() {
        let Json(snapshot) = snapshot_endpoint(Extension(test_state()))
            .await
            .expect("snapshot loads");
        assert_eq!(snapshot.contacts.total_contacts, 9_599);
        assert_eq!(snapshot.answers.booking_patterns.peak_day, "Wednesday");
    }

    #[tokio::test]
    async fn router_serves_the_summary_end_to_end() {
        let app = dashboard_router().layer(Extension(test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/dashboard/summary")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let html = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(html.contains("9,599"));
        assert!(html.contains("Executive Summary"));
    }

    #[tokio::test]
    async fn root_redirects_to_the_summary() {
        let app = dashboard_router().layer(Extension(test_state()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/dashboard/summary")
        );
    }
}
