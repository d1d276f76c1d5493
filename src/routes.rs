use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Form, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::engine::AnalysisEngine;
use crate::types::AnalyzeForm;

const PAGE_TEMPLATE: &str = include_str!("../templates/index.html");
const RESULT_PLACEHOLDER: &str = "%RESULT%";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
    pub metrics: PrometheusHandle,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(analyze))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render_page(fragment: &str) -> String {
    PAGE_TEMPLATE.replace(RESULT_PLACEHOLDER, fragment)
}

async fn index() -> Html<String> {
    Html(render_page(""))
}

async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Html<String> {
    let start = Instant::now();
    metrics::counter!("requests_total").increment(1);

    let request_id = Uuid::new_v4();
    info!("Handling analyze request {}", request_id);

    let fragment = state.engine.analyze(&form.email_content);

    let latency = start.elapsed().as_millis() as f64;
    metrics::histogram!("request_duration_ms").record(latency);

    Html(render_page(&fragment))
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use crate::classifier::{ClassifierArtifact, LinearClassifier};
    use crate::features::full_schema_digest;
    use crate::vectorizer::{TfidfVectorizer, VectorizerArtifact};

    fn test_state() -> AppState {
        let vocabulary = vec!["account".to_string(), "verify".to_string()];
        let vectorizer = TfidfVectorizer::from_artifact(VectorizerArtifact {
            version: "test".to_string(),
            vocabulary: vocabulary.clone(),
            idf: vec![1.0, 1.0],
        })
        .unwrap();
        let classifier = LinearClassifier::from_artifact(ClassifierArtifact {
            version: "test".to_string(),
            weights: vec![0.2; vocabulary.len() + crate::lexical::LEXICAL_FEATURE_COUNT],
            intercept: -1.0,
            feature_digest: full_schema_digest(&vocabulary),
        })
        .unwrap();
        let engine =
            AnalysisEngine::from_parts(Box::new(vectorizer), Box::new(classifier)).unwrap();
        AppState {
            engine: Arc::new(engine),
            metrics: PrometheusBuilder::new().build_recorder().handle(),
        }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_empty_form() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("email_content"));
        assert!(!body.contains(RESULT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_analyze_renders_result_into_page() {
        let app = router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email_content=Urgent%20verify%20your%20account"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("<h3>Prediction: "));
        assert!(body.contains("<mark>Urgent</mark>"));
    }

    #[tokio::test]
    async fn test_missing_form_field_defaults_to_empty() {
        let app = router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("<h3>Prediction: "));
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("healthy"));
    }
}
