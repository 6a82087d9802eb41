//! Axum router — maps URL paths to handlers.

use axum::Router;
use axum::routing::get;

use crate::handlers::{get_author, get_paper, health, oab_find, oab_permissions};
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/papers", get(get_paper))
        .route("/api/authors", get(get_author))
        .route("/api/oab/find", get(oab_find))
        .route("/api/oab/permissions", get(oab_permissions))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // Router smoke tests run against routes that touch no provider; the
    // full pipeline is covered in oapath-core with scripted providers.

    fn test_router() -> Router {
        // Handlers that hit the state are not exercised here
        let settings = {
            std::env::set_var("SHERPA_API_KEY", "test-key");
            std::env::set_var("UNPAYWALL_EMAIL", "test@example.org");
            oapath_core::Settings::default()
        };
        let state = crate::state::AppState::from_settings(&settings).unwrap();
        build_router(std::sync::Arc::new(state))
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = test_router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn papers_route_requires_doi_param() {
        let response = test_router()
            .oneshot(Request::get("/api/papers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
