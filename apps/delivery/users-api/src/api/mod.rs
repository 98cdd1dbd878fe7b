use axum::{Router, routing::get};

pub mod banner;
pub mod health;
pub mod users;

use crate::state::AppState;

/// All API routes; each sub-router already carries its state.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(banner::router())
}

/// `/ready` with real dependency checks, merged after `create_router`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, StorageBackend};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                storage: StorageBackend::Memory,
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: None,
        }
    }

    fn app() -> Router {
        let state = memory_state();
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            axum_helpers::create_router::<crate::openapi::ApiDoc>(routes(&state))
                .unwrap()
                .merge(ready_router(state.clone()))
        })
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_banner_endpoints() {
        let response = app()
            .oneshot(Request::get("/api/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, banner::BANNER.as_bytes());

        let response = app()
            .oneshot(Request::get("/api/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_bytes(response).await, b"Test endpoint works!");
    }

    #[tokio::test]
    async fn test_users_are_mounted_under_users() {
        let app = app();
        let request = Request::post("/users")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "username": "alice", "email": "a@x.com", "password": "secret1" }).to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(Request::get("/users/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let response = app()
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_openapi_documents_user_paths() {
        let response = app()
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(doc["paths"].get("/users").is_some());
        assert!(doc["paths"].get("/users/{id}/activate").is_some());
    }
}
