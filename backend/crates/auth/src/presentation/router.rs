//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::service::AuthService;
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router over a service whose three store capabilities
/// share one backend
pub fn auth_router<R, T>(service: Arc<AuthService<R, R, R, T>>) -> Router
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    let state = AuthAppState { service };

    Router::new()
        .route("/register", post(handlers::register::<R, T>))
        .route("/login", post(handlers::login::<R, T>))
        .route("/users/{user_id}/admin", get(handlers::is_admin::<R, T>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::app::App;
    use crate::domain::value_object::{
        app_id::AppId, app_secret::AppSecret, user_id::UserId,
    };
    use crate::infra::{InMemoryCredentialStore, JwtTokenIssuer};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    fn setup() -> (Router, Arc<InMemoryCredentialStore>) {
        let store = Arc::new(
            InMemoryCredentialStore::new()
                .with_app(App::new(AppId::new(7), "billing", AppSecret::new("billing-key"))),
        );
        let service = AuthService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::new(JwtTokenIssuer::new()),
            AuthConfig::development(),
        )
        .unwrap();

        (auth_router(Arc::new(service)), store)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (app, _) = setup();

        let response = app
            .clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["userId"], 1);

        let response = app
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!", "appId": 7}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["token"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_register_conflict() {
        let (app, _) = setup();
        let body = serde_json::json!({"email": "alice@example.com", "password": "S3cret!"});

        let first = app.clone().oneshot(post_json("/register", body.clone())).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(post_json("/register", body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (app, _) = setup();

        app.clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "alice@example.com", "password": "nope", "appId": 7}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["detail"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_login_missing_app_id_bad_request() {
        let (app, _) = setup();

        let response = app
            .oneshot(post_json(
                "/login",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_bad_request() {
        let (app, _) = setup();

        let request = Request::builder()
            .method("POST")
            .uri("/register")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_is_admin_route() {
        let (app, store) = setup();

        app.clone()
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!"}),
            ))
            .await
            .unwrap();
        store.set_admin(UserId::new(1), true).unwrap();

        let request = Request::builder()
            .uri("/users/1/admin")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["isAdmin"], true);

        let request = Request::builder()
            .uri("/users/42/admin")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_is_problem_details() {
        let (app, _store) = setup();

        let request = Request::builder()
            .uri("/users/abc/admin")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Bad Request");
    }

    #[tokio::test]
    async fn test_backend_failure_hides_detail() {
        let (app, store) = setup();
        store.set_unavailable(true);

        let response = app
            .oneshot(post_json(
                "/register",
                serde_json::json!({"email": "alice@example.com", "password": "S3cret!"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["detail"], "Internal error");
        assert!(!body.to_string().contains("unavailable"));
    }
}
