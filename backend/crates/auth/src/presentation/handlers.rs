//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use std::sync::Arc;

use kernel::error::app_error::AppResult;

use crate::application::service::AuthService;
use crate::domain::repository::{AppProvider, UserProvider, UserSaver};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::user_id::UserId;
use crate::presentation::dto::{
    IsAdminResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

/// Shared state for auth handlers
///
/// One store `R` backs all three capabilities.
pub struct AuthAppState<R, T>
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    pub service: Arc<AuthService<R, R, R, T>>,
}

// Manual impl: derive would require `R: Clone` and `T: Clone`
impl<R, T> Clone for AuthAppState<R, T>
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R, T>(
    State(state): State<AuthAppState<R, T>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<RegisterResponse>>
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    let Json(req) = payload?;
    req.validate()?;

    let user_id = state.service.register(&req.email, req.password).await?;

    Ok(Json(RegisterResponse {
        user_id: user_id.value(),
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R, T>(
    State(state): State<AuthAppState<R, T>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>>
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    let Json(req) = payload?;
    req.validate()?;

    let app_id = req.app_id();
    let token = state.service.login(&req.email, req.password, app_id).await?;

    Ok(Json(LoginResponse { token }))
}

// ============================================================================
// Is Admin
// ============================================================================

/// GET /users/{user_id}/admin
pub async fn is_admin<R, T>(
    State(state): State<AuthAppState<R, T>>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<IsAdminResponse>>
where
    R: UserSaver + UserProvider + AppProvider + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    let Path(user_id) = path?;
    let is_admin = state.service.is_admin(UserId::new(user_id)).await?;

    Ok(Json(IsAdminResponse { is_admin }))
}
