// ============================================================================
// Portal API - Auth Handlers
// File: crates/portal-api/src/handlers/auth.rs
// ============================================================================
//! Login and logout

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use portal_core::domain::{Credentials, UiPreferences, UserInfo};
use portal_core::services::{MenuSnapshot, Session};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent gateway calls
    pub session_id: Uuid,
    pub user: UserInfo,
    pub menu: MenuSnapshot,
    pub preferences: UiPreferences,
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let session = state.auth.login(&credentials).await?;
    let session = state.sessions.insert(session);

    Ok(Json(ApiResponse::success(LoginResponse {
        session_id: session.id(),
        user: session.user().clone(),
        menu: session.menu().snapshot(),
        preferences: session.ui_preferences(),
    })))
}

/// Logout handler - POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Json<ApiResponse<()>> {
    state.sessions.remove(&session.id());
    state.auth.logout(&session).await;
    info!("{} active sessions", state.sessions.len());
    Json(ApiResponse::success(()))
}
