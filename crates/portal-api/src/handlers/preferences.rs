//! Preferences bundle synchronization

use std::sync::Arc;

use axum::{Extension, Json};

use portal_core::domain::{UiPreferences, UserPreferences};
use portal_core::services::Session;

use crate::error::ApiError;
use crate::response::ApiResponse;

/// GET /api/v1/preferences
pub async fn get_preferences(Extension(session): Extension<Arc<Session>>) -> Json<ApiResponse<UserPreferences>> {
    Json(ApiResponse::success(session.preferences()))
}

/// PUT /api/v1/preferences
///
/// Applies UI settings and pushes the whole bundle to the backend.
pub async fn save_preferences(
    Extension(session): Extension<Arc<Session>>,
    Json(ui): Json<UiPreferences>,
) -> Result<Json<ApiResponse<UserPreferences>>, ApiError> {
    session.update_ui(ui);
    let saved = session.save_preferences().await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// POST /api/v1/preferences/refresh
pub async fn refresh_preferences(
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<ApiResponse<UserPreferences>>, ApiError> {
    let refreshed = session.refresh_preferences().await?;
    Ok(Json(ApiResponse::success(refreshed)))
}
