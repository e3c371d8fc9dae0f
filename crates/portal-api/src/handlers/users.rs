// ============================================================================
// Portal API - User Management Handlers
// File: crates/portal-api/src/handlers/users.rs
// ============================================================================

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Deserialize;

use portal_core::domain::{NewUser, PhotoUpload, UserQuery, UserRecord, UserUpdate};
use portal_core::services::Session;
use portal_shared::{Page, Pagination};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query string of the listing; kept flat for the URL form
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

impl From<ListUsersParams> for UserQuery {
    fn from(params: ListUsersParams) -> Self {
        let defaults = Pagination::default();
        UserQuery {
            pagination: Pagination {
                page: params.page.unwrap_or(defaults.page),
                per_page: params.per_page.unwrap_or(defaults.per_page),
            },
            search: params.search,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUrlPhoto {
    #[serde(alias = "data_url")]
    pub data_url: String,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ApiResponse<Page<UserRecord>>>, ApiError> {
    let page = state.users.list(session.token(), params.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let user = state.users.get(session.token(), &id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserRecord>>), ApiError> {
    let created = state.users.create(session.token(), &user).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
    Json(changes): Json<UserUpdate>,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let updated = state.users.update(session.token(), &id, &changes).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.users.delete(session.token(), &id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// POST /api/v1/users/{id}/photo
///
/// Accepts either a JSON body `{ "dataUrl": "data:image/...;base64,..." }`
/// from the webcam capture, or the raw image bytes with an image
/// `Content-Type`.
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<UserRecord>>, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest("Content-Type is required".to_string()))?;

    let updated = if content_type == "application/json" {
        let photo: DataUrlPhoto =
            serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(format!("Invalid photo body: {}", e)))?;
        state
            .users
            .upload_photo_data_url(session.token(), &id, &photo.data_url)
            .await?
    } else {
        let photo = PhotoUpload::new(format!("user-{}", id), content_type, body.to_vec())?;
        state.users.upload_photo(session.token(), &id, &photo).await?
    };

    Ok(Json(ApiResponse::success(updated)))
}
