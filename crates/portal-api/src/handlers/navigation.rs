//! Route guard endpoints

use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};

use portal_core::domain::MenuNode;
use portal_core::services::{AccessDecision, Session};

use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct NavigationTarget {
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub decision: AccessDecision,
    pub active_item: Option<MenuNode>,
}

/// GET /api/v1/navigation/check?url=
///
/// Decision only; sidebar state is left alone.
pub async fn check(
    Extension(session): Extension<Arc<Session>>,
    Query(target): Query<NavigationTarget>,
) -> Json<ApiResponse<AccessDecision>> {
    Json(ApiResponse::success(session.access().can_activate(&target.url).await))
}

/// POST /api/v1/navigation
pub async fn navigate(
    Extension(session): Extension<Arc<Session>>,
    Json(target): Json<NavigationTarget>,
) -> Json<ApiResponse<NavigationResponse>> {
    let (decision, active_item) = session.navigate(&target.url).await;
    Json(ApiResponse::success(NavigationResponse { decision, active_item }))
}
