// ============================================================================
// Portal API - Menu Handlers
// File: crates/portal-api/src/handlers/menu.rs
// ============================================================================
//! Menu tree views and sidebar state mutations

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use portal_core::domain::MenuNode;
use portal_core::services::{LoadOutcome, MenuSnapshot, Session};
use portal_core::DomainError;

use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub route: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveItemRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub outcome: LoadOutcome,
    pub menu: MenuSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub id: String,
    pub expanded: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedResponse {
    pub expanded_items: BTreeSet<String>,
}

/// GET /api/v1/menu
///
/// Loads the tree first when the cache window has lapsed.
pub async fn get_menu(Extension(session): Extension<Arc<Session>>) -> Json<ApiResponse<MenuSnapshot>> {
    session.menu().ensure_menus_loaded().await;
    Json(ApiResponse::success(session.menu().snapshot()))
}

/// POST /api/v1/menu/reload
pub async fn reload(Extension(session): Extension<Arc<Session>>) -> Json<ApiResponse<ReloadResponse>> {
    let outcome = session.menu().load_user_menus().await;
    Json(ApiResponse::success(ReloadResponse {
        outcome,
        menu: session.menu().snapshot(),
    }))
}

/// GET /api/v1/menu/lookup?route=
pub async fn lookup(
    Extension(session): Extension<Arc<Session>>,
    Query(params): Query<LookupParams>,
) -> Result<Json<ApiResponse<MenuNode>>, ApiError> {
    session.menu().ensure_menus_loaded().await;
    let node = session
        .menu()
        .find_item_by_route(&params.route)
        .ok_or_else(|| ApiError::NotFound(format!("No menu item for route {}", params.route)))?;
    Ok(Json(ApiResponse::success(node)))
}

/// POST /api/v1/menu/items/{id}/toggle
pub async fn toggle(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ToggleResponse>>, ApiError> {
    if session.menu().find_item_by_id(&id).is_none() {
        return Err(DomainError::MenuItemNotFound(id).into());
    }
    let expanded = session.menu().toggle_expanded(&id);
    Ok(Json(ApiResponse::success(ToggleResponse { id, expanded })))
}

/// POST /api/v1/menu/items/{id}/expand-parents
pub async fn expand_parents(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ExpandedResponse>>, ApiError> {
    if !session.menu().expand_parents_of_item(&id) {
        return Err(DomainError::MenuItemNotFound(id).into());
    }
    Ok(Json(ApiResponse::success(ExpandedResponse {
        expanded_items: session.menu().expanded_items(),
    })))
}

/// PUT /api/v1/menu/active
pub async fn set_active(
    Extension(session): Extension<Arc<Session>>,
    Json(request): Json<ActiveItemRequest>,
) -> Result<Json<ApiResponse<MenuSnapshot>>, ApiError> {
    session.menu().set_active_item(&request.id)?;
    Ok(Json(ApiResponse::success(session.menu().snapshot())))
}

/// PUT /api/v1/menu/search
pub async fn set_search(
    Extension(session): Extension<Arc<Session>>,
    Json(request): Json<SearchRequest>,
) -> Json<ApiResponse<MenuSnapshot>> {
    session.menu().set_search_query(&request.query);
    Json(ApiResponse::success(session.menu().snapshot()))
}

/// DELETE /api/v1/menu/search
pub async fn clear_search(Extension(session): Extension<Arc<Session>>) -> Json<ApiResponse<MenuSnapshot>> {
    session.menu().clear_search();
    Json(ApiResponse::success(session.menu().snapshot()))
}
