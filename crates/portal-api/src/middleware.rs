//! Session middleware for protected routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves `Authorization: Bearer <session id>` against the registry and
/// exposes the session to handlers as `Extension<Arc<Session>>`.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing or malformed session token".to_string()))?;

    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| ApiError::SessionExpired("Session expired or unknown".to_string()))?;

    debug!("Request for session {} (user {})", session_id, session.user().id);
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
