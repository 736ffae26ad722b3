//! Session routes - Current user identity
//!
//! Endpoints:
//! - api_session: Current user and month (JSON)
//! - api_set_session: Sign in / sign out (JSON)

use crate::error::ApiResult;
use crate::AppState;
use axum::Json;
use serde::{Deserialize, Serialize};
use txboard_core::{CoreError, ListView, OwnerId};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub owner_id: Option<String>,
    pub month: String,
}

#[derive(Debug, Deserialize)]
pub struct SetSessionRequest {
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Current user and month
pub async fn api_session(state: axum::extract::State<AppState>) -> Json<SessionInfo> {
    let owner = state.dashboard.owner().await;
    let month = state.dashboard.month().await;
    Json(SessionInfo {
        owner_id: owner.map(|o| o.as_str().to_string()),
        month: month.to_string(),
    })
}

/// Change the current user; a blank or missing id signs out.
///
/// Returns the resulting list view, which carries the fetch error if
/// the initial load failed.
pub async fn api_set_session(
    state: axum::extract::State<AppState>,
    Json(request): Json<SetSessionRequest>,
) -> ApiResult<Json<Option<ListView>>> {
    let owner = request.owner_id.and_then(OwnerId::new);
    log::info!(
        "Session user set to {}",
        owner.as_ref().map(|o| o.as_str()).unwrap_or("<none>")
    );

    match state.dashboard.set_owner(owner).await {
        Ok(()) | Err(CoreError::Fetch { .. }) => {}
        Err(other) => return Err(other.into()),
    }
    Ok(Json(state.dashboard.view().await))
}
