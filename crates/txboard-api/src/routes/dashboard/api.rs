//! Dashboard API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_dashboard: Current list view (JSON)
//! - api_delete_selected: Bulk delete (JSON)
//! - htmx_dashboard_list: List fragment
//! - htmx_set_month / htmx_shift_month: Month change (section fragment)
//! - htmx_toggle / htmx_select_all: Selection changes (list fragment)
//! - htmx_delete_selected: Bulk delete (list fragment + toast trigger)
//! - htmx_reload: Re-fetch (list fragment)

use super::page::{render_list, render_section};
use crate::error::{ApiError, ApiResult};
use crate::{parse_form, AppState};
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use txboard_core::{
    CoreError, DeleteOutcome, ListView, LogNotifier, MonthKey, Notification, RecordingNotifier,
};

/// Current list view (JSON API); `null` when there is no user
pub async fn api_dashboard(state: axum::extract::State<AppState>) -> Json<Option<ListView>> {
    Json(state.dashboard.view().await)
}

/// Delete the selected transactions (JSON API)
pub async fn api_delete_selected(
    state: axum::extract::State<AppState>,
) -> ApiResult<Json<DeleteOutcome>> {
    let outcome = state.dashboard.delete_selected(&LogNotifier).await?;
    Ok(Json(outcome))
}

/// HTMX: List fragment
pub async fn htmx_dashboard_list(state: axum::extract::State<AppState>) -> Html<String> {
    list_fragment(&state).await
}

/// HTMX: Set the month from the month input
pub async fn htmx_set_month(
    state: axum::extract::State<AppState>,
    body: String,
) -> ApiResult<Html<String>> {
    let params = parse_form(&body);
    let raw = params.get("month").ok_or_else(|| ApiError::BadRequest {
        message: "missing 'month'".to_string(),
    })?;
    let month = MonthKey::parse(raw)?;
    log::debug!("Month set to {}", month);

    state.dashboard.set_month(month).await;
    Ok(section_fragment(&state).await)
}

/// HTMX: Move to the previous/next month
pub async fn htmx_shift_month(
    state: axum::extract::State<AppState>,
    body: String,
) -> ApiResult<Html<String>> {
    let params = parse_form(&body);
    let delta: i32 = params
        .get("delta")
        .and_then(|d| d.trim().parse().ok())
        .ok_or_else(|| ApiError::BadRequest {
            message: "'delta' must be an integer".to_string(),
        })?;

    let month = state.dashboard.shift_month(delta).await;
    log::debug!("Month shifted by {} to {}", delta, month);
    Ok(section_fragment(&state).await)
}

/// HTMX: Toggle one row checkbox
pub async fn htmx_toggle(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Html<String> {
    state.dashboard.toggle(&path.0).await;
    list_fragment(&state).await
}

/// HTMX: Header checkbox
pub async fn htmx_select_all(
    state: axum::extract::State<AppState>,
    body: String,
) -> ApiResult<Html<String>> {
    let params = parse_form(&body);
    let checked = match params.get("checked").map(|s| s.trim().to_lowercase()).as_deref() {
        Some("true") | Some("on") | Some("1") => true,
        Some("false") | Some("off") | Some("0") | None => false,
        Some(other) => {
            return Err(ApiError::BadRequest {
                message: format!("invalid 'checked' value: {}", other),
            })
        }
    };

    state.dashboard.set_all(checked).await;
    Ok(list_fragment(&state).await)
}

/// HTMX: Delete the selected transactions.
///
/// A failed delete re-renders the unchanged list; the error is only logged.
pub async fn htmx_delete_selected(state: axum::extract::State<AppState>) -> ApiResult<Response> {
    let notifier = RecordingNotifier::new();
    match state.dashboard.delete_selected(&notifier).await {
        Ok(_) => {}
        Err(CoreError::Delete { .. }) => {}
        Err(other) => return Err(other.into()),
    }

    let mut response = list_fragment(&state).await.into_response();
    if let Some(trigger) = toast_trigger(&notifier.drain()) {
        match HeaderValue::from_str(&trigger) {
            Ok(value) => {
                response.headers_mut().insert("HX-Trigger", value);
            }
            Err(e) => log::warn!("Dropping toast header: {}", e),
        }
    }
    Ok(response)
}

/// HTMX: Re-fetch the list for the current user
pub async fn htmx_reload(state: axum::extract::State<AppState>) -> Html<String> {
    // A failed fetch is recorded on the session and shown in the fragment
    if let Err(e) = state.dashboard.refresh().await {
        log::warn!("Reload failed: {}", e);
    }
    list_fragment(&state).await
}

async fn list_fragment(state: &AppState) -> Html<String> {
    Html(render_list(state.dashboard.view().await.as_ref()))
}

async fn section_fragment(state: &AppState) -> Html<String> {
    Html(render_section(state.dashboard.view().await.as_ref()))
}

/// `HX-Trigger` value raising a `toast` event for the last notification
pub fn toast_trigger(notifications: &[Notification]) -> Option<String> {
    let last = notifications.last()?;
    let json = serde_json::json!({
        "toast": { "title": last.title, "description": last.description }
    });
    Some(ascii_json(&json.to_string()))
}

/// Escape non-ASCII characters as `\uXXXX` so JSON fits in a header value
fn ascii_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, AppState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use tower::ServiceExt;
    use txboard_config::Config;
    use txboard_core::{Dashboard, OwnerId, Session};
    use txboard_store::{MemorySource, Transaction};

    fn tx(id: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: Some("u1".to_string()),
            date: date.to_string(),
            kind: "expense".to_string(),
            category: "Food".to_string(),
            currency: "USD".to_string(),
            amount: Decimal::new(1250, 2),
            content: None,
        }
    }

    async fn app(owner: Option<&str>) -> (Arc<MemorySource>, AppState) {
        let source = Arc::new(MemorySource::new(vec![
            tx("t1", "2024-03-05"),
            tx("t2", "2024-03-31"),
            tx("t3", "2024-04-01"),
        ]));
        let dashboard = Arc::new(Dashboard::new(
            source.clone(),
            Session::new(MonthKey::parse("2024-03").unwrap()),
        ));
        dashboard.set_owner(owner.and_then(OwnerId::new)).await.unwrap();
        let state = AppState { dashboard, config: Config::default() };
        (source, state)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_toast_trigger_is_ascii_json() {
        let trigger = toast_trigger(&[Notification::delete_succeeded()]).unwrap();
        assert!(trigger.is_ascii());
        let parsed: serde_json::Value = serde_json::from_str(&trigger).unwrap();
        assert_eq!(parsed["toast"]["title"], "✅ Success");
        assert!(toast_trigger(&[]).is_none());
    }

    #[tokio::test]
    async fn test_list_fragment_without_user_is_empty() {
        let (source, state) = app(None).await;
        let response = create_router(state)
            .oneshot(Request::get("/dashboard/list").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "");
        assert_eq!(source.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_toggle_and_delete_flow() {
        let (source, state) = app(Some("u1")).await;
        let router = create_router(state.clone());

        let response = router
            .clone()
            .oneshot(form_post("/dashboard/selection/t1/toggle", ""))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Delete (1)"));

        let response = router.clone().oneshot(form_post("/dashboard/delete", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let trigger = response.headers().get("HX-Trigger").unwrap().to_str().unwrap().to_string();
        assert!(trigger.contains("toast"));
        let html = body_text(response).await;
        assert!(!html.contains("selection/t1/toggle"));
        assert!(html.contains("selection/t2/toggle"));

        assert_eq!(source.fetch_calls(), 2);
        assert!(state.dashboard.snapshot().await.selection().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_selection_without_toast() {
        let (source, state) = app(Some("u1")).await;
        source.set_fail_delete(true);
        state.dashboard.toggle("t1").await;

        let response = create_router(state.clone())
            .oneshot(form_post("/dashboard/delete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("HX-Trigger").is_none());
        assert_eq!(state.dashboard.snapshot().await.selected_ids(), vec!["t1"]);
        assert_eq!(source.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_empty_selection_is_rejected() {
        let (source, state) = app(Some("u1")).await;
        let response = create_router(state)
            .oneshot(form_post("/dashboard/delete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(source.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_select_all_and_month_change() {
        let (_source, state) = app(Some("u1")).await;
        let router = create_router(state.clone());

        router.clone().oneshot(form_post("/dashboard/selection/all", "checked=true")).await.unwrap();
        assert_eq!(state.dashboard.snapshot().await.selected_ids(), vec!["t1", "t2"]);

        let response = router.clone().oneshot(form_post("/dashboard/month", "month=2024-04")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("value='2024-04'"));
        assert!(html.contains("selection/t3/toggle"));
        assert!(state.dashboard.snapshot().await.selection().is_empty());

        let response = router.clone().oneshot(form_post("/dashboard/month/shift", "delta=-1")).await.unwrap();
        assert!(body_text(response).await.contains("value='2024-03'"));

        let response = router.oneshot(form_post("/dashboard/month", "month=April")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_month_placeholder() {
        let (_source, state) = app(Some("u1")).await;
        state.dashboard.set_month(MonthKey::parse("2022-01").unwrap()).await;
        let response = create_router(state)
            .oneshot(Request::get("/dashboard/list").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("colspan='7'"));
        assert!(html.contains("No transactions found."));
    }

    #[tokio::test]
    async fn test_api_dashboard_json() {
        let (_source, state) = app(Some("u1")).await;
        let response = create_router(state)
            .oneshot(Request::get("/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["month"], "2024-03");
        assert_eq!(json["body"]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["body"]["rows"][0]["amount"], "$12.50");
        assert_eq!(json["header"], "none");
    }

    #[tokio::test]
    async fn test_api_delete_selected_reports_store_failure() {
        let (source, state) = app(Some("u1")).await;
        state.dashboard.toggle("t2").await;
        source.set_fail_delete(true);
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/transactions/selected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["code"], "DELETE_FAILED");
    }

    #[tokio::test]
    async fn test_shift_past_year_range_keeps_month() {
        let (_source, state) = app(Some("u1")).await;
        let router = create_router(state.clone());

        let response = router.clone().oneshot(form_post("/dashboard/month/shift", "delta=100000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("value='2024-03'"));

        let response = router.oneshot(form_post("/dashboard/month/shift", "delta=-30000")).await.unwrap();
        assert!(body_text(response).await.contains("March 2024"));
        assert_eq!(state.dashboard.month().await.as_str(), "2024-03");
    }

    #[tokio::test]
    async fn test_api_delete_selected_returns_outcome() {
        let (source, state) = app(Some("u1")).await;
        state.dashboard.toggle("t1").await;
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/transactions/selected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["deleted"], serde_json::json!(["t1"]));
        assert_eq!(json["refreshed"], true);
        assert_eq!(source.len(), 2);
    }
}
