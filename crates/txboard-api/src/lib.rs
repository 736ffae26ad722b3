//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Monthly transaction list, selection, bulk delete
//! - routes::session: Current user identity

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txboard_config::Config;
use txboard_core::Dashboard;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{
        api_dashboard, api_delete_selected, htmx_dashboard_list, htmx_delete_selected,
        htmx_reload, htmx_select_all, htmx_set_month, htmx_shift_month, htmx_toggle,
        page_dashboard,
    };
    use routes::session::{api_session, api_set_session};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/dashboard", get(api_dashboard))
        .route("/api/session", get(api_session).post(api_set_session))
        .route("/api/transactions/selected", delete(api_delete_selected))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        // HTMX partial routes
        .route("/dashboard/list", get(htmx_dashboard_list))
        .route("/dashboard/month", post(htmx_set_month))
        .route("/dashboard/month/shift", post(htmx_shift_month))
        .route("/dashboard/selection/all", post(htmx_select_all))
        .route("/dashboard/selection/:id/toggle", post(htmx_toggle))
        .route("/dashboard/delete", post(htmx_delete_selected))
        .route("/dashboard/reload", post(htmx_reload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - txboard</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <div id="toasts" class="fixed bottom-4 right-4 space-y-2 z-50"></div>
    <script>
    htmx.onLoad(function (root) {{
        root.querySelectorAll('input[data-indeterminate]').forEach(function (cb) {{
            cb.indeterminate = true;
        }});
    }});
    document.body.addEventListener('toast', function (e) {{
        var toast = document.createElement('div');
        toast.className = 'bg-white border shadow-lg rounded-lg px-4 py-3 w-80';
        var title = document.createElement('p');
        title.className = 'font-semibold';
        title.textContent = e.detail.title;
        var desc = document.createElement('p');
        desc.className = 'text-sm text-gray-600';
        desc.textContent = e.detail.description;
        toast.appendChild(title);
        toast.appendChild(desc);
        document.getElementById('toasts').appendChild(toast);
        setTimeout(function () {{ toast.remove(); }}, 4000);
    }});
    </script>
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(r#"<main class='max-w-6xl mx-auto'>{}</main>"#, inner_content),
        )
    }
}

/// Parse an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " ")).unwrap_or_default().into_owned();
        let value = urlencoding::decode(&value.replace('+', " ")).unwrap_or_default().into_owned();
        params.insert(key, value);
    }
    params
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process exits.
pub async fn start_server(config: Config, dashboard: Arc<Dashboard>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState { dashboard, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting txboard server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard list)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form() {
        let params = parse_form("month=2024-03&note=a+b%26c&empty=&flag");
        assert_eq!(params.get("month").unwrap(), "2024-03");
        assert_eq!(params.get("note").unwrap(), "a b&c");
        assert_eq!(params.get("empty").unwrap(), "");
        assert_eq!(params.get("flag").unwrap(), "");
        assert!(parse_form("").is_empty());
    }

    #[test]
    fn test_page_response_partial() {
        let mut headers = axum::http::HeaderMap::new();
        let full = page_response(&headers, "Dashboard List", "<p>x</p>");
        assert!(full.starts_with("<!DOCTYPE html>"));

        headers.insert("hx-request", "true".parse().unwrap());
        assert_eq!(page_response(&headers, "Dashboard List", "<p>x</p>"), "<p>x</p>");
    }
}
