//! Dashboard page rendering
//!
//! Endpoints:
//! - page_dashboard: Full page (or partial for HTMX requests)
//!
//! Helper functions:
//! - render_section: Title, month selector and list
//! - render_list: Delete button and transaction table
//!
//! Both renderers return an empty string when there is no current user.

use crate::AppState;
use txboard_core::{HeaderState, ListBody, ListView, RowView, COLUMN_TITLES};
use txboard_utils::escape_html;

const SECTION_ID: &str = "dashboard-section";
const LIST_ID: &str = "dashboard-list";

/// Dashboard page - Title, month selector and transaction list
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let view = state.dashboard.view().await;
    let inner_content = render_section(view.as_ref());
    axum::response::Html(crate::page_response(&headers, "Dashboard List", &inner_content))
}

/// Title, month selector and list; swapped whole when the month changes
pub fn render_section(view: Option<&ListView>) -> String {
    let Some(view) = view else {
        return String::new();
    };

    format!(
        r#"<section id='{}' class='sm:p-10 p-7'>
    <h2 class='text-2xl font-bold'>Dashboard List</h2>
    {}
    {}
</section>"#,
        SECTION_ID,
        render_month_selector(view),
        render_list(Some(view))
    )
}

fn render_month_selector(view: &ListView) -> String {
    let month = escape_html(view.month.as_str());
    let button = |delta: i32, label: &str, title: &str| {
        format!(
            r#"<button hx-post='/dashboard/month/shift' hx-vals='{{"delta": "{}"}}' hx-target='#{}' hx-swap='outerHTML'
            class='px-3 py-1 rounded-lg border hover:bg-gray-100' title='{}'>{}</button>"#,
            delta, SECTION_ID, title, label
        )
    };

    format!(
        r#"<div class='flex items-center gap-2 mt-4'>
        {}
        <input type='month' name='month' value='{}' hx-post='/dashboard/month' hx-trigger='change'
            hx-target='#{}' hx-swap='outerHTML' class='px-3 py-1 border rounded-lg'>
        {}
        <span class='text-gray-500 text-sm'>{}</span>
    </div>"#,
        button(-1, "&lsaquo;", "Previous month"),
        month,
        SECTION_ID,
        button(1, "&rsaquo;", "Next month"),
        escape_html(&view.month_label)
    )
}

/// Delete button and table; swapped on every selection change
pub fn render_list(view: Option<&ListView>) -> String {
    let Some(view) = view else {
        return String::new();
    };

    let mut html = format!(r#"<div id='{}' class='mt-5'>"#, LIST_ID);

    html.push_str(&format!(
        r#"<div class='flex justify-end gap-2 mb-4'>
        <button hx-post='/dashboard/reload' hx-target='#{id}' hx-swap='outerHTML'
            class='px-4 py-2 bg-gray-100 text-gray-700 rounded hover:bg-gray-200'>Reload</button>
        <button hx-post='/dashboard/delete' hx-target='#{id}' hx-swap='outerHTML'{disabled}
            class='flex items-center bg-red-500 hover:opacity-70 text-white font-bold py-2 px-4 rounded disabled:opacity-50'>
            <span class='mr-2'>🗑</span>Delete{count}
        </button>
    </div>"#,
        id = LIST_ID,
        disabled = if view.delete_enabled { "" } else { " disabled" },
        count = if view.selected_count > 0 {
            format!(" ({})", view.selected_count)
        } else {
            String::new()
        },
    ));

    if let Some(ref error) = view.error {
        html.push_str(&format!(
            "<div class='mb-4 p-3 rounded bg-red-50 text-red-700 text-sm'>Failed to load transactions: {}</div>",
            escape_html(error)
        ));
    }

    if view.loading {
        html.push_str("<div class='py-12 text-center text-gray-500'>Loading...</div></div>");
        return html;
    }

    html.push_str("<div class='overflow-x-auto'><table class='min-w-full bg-white rounded-xl shadow-sm text-left'>");
    html.push_str(&render_header(view.header));
    html.push_str("<tbody>");
    match &view.body {
        ListBody::Rows { rows } => {
            for row in rows {
                html.push_str(&render_row(row));
            }
        }
        ListBody::Empty { colspan, message } => {
            html.push_str(&format!(
                "<tr><td colspan='{}' class='px-4 py-6 text-center text-gray-500'>{}</td></tr>",
                colspan,
                escape_html(message)
            ));
        }
    }
    html.push_str("</tbody></table></div></div>");
    html
}

fn render_header(state: HeaderState) -> String {
    // Clicking a fully checked box clears; any other state selects all
    let next = !state.is_checked();
    let mut html = format!(
        r#"<thead><tr class='border-b'><th class='w-10 px-4 py-2'><input type='checkbox' aria-label='Select all'{}{}
        hx-post='/dashboard/selection/all' hx-vals='{{"checked": "{}"}}' hx-target='#{}' hx-swap='outerHTML'></th>"#,
        if state.is_checked() { " checked" } else { "" },
        if state.is_indeterminate() { " data-indeterminate" } else { "" },
        next,
        LIST_ID
    );
    for title in COLUMN_TITLES {
        html.push_str(&format!("<th class='px-4 py-2'>{}</th>", title));
    }
    html.push_str("</tr></thead>");
    html
}

fn render_row(row: &RowView) -> String {
    format!(
        r#"<tr class='border-b hover:bg-gray-50'>
        <td class='w-10 px-4 py-2'><input type='checkbox'{} hx-post='/dashboard/selection/{}/toggle' hx-target='#{}' hx-swap='outerHTML'></td>
        <td class='px-4 py-2 sm:text-sm text-xs'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
        <td class='px-4 py-2'>{}</td>
    </tr>"#,
        if row.checked { " checked" } else { "" },
        escape_html(&urlencoding::encode(&row.id)),
        LIST_ID,
        escape_html(&row.date),
        escape_html(&row.kind),
        escape_html(&row.category),
        escape_html(&row.currency),
        escape_html(&row.amount),
        escape_html(&row.content)
    )
}
