//! Dashboard routes - Monthly transaction list
//!
//! Features:
//! - Month selector with previous/next navigation
//! - Row checkboxes and a derived "select all" header checkbox
//! - Bulk delete with a success toast
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_dashboard,
    api_delete_selected,
    htmx_dashboard_list,
    htmx_delete_selected,
    htmx_reload,
    htmx_select_all,
    htmx_set_month,
    htmx_shift_month,
    htmx_toggle,
};

pub use page::{page_dashboard, render_list, render_section};
