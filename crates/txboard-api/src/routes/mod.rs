//! Route modules for the API server
//!
//! - dashboard: Monthly transaction list with selection and bulk delete
//! - session: Current user identity
//!
//! The dashboard module follows the usual split:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX actions
//! - page.rs: HTML rendering

pub mod dashboard;
pub mod session;
