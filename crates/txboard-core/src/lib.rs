//! Core logic for the monthly transaction board
//!
//! - filter: month filter over source rows
//! - selection: selection set and derived header checkbox state
//! - session: state machine for one list (owner, month, rows, selection)
//! - dashboard: async service tying a session to a transaction source
//! - notify: success/error reporting

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod month;
pub mod notify;
pub mod selection;
pub mod session;

pub use dashboard::Dashboard;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorContext, ErrorSeverity};
pub use filter::filter_by_month;
pub use models::{
    DeleteOutcome, ListBody, ListView, OwnerId, RowView, ViewLabels, COLUMN_COUNT, COLUMN_TITLES,
};
pub use month::MonthKey;
pub use notify::{LogNotifier, Notification, Notifier, RecordingNotifier};
pub use selection::{HeaderState, SelectionSet};
pub use session::{FetchApplied, FetchTicket, Session};

use txboard_config::Config;

/// Build the initial session from configuration
pub fn session_from_config(config: &Config) -> CoreResult<Session> {
    let month = match config.session.default_month.as_deref() {
        Some(month) => MonthKey::parse(month).map_err(|e| CoreError::ConfigError {
            message: format!("session.default_month: {}", e),
        })?,
        None => MonthKey::current(),
    };
    Ok(Session::new(month).with_labels(ViewLabels::from(&config.display)))
}

/// Initial owner from configuration, if any
pub fn owner_from_config(config: &Config) -> Option<OwnerId> {
    config.session.owner_id.clone().and_then(OwnerId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_config() {
        let mut config = Config::default();
        config.session.default_month = Some("2024-03".to_string());
        config.display.empty_message = "Nothing here".to_string();

        let mut session = session_from_config(&config).unwrap();
        assert_eq!(session.month().as_str(), "2024-03");
        assert!(session.owner().is_none());

        session.set_owner(OwnerId::new("u1"));
        match session.view().unwrap().body {
            ListBody::Empty { message, colspan } => {
                assert_eq!(message, "Nothing here");
                assert_eq!(colspan, COLUMN_COUNT);
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn test_owner_from_config() {
        let mut config = Config::default();
        assert!(owner_from_config(&config).is_none());
        config.session.owner_id = Some("".to_string());
        assert!(owner_from_config(&config).is_none());
        config.session.owner_id = Some("u1".to_string());
        assert_eq!(owner_from_config(&config).unwrap().as_str(), "u1");
    }

    #[test]
    fn test_bad_default_month_is_config_error() {
        let mut config = Config::default();
        config.session.default_month = Some("2024-13".to_string());
        let err = session_from_config(&config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
        assert!(err.to_string().contains("session.default_month"));
    }

    #[test]
    fn test_default_month_is_current() {
        let session = session_from_config(&Config::default()).unwrap();
        assert_eq!(session.month(), &MonthKey::current());
    }
}
