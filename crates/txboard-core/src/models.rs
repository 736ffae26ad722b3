//! Identity and view models for the dashboard list

use crate::{HeaderState, MonthKey};
use serde::{Deserialize, Serialize};
use txboard_store::Transaction;

/// Identifier of the current user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    /// Blank ids count as no identity; other ids are kept verbatim
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of table columns, including the checkbox column
pub const COLUMN_COUNT: usize = 7;

/// Column headings after the checkbox column
pub const COLUMN_TITLES: [&str; 6] = ["Date", "Type", "Category", "Currency", "Amount", "Content"];

/// Labels used when building rows
#[derive(Debug, Clone, PartialEq)]
pub struct ViewLabels {
    pub empty_message: String,
    pub no_content: String,
}

impl Default for ViewLabels {
    fn default() -> Self {
        Self {
            empty_message: "No transactions found.".to_string(),
            no_content: "No content".to_string(),
        }
    }
}

impl From<&txboard_config::DisplayConfig> for ViewLabels {
    fn from(display: &txboard_config::DisplayConfig) -> Self {
        Self {
            empty_message: display.empty_message.clone(),
            no_content: display.no_content_label.clone(),
        }
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub id: String,
    pub checked: bool,
    /// UTC date, `yyyy-MM-dd`
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub currency: String,
    /// Currency symbol followed by the amount
    pub amount: String,
    pub content: String,
}

impl RowView {
    pub fn from_transaction(tx: &Transaction, checked: bool, labels: &ViewLabels) -> Self {
        Self {
            id: tx.id.clone(),
            checked,
            date: txboard_utils::format_display_date(&tx.date),
            kind: tx.kind.clone(),
            category: tx.category.clone(),
            currency: tx.currency.clone(),
            amount: format!("{}{}", txboard_utils::currency_symbol(&tx.currency), tx.amount),
            content: tx.note().unwrap_or(&labels.no_content).to_string(),
        }
    }
}

/// Table body: data rows, or one placeholder row spanning every column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListBody {
    Rows { rows: Vec<RowView> },
    Empty { colspan: usize, message: String },
}

impl ListBody {
    pub fn rows(&self) -> &[RowView] {
        match self {
            ListBody::Rows { rows } => rows,
            ListBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListBody::Empty { .. })
    }
}

/// Everything needed to render the list for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub owner_id: String,
    pub month: MonthKey,
    pub month_label: String,
    pub loading: bool,
    /// Last fetch error, if the latest fetch failed
    pub error: Option<String>,
    pub header: HeaderState,
    pub selected_count: usize,
    pub delete_enabled: bool,
    pub body: ListBody,
}

/// Result of a successful bulk delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Ids sent to the source
    pub deleted: Vec<String>,
    /// Whether the follow-up fetch succeeded
    pub refreshed: bool,
}
