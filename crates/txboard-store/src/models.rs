//! Transaction record as served by the store

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single financial record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Owner of the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// ISO-8601 date or date-time, kept verbatim
    pub date: String,
    /// Transaction type (e.g. "income", "expense")
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    /// ISO 4217 currency code
    pub currency: String,
    pub amount: Decimal,
    /// Optional free-form note
    #[serde(default)]
    pub content: Option<String>,
}

impl Transaction {
    /// First seven characters of the date, i.e. its `YYYY-MM` prefix
    pub fn month_prefix(&self) -> Option<&str> {
        self.date.get(..7)
    }

    /// Note text, `None` when absent or blank
    pub fn note(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn belongs_to(&self, owner: &str) -> bool {
        self.user_id.as_deref() == Some(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_row() {
        let json = r#"{
            "id": "t1",
            "user_id": "u1",
            "date": "2024-03-05T00:00:00+00:00",
            "type": "expense",
            "category": "Food",
            "currency": "JPY",
            "amount": 1200,
            "content": null
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, "expense");
        assert_eq!(tx.amount, Decimal::from(1200));
        assert_eq!(tx.month_prefix(), Some("2024-03"));
        assert!(tx.note().is_none());
        assert!(tx.belongs_to("u1"));
    }

    #[test]
    fn test_rows_with_nulls() {
        let json = r#"[null, {"id":"t2","date":"2024-04-01","type":"income","category":"Salary","currency":"USD","amount":"10.50"}]"#;
        let rows: Vec<Option<Transaction>> = serde_json::from_str(json).unwrap();
        assert!(rows[0].is_none());
        let tx = rows[1].as_ref().unwrap();
        assert_eq!(tx.amount, Decimal::from_str("10.50").unwrap());
        assert!(tx.user_id.is_none());
        assert!(!tx.belongs_to("u1"));
    }

    #[test]
    fn test_short_date_has_no_prefix() {
        let tx = Transaction {
            id: "t".to_string(),
            user_id: None,
            date: "2024".to_string(),
            kind: "expense".to_string(),
            category: "Misc".to_string(),
            currency: "USD".to_string(),
            amount: Decimal::ONE,
            content: Some("   ".to_string()),
        };
        assert!(tx.month_prefix().is_none());
        assert!(tx.note().is_none());
    }
}
