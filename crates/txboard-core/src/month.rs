//! Month keys used to scope the transaction list

use crate::{CoreError, CoreResult};
use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A validated `YYYY-MM` month, years 0000 through 9999
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    key: String,
    first: NaiveDate,
}

/// Largest year a four-digit key can hold
const MAX_YEAR: i32 = 9999;

impl MonthKey {
    /// Parse a `YYYY-MM` string
    pub fn parse(value: &str) -> CoreResult<Self> {
        let value = value.trim();
        let invalid = || CoreError::InvalidMonth {
            value: value.to_string(),
        };
        if !txboard_utils::is_month_key(value) {
            return Err(invalid());
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
            .map_err(|_| invalid())?;
        Self::from_date(first)
    }

    /// The current month in UTC
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive()).unwrap_or_else(|_| Self::epoch())
    }

    /// Month containing `date`; years outside 0000..=9999 are rejected
    pub fn from_date(date: NaiveDate) -> CoreResult<Self> {
        if !(0..=MAX_YEAR).contains(&date.year()) {
            return Err(CoreError::InvalidMonth {
                value: date.format("%Y-%m").to_string(),
            });
        }
        let first = date.with_day(1).unwrap_or(date);
        Ok(Self {
            key: format!("{:04}-{:02}", first.year(), first.month()),
            first,
        })
    }

    fn epoch() -> Self {
        Self {
            key: "1970-01".to_string(),
            first: NaiveDate::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Move by `delta` months (negative goes back). A move past year 0000
    /// or 9999 leaves the month unchanged.
    pub fn shift(&self, delta: i32) -> Self {
        let moved = if delta >= 0 {
            self.first.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        moved
            .and_then(|date| Self::from_date(date).ok())
            .unwrap_or_else(|| self.clone())
    }

    pub fn previous(&self) -> Self {
        self.shift(-1)
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    /// Human-readable label, e.g. "March 2024"
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl Default for MonthKey {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(MonthKey::parse("2024-03").unwrap().as_str(), "2024-03");
        assert_eq!(MonthKey::parse(" 2024-03 ").unwrap().as_str(), "2024-03");
        assert!(matches!(
            MonthKey::parse("2024-3"),
            Err(CoreError::InvalidMonth { .. })
        ));
        assert!("March".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_shift_across_years() {
        let jan = MonthKey::parse("2024-01").unwrap();
        assert_eq!(jan.previous().as_str(), "2023-12");
        assert_eq!(jan.next().as_str(), "2024-02");
        assert_eq!(jan.shift(12).as_str(), "2025-01");
        assert_eq!(jan.shift(-13).as_str(), "2022-12");
        assert_eq!(jan.shift(0), jan);
    }

    #[test]
    fn test_shift_stays_within_four_digit_years() {
        let month = MonthKey::parse("2024-03").unwrap();

        let far = month.shift(100_000);
        assert_eq!(far, month);
        assert!(txboard_utils::is_month_key(far.as_str()));

        let early = month.shift(-30_000);
        assert_eq!(early, month);
        assert_eq!(early.label(), "March 2024");

        let last = MonthKey::parse("9999-12").unwrap();
        assert_eq!(last.next(), last);
        assert_eq!(last.previous().as_str(), "9999-11");
        let first = MonthKey::parse("0000-01").unwrap();
        assert_eq!(first.previous(), first);
        assert_eq!(first.next().as_str(), "0000-02");
        assert_eq!(month.shift(i32::MIN), month);
        assert_eq!(month.shift(i32::MAX), month);
    }

    #[test]
    fn test_from_date_rejects_wide_years() {
        let wide = NaiveDate::from_ymd_opt(10357, 7, 1).unwrap();
        assert!(matches!(
            MonthKey::from_date(wide),
            Err(CoreError::InvalidMonth { .. })
        ));
        let mid = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let month = MonthKey::from_date(mid).unwrap();
        assert_eq!(month.as_str(), "2024-03");
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        assert!(MonthKey::parse("٢٠٢٤-03").is_err());
    }

    #[test]
    fn test_label_and_first_day() {
        let month = MonthKey::parse("2024-03").unwrap();
        assert_eq!(month.label(), "March 2024");
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let month: MonthKey = serde_json::from_str("\"2024-11\"").unwrap();
        assert_eq!(month.as_str(), "2024-11");
        assert!(serde_json::from_str::<MonthKey>("\"2024-99\"").is_err());
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-11\"");
    }

    #[test]
    fn test_current_is_valid() {
        let month = MonthKey::current();
        assert!(txboard_utils::is_month_key(month.as_str()));
    }
}
