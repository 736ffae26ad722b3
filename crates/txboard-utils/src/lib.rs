//! Utility functions and helpers

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Check whether a string is a `YYYY-MM` month key
pub fn is_month_key(s: &str) -> bool {
    static MONTH_KEY: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let month_regex = MONTH_KEY.get_or_init(|| regex::Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])$").unwrap());
    month_regex.is_match(s)
}

/// Escape text for embedding in HTML element content or quoted attributes
pub fn escape_html(content: &str) -> String {
    html_escape::encode_safe(content).into_owned()
}

/// Look up the display symbol for an ISO 4217 currency code.
///
/// Unknown codes yield an empty string so the amount is shown bare.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.trim().to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "JPY" => "¥",
        "CNY" => "¥",
        "GBP" => "£",
        "KRW" => "₩",
        "INR" => "₹",
        "AUD" => "A$",
        "CAD" => "C$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "SGD" => "S$",
        "CHF" => "CHF",
        "SEK" => "kr",
        "NOK" => "kr",
        "DKK" => "kr",
        "RUB" => "₽",
        "BRL" => "R$",
        "MXN" => "MX$",
        "THB" => "฿",
        "PHP" => "₱",
        "VND" => "₫",
        "TRY" => "₺",
        "PLN" => "zł",
        "ILS" => "₪",
        _ => "",
    }
}

/// Normalize an ISO-8601 date or date-time to UTC and format it as `yyyy-MM-dd`.
///
/// Date-only and offset-less values are taken as UTC. Unparseable input is
/// returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    // Postgres timestamptz text form, e.g. "2024-03-05 10:00:00+09"
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }

    raw.to_string()
}
