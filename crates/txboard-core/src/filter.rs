//! Month filter over the rows returned by a transaction source

use crate::MonthKey;
use txboard_store::Transaction;

/// Select the rows dated within `month`.
///
/// A row matches when the first seven characters of its `date` equal the
/// month key. Null rows are skipped and source order is preserved.
pub fn filter_by_month<'a, I>(rows: I, month: &MonthKey) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Option<Transaction>>,
{
    rows.into_iter()
        .flatten()
        .filter(|tx| in_month(tx, month))
        .collect()
}

pub fn in_month(tx: &Transaction, month: &MonthKey) -> bool {
    tx.month_prefix() == Some(month.as_str())
}
