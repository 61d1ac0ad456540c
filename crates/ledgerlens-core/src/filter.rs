//! Selecting the transactions that fall inside a period

use super::models::Transaction;
use super::time::{Period, PeriodFilter};

/// Transactions dated inside `period`, in input order
pub fn filter<'a, I>(transactions: I, period: &Period) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.in_period(period))
        .collect()
}
