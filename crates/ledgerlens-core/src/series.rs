//! Month-by-month series over a period

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::aggregate;
use super::error::CoreResult;
use super::filter::filter;
use super::models::Transaction;
use super::time::Period;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Zero-based month index (0 = January)
    pub month: u32,
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

/// One point per calendar month intersecting `period`, oldest first
///
/// A full calendar year always yields twelve points, with empty months
/// reported as zeros.
pub fn build_monthly_series(
    transactions: &[Transaction],
    period: &Period,
) -> CoreResult<Vec<TimeSeriesPoint>> {
    period
        .months()
        .into_iter()
        .map(|month| {
            let totals = aggregate(filter(transactions, &month))?;
            Ok(TimeSeriesPoint {
                month: month.start().month0(),
                year: month.start().year(),
                start: month.start(),
                end: month.end(),
                income: totals.income_total,
                expense: totals.expense_total,
                balance: totals.balance,
                transaction_count: totals.transaction_count,
            })
        })
        .collect()
}
