//! Report structures composed from the period engine

use chrono::NaiveDate;
use ledgerlens_config::Granularity;
use serde::{Deserialize, Serialize};

use super::aggregate::{aggregate, AggregateResult, CategoryShare};
use super::compare::{compare_aggregates, PeriodComparison};
use super::error::CoreResult;
use super::filter::filter;
use super::models::Transaction;
use super::series::{build_monthly_series, TimeSeriesPoint};
use super::time::{resolve, Period};

/// Everything a monthly or annual report screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub granularity: Granularity,
    pub anchor: NaiveDate,
    pub current_period: Period,
    pub previous_period: Period,
    pub current: AggregateResult,
    pub previous: AggregateResult,
    pub comparison: PeriodComparison,
    /// Expense categories of the current period, largest first
    pub expense_ranking: Vec<CategoryShare>,
    /// Monthly evolution, only for year reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<TimeSeriesPoint>>,
}

/// Build the report for the period containing `anchor`
pub fn build_report(
    transactions: &[Transaction],
    anchor: NaiveDate,
    granularity: Granularity,
) -> CoreResult<PeriodReport> {
    let periods = resolve(anchor, granularity)?;

    let current_subset = filter(transactions, &periods.current);
    let previous_subset = filter(transactions, &periods.previous);
    log::debug!(
        "{} report for {}: {} current, {} previous of {} transactions",
        granularity,
        anchor,
        current_subset.len(),
        previous_subset.len(),
        transactions.len()
    );

    let current = aggregate(current_subset)?;
    let previous = aggregate(previous_subset)?;
    let comparison = compare_aggregates(&current, &previous);
    let expense_ranking = current.expense_ranking();

    let monthly = match granularity {
        Granularity::Year => Some(build_monthly_series(transactions, &periods.current)?),
        Granularity::Month => None,
    };

    Ok(PeriodReport {
        granularity,
        anchor,
        current_period: periods.current,
        previous_period: periods.previous,
        current,
        previous,
        comparison,
        expense_ranking,
        monthly,
    })
}
