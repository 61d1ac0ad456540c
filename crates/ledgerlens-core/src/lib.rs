//! Period aggregation and reporting engine
//!
//! Takes an unordered set of income/expense transactions and derives, for a
//! calendar month or year and the window right before it, totals, category
//! breakdowns, percentage changes and a monthly series. Every function here is
//! pure: the same inputs always give the same outputs and nothing is cached.

pub mod aggregate;
pub mod compare;
pub mod error;
pub mod filter;
pub mod models;
pub mod reports;
pub mod series;
pub mod source;
pub mod time;
pub mod types;

use chrono::NaiveDate;

pub use aggregate::{aggregate, AggregateResult, CategoryBreakdown, CategoryShare, CategoryTotals};
pub use compare::{compare, compare_aggregates, ComparisonResult, Metric, PeriodComparison};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorLogger, ErrorSeverity};
pub use filter::filter;
pub use ledgerlens_config::Granularity;
pub use models::Transaction;
pub use reports::{build_report, PeriodReport};
pub use series::{build_monthly_series, TimeSeriesPoint};
pub use source::{InMemorySource, JsonFileSource, SourceRef, TransactionSource};
pub use time::{advance, can_advance, ceil, floor, resolve, retreat, Period, PeriodPair};
pub use types::TransactionKind;

/// Report engine bound to a transaction source
///
/// Holds no state besides the source: each call takes a fresh snapshot and
/// recomputes from scratch.
pub struct ReportEngine {
    source: SourceRef,
}

impl ReportEngine {
    pub fn new(source: SourceRef) -> Self {
        Self { source }
    }

    /// Current transactions, newest first
    pub fn transactions(&self) -> CoreResult<Vec<Transaction>> {
        self.source.snapshot()
    }

    /// Report for the period containing `anchor`
    pub fn report(&self, anchor: NaiveDate, granularity: Granularity) -> CoreResult<PeriodReport> {
        let transactions = self.source.snapshot()?;
        build_report(&transactions, anchor, granularity)
    }

    /// Totals for an explicit period
    pub fn totals(&self, period: &Period) -> CoreResult<AggregateResult> {
        let transactions = self.source.snapshot()?;
        aggregate(filter(&transactions, period))
    }

    /// Month-by-month series for an explicit period
    pub fn monthly_series(&self, period: &Period) -> CoreResult<Vec<TimeSeriesPoint>> {
        let transactions = self.source.snapshot()?;
        build_monthly_series(&transactions, period)
    }
}

// ==================== Tests ====================
