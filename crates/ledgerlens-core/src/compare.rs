//! Period-over-period change

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{checked_percent, AggregateResult};

/// A value next to its prior-period counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub current_value: Decimal,
    pub previous_value: Decimal,
    /// Positive when the current value exceeds the previous one.
    /// Always 0 when the previous value is 0.
    pub percent_change: Decimal,
}

impl ComparisonResult {
    /// `current - previous`, saturating at the representable range
    pub fn difference(&self) -> Decimal {
        self.current_value.saturating_sub(self.previous_value)
    }

    /// Whether there was a prior value to compare against
    pub fn has_baseline(&self) -> bool {
        !self.previous_value.is_zero()
    }
}

/// Percentage change from `previous` to `current`
///
/// A zero `previous` yields 0 instead of an undefined ratio, so "no prior
/// data" reads the same as "no change". The denominator is taken in absolute
/// value so a rise from a negative balance is still reported as positive.
/// A change too large to represent saturates at `Decimal::MAX` or
/// `Decimal::MIN` in the direction of the change.
pub fn compare(current: Decimal, previous: Decimal) -> ComparisonResult {
    let percent_change = if previous.is_zero() {
        Decimal::ZERO
    } else {
        current
            .checked_sub(previous)
            .and_then(|delta| checked_percent(delta, previous.abs()))
            .unwrap_or(if current > previous { Decimal::MAX } else { Decimal::MIN })
    };

    ComparisonResult {
        current_value: current,
        previous_value: previous,
        percent_change,
    }
}

/// Which total a comparison refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Income,
    Expense,
    Balance,
}

impl Metric {
    /// Whether a change in this direction is good news for the user
    ///
    /// Growing income or balance is favorable, growing expense is not. A zero
    /// change counts as favorable.
    pub fn is_favorable(&self, percent_change: Decimal) -> bool {
        match self {
            Metric::Income | Metric::Balance => percent_change >= Decimal::ZERO,
            Metric::Expense => percent_change <= Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Income => write!(f, "income"),
            Metric::Expense => write!(f, "expense"),
            Metric::Balance => write!(f, "balance"),
        }
    }
}

/// Income, expense and balance compared between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub income: ComparisonResult,
    pub expense: ComparisonResult,
    pub balance: ComparisonResult,
}

impl PeriodComparison {
    pub fn get(&self, metric: Metric) -> &ComparisonResult {
        match metric {
            Metric::Income => &self.income,
            Metric::Expense => &self.expense,
            Metric::Balance => &self.balance,
        }
    }
}

/// Compare each total of `current` with the same total of `previous`
pub fn compare_aggregates(current: &AggregateResult, previous: &AggregateResult) -> PeriodComparison {
    PeriodComparison {
        income: compare(current.income_total, previous.income_total),
        expense: compare(current.expense_total, previous.expense_total),
        balance: compare(current.balance, previous.balance),
    }
}
