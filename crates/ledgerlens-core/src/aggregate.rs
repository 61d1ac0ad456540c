//! Reducing a set of transactions into totals and a per-category breakdown

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{CoreError, CoreResult};
use super::models::Transaction;
use super::types::TransactionKind;

/// Income and expense accumulated for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl CategoryTotals {
    fn get(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
        }
    }
}

/// Category label → totals, iterated in first-encountered order
///
/// A category is created with zeroed totals the first time a transaction
/// references it; categories never referenced are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, CategoryTotals)>", into = "Vec<(String, CategoryTotals)>")]
pub struct CategoryBreakdown {
    entries: Vec<(String, CategoryTotals)>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, category: &str) -> &mut CategoryTotals {
        let idx = match self.index.get(category) {
            Some(&idx) => idx,
            None => {
                self.entries.push((category.to_string(), CategoryTotals::default()));
                self.index.insert(category.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Add `amount` to the category's income or expense
    pub fn accumulate(
        &mut self,
        category: &str,
        kind: TransactionKind,
        amount: Decimal,
    ) -> CoreResult<()> {
        let totals = self.slot(category);
        let field = match kind {
            TransactionKind::Income => &mut totals.income,
            TransactionKind::Expense => &mut totals.expense,
        };
        *field = field.checked_add(amount).ok_or_else(|| {
            CoreError::amount_overflow(format!("{} total of category '{}'", kind, category))
        })?;
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotals> {
        self.index.get(category).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encountered order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTotals)> {
        self.entries.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl From<Vec<(String, CategoryTotals)>> for CategoryBreakdown {
    fn from(entries: Vec<(String, CategoryTotals)>) -> Self {
        let mut breakdown = CategoryBreakdown::new();
        for (category, totals) in entries {
            let slot = breakdown.slot(&category);
            slot.income = slot.income.saturating_add(totals.income);
            slot.expense = slot.expense.saturating_add(totals.expense);
        }
        breakdown
    }
}

impl From<CategoryBreakdown> for Vec<(String, CategoryTotals)> {
    fn from(breakdown: CategoryBreakdown) -> Self {
        breakdown.entries
    }
}

/// One row of a ranking view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of the kind's total, 0 when that total is 0
    pub share: Decimal,
}

/// Totals for a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    /// income_total - expense_total
    pub balance: Decimal,
    pub category_breakdown: CategoryBreakdown,
    pub transaction_count: usize,
}

impl AggregateResult {
    /// Total for one kind
    pub fn total(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::Income => self.income_total,
            TransactionKind::Expense => self.expense_total,
        }
    }

    /// Categories with a non-zero amount of `kind`, largest first
    ///
    /// Equal amounts keep first-encountered order. Computed on demand.
    pub fn ranking(&self, kind: TransactionKind) -> Vec<CategoryShare> {
        let total = self.total(kind);
        let mut rows: Vec<CategoryShare> = self
            .category_breakdown
            .iter()
            .filter(|(_, totals)| !totals.get(kind).is_zero())
            .map(|(category, totals)| {
                let amount = totals.get(kind);
                CategoryShare {
                    category: category.to_string(),
                    amount,
                    share: percent_of(amount, total),
                }
            })
            .collect();
        // sort_by is stable, so ties stay in breakdown order
        rows.sort_by(|a, b| b.amount.cmp(&a.amount));
        rows
    }

    /// Expense ranking as shown in the category report
    pub fn expense_ranking(&self) -> Vec<CategoryShare> {
        self.ranking(TransactionKind::Expense)
    }

    pub fn income_ranking(&self) -> Vec<CategoryShare> {
        self.ranking(TransactionKind::Income)
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0
///
/// Saturates at `Decimal::MAX`/`Decimal::MIN` when the ratio is out of range.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    checked_percent(part, whole).unwrap_or_else(|| {
        if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `numerator * 100 / denominator`, None on overflow or a zero denominator
///
/// Multiplies first to keep exact results exact, and divides first only when
/// the product does not fit.
pub(crate) fn checked_percent(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(denominator))
        .or_else(|| {
            numerator
                .checked_div(denominator)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
}

/// Reduce transactions into totals and a category breakdown
///
/// Every transaction is validated first; the first invalid one aborts the
/// reduction.
pub fn aggregate<'a, I>(transactions: I) -> CoreResult<AggregateResult>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut result = AggregateResult::default();

    for tx in transactions {
        if let Err(e) = tx.validate() {
            log::warn!("rejecting transaction {}: {}", tx.id, e);
            return Err(e);
        }
        let total = match tx.kind {
            TransactionKind::Income => &mut result.income_total,
            TransactionKind::Expense => &mut result.expense_total,
        };
        *total = total.checked_add(tx.amount).ok_or_else(|| {
            CoreError::amount_overflow(format!("{} total at transaction {}", tx.kind, tx.id))
        })?;
        result.category_breakdown.accumulate(&tx.category, tx.kind, tx.amount)?;
        result.transaction_count += 1;
    }

    // Both totals are non-negative, so this only fails on corrupted input
    result.balance = result
        .income_total
        .checked_sub(result.expense_total)
        .ok_or_else(|| CoreError::amount_overflow("balance"))?;
    Ok(result)
}

// ==================== Tests ====================
