//! Core data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreResult};
use super::types::TransactionKind;

/// A single income or expense record
///
/// Transactions are owned by the persistence layer; the engine only reads
/// them. The amount is a magnitude and is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Income or expense
    #[serde(alias = "type")]
    pub kind: TransactionKind,
    /// Category label, compared by exact string equality
    pub category: String,
    /// Non-negative amount
    pub amount: Decimal,
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Free text, not used by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a transaction without description
    pub fn new(
        id: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category: category.into(),
            amount,
            date,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the amount and category preconditions
    pub fn validate(&self) -> CoreResult<()> {
        if self.amount < Decimal::ZERO {
            return Err(CoreError::invalid_transaction(
                &self.id,
                format!("amount must not be negative, got {}", self.amount),
            ));
        }
        if self.category.is_empty() {
            return Err(CoreError::invalid_transaction(&self.id, "category must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_accepts_zero_and_positive() {
        let tx = Transaction::new("1", TransactionKind::Income, "Salary", dec!(0), date(2024, 1, 1));
        assert!(tx.validate().is_ok());
        let tx = Transaction::new("2", TransactionKind::Expense, "Rent", dec!(1200.50), date(2024, 1, 1));
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let tx = Transaction::new("neg", TransactionKind::Expense, "Food", dec!(-0.01), date(2024, 1, 1));
        match tx.validate() {
            Err(CoreError::InvalidTransaction { id, .. }) => assert_eq!(id, "neg"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let tx = Transaction::new("empty", TransactionKind::Income, "", dec!(10), date(2024, 1, 1));
        assert!(matches!(tx.validate(), Err(CoreError::InvalidTransaction { .. })));
    }

    #[test]
    fn test_deserialize_with_type_alias() {
        let json = r#"{"id":"x","type":"expense","category":"Food","amount":"12.30","date":"2024-03-05"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.amount, dec!(12.30));
        assert_eq!(tx.date, date(2024, 3, 5));
        assert!(tx.description.is_none());
    }
}
