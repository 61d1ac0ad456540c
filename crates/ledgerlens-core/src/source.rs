//! Where transaction snapshots come from
//!
//! Persistence and live updates live outside the engine. A source only has to
//! hand over the full, current set of transactions each time it is asked.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::{CoreError, CoreResult};
use super::models::Transaction;
use super::types::TransactionKind;

/// Provider of the full transaction set
pub trait TransactionSource {
    /// Latest snapshot, newest first
    fn snapshot(&self) -> CoreResult<Vec<Transaction>>;
}

/// Shared source reference
pub type SourceRef = Arc<dyn TransactionSource + Send + Sync>;

/// Transactions held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionSource for InMemorySource {
    fn snapshot(&self) -> CoreResult<Vec<Transaction>> {
        let mut transactions = self.transactions.clone();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }
}

/// JSON array of transaction records on disk, re-read on every snapshot
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for JsonFileSource {
    fn snapshot(&self) -> CoreResult<Vec<Transaction>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| CoreError::SourceError {
            message: format!("{}: {}", self.path.display(), e),
        })?;
        let transactions = parse_transactions(&content)?;
        log::debug!("loaded {} transactions from {}", transactions.len(), self.path.display());
        Ok(transactions)
    }
}

/// Record as stored, before the kind is checked
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    id: String,
    #[serde(alias = "type")]
    kind: String,
    category: String,
    amount: Decimal,
    date: NaiveDate,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = CoreError;

    fn try_from(record: TransactionRecord) -> CoreResult<Self> {
        let kind: TransactionKind = record
            .kind
            .parse()
            .map_err(|reason: String| CoreError::invalid_transaction(&record.id, reason))?;

        let tx = Transaction {
            id: record.id,
            kind,
            category: record.category,
            amount: record.amount,
            date: record.date,
            description: record.description,
        };
        tx.validate()?;
        Ok(tx)
    }
}

/// Parse a JSON array of transaction records, newest first
pub fn parse_transactions(json: &str) -> CoreResult<Vec<Transaction>> {
    let records: Vec<TransactionRecord> = serde_json::from_str(json)
        .map_err(|e| CoreError::SourceError { message: e.to_string() })?;

    let mut transactions = records
        .into_iter()
        .map(Transaction::try_from)
        .collect::<CoreResult<Vec<_>>>()?;
    sort_newest_first(&mut transactions);
    Ok(transactions)
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"[
        {"id": "a", "type": "income", "category": "Salary", "amount": 1000, "date": "2024-01-15"},
        {"id": "b", "type": "expense", "category": "Rent", "amount": "300.50", "date": "2024-02-01", "description": "February"},
        {"id": "c", "kind": "expense", "category": "Food", "amount": "12", "date": "2024-01-20", "description": null}
    ]"#;

    #[test]
    fn test_parse_sorts_newest_first() {
        let txs = parse_transactions(SAMPLE).unwrap();
        let ids: Vec<&str> = txs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(txs[0].amount, dec!(300.50));
        assert_eq!(txs[0].description.as_deref(), Some("February"));
        assert_eq!(txs[2].amount, dec!(1000));
    }

    #[test]
    fn test_unknown_kind_is_invalid_transaction() {
        let json = r#"[{"id": "t", "type": "transfer", "category": "X", "amount": "1", "date": "2024-01-01"}]"#;
        match parse_transactions(json) {
            Err(CoreError::InvalidTransaction { id, .. }) => assert_eq!(id, "t"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_is_invalid_transaction() {
        let json = r#"[{"id": "n", "type": "expense", "category": "X", "amount": "-1", "date": "2024-01-01"}]"#;
        assert!(matches!(parse_transactions(json), Err(CoreError::InvalidTransaction { .. })));
    }

    #[test]
    fn test_malformed_json_is_source_error() {
        assert!(matches!(parse_transactions("{not json"), Err(CoreError::SourceError { .. })));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let source = JsonFileSource::new("/nonexistent/transactions.json");
        assert!(matches!(source.snapshot(), Err(CoreError::SourceError { .. })));
    }

    #[test]
    fn test_in_memory_snapshot() {
        let txs = parse_transactions(SAMPLE).unwrap();
        let mut shuffled = txs.clone();
        shuffled.reverse();
        let source = InMemorySource::new(shuffled);
        assert_eq!(source.snapshot().unwrap(), txs);
    }
}
