use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::store::Entity;

/// Category assigned to every transaction until someone overwrites it.
pub const UNCATEGORISED: &str = "uncategorised";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Content fingerprint, fixed at ingestion. Never recomputed, even when
    /// `category` changes.
    pub id: String,
    pub effective_date: NaiveDate,
    pub entered_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub balance: Decimal,
    pub category: String,
}

/// A parsed statement row that has not been persisted yet: no identity, no
/// category.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub effective_date: NaiveDate,
    pub entered_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub balance: Decimal,
}

impl Transaction {
    /// Seal a draft: assign the content fingerprint and the default category.
    pub fn from_draft(draft: Draft) -> Self {
        let id = fingerprint(
            draft.effective_date,
            draft.amount,
            draft.balance,
            &draft.description,
        );
        Self {
            id,
            effective_date: draft.effective_date,
            entered_date: draft.entered_date,
            description: draft.description,
            amount: draft.amount,
            balance: draft.balance,
            category: UNCATEGORISED.to_string(),
        }
    }
}

impl Entity for Transaction {
    const KIND: &'static str = "Transaction";

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Compute a stable, deterministic identity for one statement line.
///
/// The entered date is deliberately excluded: the same line re-entered on a
/// different date must map to the same record. Amounts are normalized so
/// `4.50` and `4.5` encode identically.
pub fn fingerprint(
    effective_date: NaiveDate,
    amount: Decimal,
    balance: Decimal,
    description: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!(
        "{}:{}:{}:{}",
        effective_date.format("%Y-%m-%d"),
        amount.normalize(),
        balance.normalize(),
        description
    ));
    format!("{:x}", hasher.finalize())
}
