mod accounts;
mod export;

pub use accounts::{all_accounts, create_account, rename_account};
pub use export::{export_csv, EXPORT_FILENAME};

use std::cmp::Ordering;

use tracing::{info, warn};

use crate::error::Error;
use crate::import;
use crate::models::{Account, Transaction};
use crate::store::{self, Entity, Store, StoreError};

/// Register every entity kind with the store. Must run once at startup,
/// before any other operation.
pub fn register_entities(store: &dyn Store) -> Result<(), StoreError> {
    store.register(Transaction::KIND)?;
    store.register(Account::KIND)?;
    Ok(())
}

/// Outcome of one ingestion call. Per-record persistence failures never fail
/// the batch; they are counted and logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub parsed: usize,
    pub created: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Parse a statement export and persist every new row.
///
/// Parsing is fail-fast: one malformed row aborts the whole batch and
/// nothing is persisted. Once parsing succeeds each record is created
/// independently; a fingerprint the store has already seen counts as a
/// duplicate, and a backend failure is logged without stopping the loop.
pub fn ingest(store: &dyn Store, data: &[u8]) -> Result<IngestReport, Error> {
    let drafts = import::parse_statement(data)?;

    let mut report = IngestReport {
        parsed: drafts.len(),
        ..IngestReport::default()
    };
    for draft in drafts {
        let tx = Transaction::from_draft(draft);
        match store::create(store, &tx) {
            Ok(()) => report.created += 1,
            Err(StoreError::Duplicate { .. }) => {
                report.duplicates += 1;
                info!(id = %tx.id, description = %tx.description, "skipping duplicate transaction");
            }
            Err(e) => {
                report.failed += 1;
                warn!(id = %tx.id, error = %e, "unable to create transaction");
            }
        }
    }

    Ok(report)
}

/// Every persisted transaction, in display order.
pub fn all_transactions(store: &dyn Store) -> Result<Vec<Transaction>, Error> {
    let mut txs: Vec<Transaction> = store::get_all(store)?;
    sort_for_display(&mut txs);
    Ok(txs)
}

/// Display comparator: effective date first. On equal dates `a` comes first
/// when its balance plus `b`'s amount produces `b`'s balance - when the
/// running balance says `b` followed `a` - and last otherwise. The tie-break
/// reads the pair, not a per-record key, so it is not a total order; see
/// DESIGN.md before touching it.
pub fn display_order(a: &Transaction, b: &Transaction) -> Ordering {
    match a.effective_date.cmp(&b.effective_date) {
        Ordering::Equal => {
            if a.balance + b.amount == b.balance {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        other => other,
    }
}

/// Stable insertion sort. The comparator never reports equality, which
/// `slice::sort_by` may reject outright; doing the sort by hand also fixes
/// the sequence of pair comparisons, so the order is reproducible.
fn sort_for_display(txs: &mut [Transaction]) {
    for i in 1..txs.len() {
        let mut j = i;
        while j > 0 && display_order(&txs[j - 1], &txs[j]) == Ordering::Greater {
            txs.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Overwrite the category of one transaction. Any label is accepted,
/// including the empty string; no history is kept. The identity never
/// changes.
pub fn set_category(store: &dyn Store, id: &str, category: &str) -> Result<Transaction, Error> {
    let updated = store::update(store, id, |tx: &mut Transaction| {
        tx.category = category.to_string();
    })?;
    Ok(updated)
}
