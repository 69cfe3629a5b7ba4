use std::io::Write;

use crate::error::Error;
use crate::store::Store;

/// Suggested filename for downloads of the export format.
pub const EXPORT_FILENAME: &str = "transactions.csv";

/// Write every transaction as `[effective date, amount, category]` - ISO
/// date, amount fixed to two decimal places, no header row - in display
/// order. The format is plain `text/csv`. Returns the number of rows
/// written.
pub fn export_csv<W: Write>(store: &dyn Store, writer: W) -> Result<usize, Error> {
    let txs = super::all_transactions(store)?;

    let mut w = csv::Writer::from_writer(writer);
    for tx in &txs {
        w.write_record([
            tx.effective_date.to_string(),
            format!("{:.2}", tx.amount),
            tx.category.clone(),
        ])?;
    }
    w.flush().map_err(csv::Error::from)?;

    Ok(txs.len())
}
