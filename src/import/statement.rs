use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::Draft;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Positional layout: effective date (optional), entered date, description,
/// amount, balance. Columns past the fifth are ignored.
const COLUMNS: usize = 5;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("row {row}: expected 5 columns, got {got}")]
    ShortRow { row: usize, got: usize },
    #[error("row {row}: unable to parse date '{value}'")]
    BadDate { row: usize, value: String },
    #[error("row {row}: unable to parse {field} '{value}'")]
    BadNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Parse a raw statement export into drafts.
///
/// The first row is a header and is always skipped; header-only or empty
/// input yields an empty batch. Any malformed row aborts the whole batch —
/// there is no partial result. Row numbers in errors are 1-based and count
/// the header.
pub fn parse_statement(data: &[u8]) -> Result<Vec<Draft>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut drafts = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;
        if row == 1 {
            continue;
        }
        if record.len() < COLUMNS {
            return Err(ParseError::ShortRow {
                row,
                got: record.len(),
            });
        }

        let entered_date = parse_date(&record[1], row)?;
        let effective_date = if record[0].trim().is_empty() {
            entered_date
        } else {
            parse_date(&record[0], row)?
        };
        let amount = parse_money(&record[3], "amount", row)?;
        let balance = parse_money(&record[4], "balance", row)?;

        drafts.push(Draft {
            effective_date,
            entered_date,
            // Kept raw: the fingerprint hashes the origin-provided string.
            description: record[2].to_string(),
            amount,
            balance,
        });
    }

    Ok(drafts)
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ParseError::BadDate {
        row,
        value: value.to_string(),
    })
}

/// Strip the currency marker and thousands separators, then parse. The sign
/// comes through untouched.
fn parse_money(value: &str, field: &'static str, row: usize) -> Result<Decimal, ParseError> {
    let cleaned = value.replace(['$', ','], "");
    Decimal::from_str(cleaned.trim()).map_err(|_| ParseError::BadNumber {
        row,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
#[path = "statement_tests.rs"]
mod tests;
