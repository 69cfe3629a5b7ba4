#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

const HEADER: &str = "Effective Date,Entered Date,Description,Amount,Balance\n";

fn parse_rows(rows: &str) -> Result<Vec<Draft>, ParseError> {
    parse_statement(format!("{HEADER}{rows}").as_bytes())
}

fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn test_parse_single_row() {
    let drafts = parse_rows(",02/01/2024,Coffee,$4.50,$100.00\n").unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].effective_date, date(2024, 1, 2));
    assert_eq!(drafts[0].entered_date, date(2024, 1, 2));
    assert_eq!(drafts[0].description, "Coffee");
    assert_eq!(drafts[0].amount, dec!(4.50));
    assert_eq!(drafts[0].balance, dec!(100.00));
}

#[test]
fn test_parse_explicit_effective_date() {
    let drafts = parse_rows("01/01/2024,02/01/2024,Coffee,$4.50,$100.00\n").unwrap();
    assert_eq!(drafts[0].effective_date, date(2024, 1, 1));
    assert_eq!(drafts[0].entered_date, date(2024, 1, 2));
}

#[test]
fn test_parse_empty_effective_date_defaults_to_entered() {
    let drafts = parse_rows(",15/03/2024,Rent,-$950.00,$50.00\n").unwrap();
    assert_eq!(drafts[0].effective_date, drafts[0].entered_date);
    assert_eq!(drafts[0].effective_date, date(2024, 3, 15));
}

#[test]
fn test_parse_preserves_row_order() {
    let drafts = parse_rows(
        ",02/01/2024,First,$1.00,$1.00\n\
         ,03/01/2024,Second,$2.00,$3.00\n\
         ,04/01/2024,Third,$3.00,$6.00\n",
    )
    .unwrap();
    let descriptions: Vec<&str> = drafts.iter().map(|d| d.description.as_str()).collect();
    assert_eq!(descriptions, vec!["First", "Second", "Third"]);
}

#[test]
fn test_parse_extra_columns_ignored() {
    let drafts = parse_rows(",02/01/2024,Coffee,$4.50,$100.00,extra,columns\n").unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].amount, dec!(4.50));
}

#[test]
fn test_parse_description_kept_raw() {
    let drafts = parse_rows(",02/01/2024,  COFFEE SHOP #42  ,$4.50,$100.00\n").unwrap();
    assert_eq!(drafts[0].description, "  COFFEE SHOP #42  ");
}

// ── Currency stripping ────────────────────────────────────────

#[test]
fn test_parse_strips_currency_marker() {
    let drafts = parse_rows(",02/01/2024,Coffee,$12.00,$100.00\n").unwrap();
    assert_eq!(drafts[0].amount, dec!(12.00));
}

#[test]
fn test_parse_strips_thousands_separators() {
    let drafts = parse_rows(",02/01/2024,Rent,\"-$1,234.56\",\"$3,000.00\"\n").unwrap();
    assert_eq!(drafts[0].amount, dec!(-1234.56));
    assert_eq!(drafts[0].balance, dec!(3000.00));
}

#[test]
fn test_parse_plain_numbers() {
    let drafts = parse_rows(",02/01/2024,Deposit,250.00,-12.50\n").unwrap();
    assert_eq!(drafts[0].amount, dec!(250.00));
    assert_eq!(drafts[0].balance, dec!(-12.50));
}

// ── Header handling ───────────────────────────────────────────

#[test]
fn test_first_row_always_skipped() {
    // Even a first row that looks like data is treated as the header.
    let drafts = parse_statement(
        b"01/01/2024,02/01/2024,Looks like data,$1.00,$2.00\n\
          ,03/01/2024,Coffee,$4.50,$100.00\n",
    )
    .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].description, "Coffee");
}

#[test]
fn test_empty_input_yields_empty_batch() {
    assert!(parse_statement(b"").unwrap().is_empty());
}

#[test]
fn test_header_only_yields_empty_batch() {
    assert!(parse_statement(HEADER.as_bytes()).unwrap().is_empty());
}

// ── Abort semantics ───────────────────────────────────────────

#[test]
fn test_bad_entered_date_aborts_batch() {
    let err = parse_rows(",not-a-date,Coffee,$4.50,$100.00\n").unwrap_err();
    assert!(matches!(err, ParseError::BadDate { row: 2, .. }));
}

#[test]
fn test_bad_effective_date_aborts_batch() {
    let err = parse_rows("13/13/2024,02/01/2024,Coffee,$4.50,$100.00\n").unwrap_err();
    assert!(matches!(err, ParseError::BadDate { row: 2, .. }));
}

#[test]
fn test_iso_date_rejected() {
    // Only DD/MM/YYYY is accepted.
    let err = parse_rows(",2024-01-02,Coffee,$4.50,$100.00\n").unwrap_err();
    assert!(matches!(err, ParseError::BadDate { .. }));
}

#[test]
fn test_bad_amount_aborts_batch() {
    let err = parse_rows(",02/01/2024,Coffee,four fifty,$100.00\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::BadNumber {
            field: "amount",
            row: 2,
            ..
        }
    ));
}

#[test]
fn test_bad_balance_aborts_batch() {
    let err = parse_rows(",02/01/2024,Coffee,$4.50,\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::BadNumber {
            field: "balance",
            ..
        }
    ));
}

#[test]
fn test_short_row_aborts_batch() {
    let err = parse_rows("02/01/2024,Coffee,$4.50\n").unwrap_err();
    assert!(matches!(err, ParseError::ShortRow { row: 2, got: 3 }));
}

#[test]
fn test_error_reports_offending_row_number() {
    let err = parse_rows(
        ",02/01/2024,Good,$1.00,$1.00\n\
         ,bad-date,Bad,$2.00,$3.00\n",
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::BadDate { row: 3, .. }));
}

#[test]
fn test_good_rows_before_failure_are_discarded() {
    let result = parse_rows(
        ",02/01/2024,Good,$1.00,$1.00\n\
         ,03/01/2024,AlsoGood,$2.00,$3.00\n\
         ,04/01/2024,Broken,oops,$6.00\n",
    );
    assert!(result.is_err());
}
