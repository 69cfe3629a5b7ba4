//! Bank-statement ingestion: parse statement exports, fingerprint each row,
//! persist through a key-addressed store, and read the ledger back out.

pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod store;

pub use error::Error;
