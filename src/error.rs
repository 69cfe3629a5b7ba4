use thiserror::Error;

use crate::import::ParseError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unable to write csv: {0}")]
    Csv(#[from] csv::Error),
}
