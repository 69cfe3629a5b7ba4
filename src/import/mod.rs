mod statement;

pub use statement::{parse_statement, ParseError};
