//! finwise-ingest: statement CSV reading, column detection, date normalization and
//! row-to-transaction mapping.

pub mod columns;
pub mod csv_source;
pub mod dates;
pub mod mapper;
pub mod types;

pub use columns::detect_columns;
pub use csv_source::{Statement, read_statement, read_statement_from};
pub use dates::normalize_date;
pub use mapper::{map_rows, parse_amount};
pub use types::{ColumnField, ColumnGuess, ColumnMapping, MappingError, RawRow};
