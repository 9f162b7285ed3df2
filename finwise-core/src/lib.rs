//! finwise-core: transaction types, the category table, and spend aggregation

pub mod categories;
pub mod stats;
pub mod transaction;

pub use categories::{CategoryTable, MISCELLANEOUS, UNCATEGORIZED};
pub use stats::{category_stats, grand_total};
pub use transaction::{CategoryStat, Transaction};
