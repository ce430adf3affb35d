mod filter;
mod query;
mod table;

pub use filter::RowFilter;
pub use query::ROW_CEILING;
pub use table::{Table, TableMetadata};
