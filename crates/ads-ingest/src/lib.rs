pub mod csv_table;
pub mod hints;

pub use csv_table::read_csv_table;
pub use hints::build_column_hints;
