//! Spreadsheet import: SheetJS parsing plus header mapping onto table columns

pub mod parser;
pub mod types;

pub use parser::read_excel_from_file;
pub use types::{ColumnMapping, ImportColumn, ImportError, ImportKind, ImportTable};
