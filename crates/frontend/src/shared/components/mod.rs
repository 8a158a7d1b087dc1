pub mod page_header;
pub mod pagination_controls;
pub mod table_checkbox;

pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
pub use table_checkbox::{TableCellCheckbox, TableHeaderCheckbox};
