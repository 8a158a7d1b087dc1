//! Products: list with barcode search, create/edit with variation matrix

pub mod ui;

pub use ui::details::ProductDetails;
pub use ui::list::ProductList;
