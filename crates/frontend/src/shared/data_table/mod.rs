//! Generic searchable, filterable, paginated table over JSON rows
//!
//! The pure core (`cell`, `filter`, `pagination`, `selection`, `state`,
//! `actions`) holds every rule and is tested natively; `component.rs` only
//! wires it to signals and markup.

mod actions;
mod cell;
mod column;
mod component;
mod filter;
mod pagination;
mod selection;
mod state;

pub use actions::{ActionTarget, EditPath};
pub use cell::{cell_text, fallback_cell, field_value, row_id};
pub use column::{CellRender, ColumnSchema};
pub use component::{DataTable, SearchApi};
pub use filter::{distinct_values, filter_rows, matches_column_filters, matches_search};
pub use pagination::{Pagination, PAGE_SIZE_OPTIONS};
pub use selection::{PageCheckState, Selection};
pub use state::{TableState, TableView};
