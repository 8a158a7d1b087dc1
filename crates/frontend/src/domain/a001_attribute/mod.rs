//! Product attributes (size, colour, material...) and their allowed values

pub mod ui;

pub use ui::details::AttributeDetails;
pub use ui::list::AttributeList;
