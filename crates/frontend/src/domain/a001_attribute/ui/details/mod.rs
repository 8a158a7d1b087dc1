mod model;
mod view;
mod view_model;

pub use model::{to_payload, ATTRIBUTES_URL};
pub use view::AttributeDetails;
pub use view_model::AttributeDetailsViewModel;
