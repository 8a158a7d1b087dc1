//! Product details page
//!
//! - model.rs: endpoints and record <-> form mapping
//! - combinations.rs: variant combination generator
//! - variant_matrix.rs: editor of variations and combination prices
//! - view_model.rs: form schema, queries and the save command
//! - view.rs: the page component

mod combinations;
mod model;
mod variant_matrix;
mod view;
mod view_model;

pub use combinations::{generate_combinations, SelectedVariation, VariantsValue};
pub use model::PRODUCTS_URL;
pub use variant_matrix::VariantMatrix;
pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
