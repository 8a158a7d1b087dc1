//! Schema-driven create/edit forms
//!
//! `field`, `state`, `rules` and `validation` are plain data and tested
//! natively; `controller` puts the state behind a signal and `component`
//! renders it.

mod component;
mod controller;
mod field;
mod image;
mod rules;
mod state;
mod validation;

pub use component::AddPage;
pub use controller::FormController;
pub use field::{
    check_schema, option_key, ChangeHook, CustomRender, FieldDispatch, FieldKind, FieldSchema, FormAction,
    SchemaError, SelectOption,
};
pub use image::{
    check_image, preview_src, read_image_file, strip_data_url_prefix, to_data_url, ImageError, MAX_IMAGE_BYTES,
};
pub use rules::{CrossFieldRule, RuleKind};
pub use state::FormState;
pub use validation::{is_truthy, validate, ValidationError};
