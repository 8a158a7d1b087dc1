pub mod a001_attribute;
pub mod a002_product;
