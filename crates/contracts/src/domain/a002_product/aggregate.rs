use serde::{Deserialize, Serialize};

/// Selectable value of a variation dimension (e.g. "XL" of "Size")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct VariationOptionDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// Variation dimension from the catalogue (`/api/variations`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VariationDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<VariationOptionDto>,
}

/// A dimension picked on a product together with the options chosen for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariationDto {
    pub variation_id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<VariationOptionDto>,
}

/// One sellable combination of variation options with its own pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductCombinationDto {
    /// Option names joined with `/` in dimension order
    pub name: String,
    pub option_ids: Vec<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub starting_quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Product category (`/api/categories`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

/// Product as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enddate: Option<String>,
    #[serde(default)]
    pub variations: Vec<ProductVariationDto>,
    #[serde(default)]
    pub combinations: Vec<ProductCombinationDto>,
}
