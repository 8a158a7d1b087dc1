//! Product endpoints and the mapping between the stored record and the form

use super::combinations::VariantsValue;
use crate::shared::form::{strip_data_url_prefix, SelectOption};
use contracts::domain::a002_product::aggregate::{CategoryDto, Product};
use serde_json::{Map, Value};

pub const PRODUCTS_URL: &str = "/api/products";
pub const CATEGORIES_URL: &str = "/api/categories";
pub const VARIATIONS_URL: &str = "/api/variations";

/// Form key holding variations and combinations together
pub const VARIANTS_KEY: &str = "variants";

/// Optional fields an empty or null input leaves out of the payload
const OPTIONAL_KEYS: [&str; 5] = ["category", "image", "startdate", "enddate", "price"];

pub fn category_options(categories: &[CategoryDto]) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|c| SelectOption::new(c.name.clone(), c.id.clone()))
        .collect()
}

/// Initial form values for a loaded product
pub fn initial_values(product: &Product) -> Value {
    let mut values = match serde_json::to_value(product) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let variants = VariantsValue {
        variations: product.variations.clone(),
        combinations: product.combinations.clone(),
    };
    values.insert(VARIANTS_KEY.to_string(), variants.to_value());
    Value::Object(values)
}

/// Product to send from the submitted form values.
///
/// Data URLs are reduced to their base64 payload; the backend stores bare
/// base64.
pub fn to_payload(values: &Value) -> Result<Product, serde_json::Error> {
    let mut fields = values.as_object().cloned().unwrap_or_default();
    let variants = fields
        .remove(VARIANTS_KEY)
        .map(|v| VariantsValue::from_value(&v))
        .unwrap_or_default();
    for key in OPTIONAL_KEYS {
        if fields.get(key).is_some_and(|v| v.is_null() || v.as_str() == Some("")) {
            fields.remove(key);
        }
    }

    let mut product: Product = serde_json::from_value(Value::Object(fields))?;
    product.image = product.image.map(|i| strip_data_url_prefix(&i).to_string());
    product.variations = variants.variations;
    product.combinations = variants
        .combinations
        .into_iter()
        .map(|mut c| {
            c.image = c.image.map(|i| strip_data_url_prefix(&i).to_string());
            c
        })
        .collect();
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_product::aggregate::{ProductCombinationDto, ProductVariationDto, VariationOptionDto};
    use serde_json::json;

    #[test]
    fn test_payload_strips_data_url_and_splits_variants() {
        let values = json!({
            "name": "Tee",
            "code": "T1",
            "category": "c1",
            "price": 12.5,
            "image": "data:image/png;base64,aGk=",
            "status": true,
            "startdate": "",
            "enddate": "",
            "variants": {
                "variations": [{ "variationId": "size", "name": "Size", "options": [{ "_id": "s", "name": "S" }] }],
                "combinations": [{ "name": "S", "optionIds": ["s"], "price": 13.0 }]
            }
        });

        let product = to_payload(&values).unwrap();

        assert_eq!(product.image.as_deref(), Some("aGk="));
        assert_eq!(product.startdate, None);
        assert_eq!(product.category.as_deref(), Some("c1"));
        assert_eq!(product.variations.len(), 1);
        assert_eq!(product.combinations[0].price, 13.0);
    }

    #[test]
    fn test_blank_price_defaults_to_zero() {
        let product = to_payload(&json!({ "name": "Tee", "price": "" })).unwrap();
        assert_eq!(product.price, 0.0);

        let product = to_payload(&json!({ "name": "Tee", "price": null, "category": null })).unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_initial_values_round_trip_variants() {
        let product = Product {
            id: Some("p1".into()),
            name: "Tee".into(),
            variations: vec![ProductVariationDto {
                variation_id: "size".into(),
                name: "Size".into(),
                options: vec![VariationOptionDto { id: "s".into(), name: "S".into() }],
            }],
            combinations: vec![ProductCombinationDto {
                name: "S".into(),
                option_ids: vec!["s".into()],
                price: 9.0,
                ..Default::default()
            }],
            ..Default::default()
        };

        let values = initial_values(&product);
        let variants = VariantsValue::from_value(&values[VARIANTS_KEY]);

        assert_eq!(values["name"], json!("Tee"));
        assert_eq!(variants.variations, product.variations);
        assert_eq!(variants.combinations, product.combinations);
    }

    #[test]
    fn test_category_options() {
        let options = category_options(&[CategoryDto { id: "c1".into(), name: "Shirts".into() }]);
        assert_eq!(options, vec![SelectOption::new("Shirts", "c1")]);
    }
}
