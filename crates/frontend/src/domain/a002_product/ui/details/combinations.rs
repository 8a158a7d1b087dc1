//! Variant combinations of a product: the Cartesian product of the chosen
//! options of every picked dimension, each with its own price row.

use contracts::domain::a002_product::aggregate::{
    ProductCombinationDto, ProductVariationDto, VariationDto, VariationOptionDto,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A picked dimension with its chosen options, in the order it was picked
pub type SelectedVariation = ProductVariationDto;

/// Value of the product form's variants field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantsValue {
    #[serde(default)]
    pub variations: Vec<SelectedVariation>,
    #[serde(default)]
    pub combinations: Vec<ProductCombinationDto>,
}

impl VariantsValue {
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Add a dimension at the end, with none of its options chosen yet
    pub fn pick_dimension(&mut self, dimension: &VariationDto) {
        if self.variations.iter().any(|v| v.variation_id == dimension.id) {
            return;
        }
        self.variations.push(SelectedVariation {
            variation_id: dimension.id.clone(),
            name: dimension.name.clone(),
            options: Vec::new(),
        });
        self.regenerate();
    }

    pub fn drop_dimension(&mut self, variation_id: &str) {
        self.variations.retain(|v| v.variation_id != variation_id);
        self.regenerate();
    }

    /// Choose or unchoose an option; options keep the catalogue order
    pub fn toggle_option(&mut self, dimension: &VariationDto, option: &VariationOptionDto, chosen: bool) {
        let Some(selected) = self
            .variations
            .iter_mut()
            .find(|v| v.variation_id == dimension.id)
        else {
            return;
        };
        let mut ids: BTreeSet<String> = selected.options.iter().map(|o| o.id.clone()).collect();
        if chosen {
            ids.insert(option.id.clone());
        } else {
            ids.remove(&option.id);
        }
        selected.options = dimension
            .options
            .iter()
            .filter(|o| ids.contains(&o.id))
            .cloned()
            .collect();
        self.regenerate();
    }

    pub fn update_row(&mut self, index: usize, edit: impl FnOnce(&mut ProductCombinationDto)) {
        if let Some(row) = self.combinations.get_mut(index) {
            edit(row);
        }
    }

    /// `None` or an empty string clears the row's picture
    pub fn set_row_image(&mut self, index: usize, image: Option<String>) {
        self.update_row(index, |row| row.image = image.filter(|i| !i.is_empty()));
    }

    fn regenerate(&mut self) {
        self.combinations = generate_combinations(&self.variations, &self.combinations);
    }
}

fn option_set(ids: &[String]) -> BTreeSet<String> {
    ids.iter().cloned().collect()
}

/// All combinations of the chosen options.
///
/// The first dimension varies slowest. Dimensions with no chosen option are
/// skipped; with none left there are no combinations. A row whose option-id
/// set existed in `previous` keeps that row's price, cost, code, quantity and
/// image.
pub fn generate_combinations(
    selected: &[SelectedVariation],
    previous: &[ProductCombinationDto],
) -> Vec<ProductCombinationDto> {
    let dimensions: Vec<&SelectedVariation> = selected.iter().filter(|v| !v.options.is_empty()).collect();
    if dimensions.is_empty() {
        return Vec::new();
    }

    let mut tuples: Vec<Vec<&VariationOptionDto>> = vec![Vec::new()];
    for dimension in &dimensions {
        tuples = tuples
            .into_iter()
            .flat_map(|prefix| {
                dimension.options.iter().map(move |option| {
                    let mut next = prefix.clone();
                    next.push(option);
                    next
                })
            })
            .collect();
    }

    let carried: HashMap<BTreeSet<String>, &ProductCombinationDto> = previous
        .iter()
        .map(|row| (option_set(&row.option_ids), row))
        .collect();

    tuples
        .into_iter()
        .map(|tuple| {
            let option_ids: Vec<String> = tuple.iter().map(|o| o.id.clone()).collect();
            let name = tuple.iter().map(|o| o.name.as_str()).collect::<Vec<_>>().join("/");
            match carried.get(&option_set(&option_ids)) {
                Some(old) => ProductCombinationDto {
                    name,
                    option_ids,
                    price: old.price,
                    cost: old.cost,
                    code: old.code.clone(),
                    starting_quantity: old.starting_quantity,
                    image: old.image.clone(),
                },
                None => ProductCombinationDto {
                    name,
                    option_ids,
                    ..Default::default()
                },
            }
        })
        .collect()
}
