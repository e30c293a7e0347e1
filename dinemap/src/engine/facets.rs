use std::collections::BTreeSet;

use crate::models::{FacetColumn, RestaurantRecord};

/// Distinct non-empty values of `column`, sorted.
///
/// The cuisine column is flattened so every keyword token is one option.
pub fn compute_facets(records: &[RestaurantRecord], column: FacetColumn) -> Vec<String> {
    let mut values: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        match column {
            FacetColumn::Cuisine => {
                values.extend(record.cuisine_keywords.iter().map(String::as_str));
            }
            FacetColumn::City => {
                values.insert(&record.city);
            }
            FacetColumn::Neighborhood => {
                values.insert(&record.neighborhood);
            }
            FacetColumn::Chain => {
                if let Some(label) = record.chain.label() {
                    values.insert(label);
                }
            }
        }
    }

    values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect()
}
