//! Projects the text-bearing parts of a recipe into a flat, ordered list so
//! every checking engine sees the same input.

use std::fmt;

use crate::model::{value_to_text, RecipeRecord, SCALAR_FIELDS};

/// Prefix carried by every flattened ingredient item.
pub const INGREDIENT_TAG: &str = "Item:";

/// Where in the recipe a flattened item came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    Field(&'static str),
    Ingredient { group: String, index: usize },
    Step(usize),
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSource::Field(name) => write!(f, "{}", name),
            ItemSource::Ingredient { group, index } => {
                write!(f, "ingredients.{}[{}]", group, index)
            }
            ItemSource::Step(index) => write!(f, "method[{}]", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedItem {
    pub source: ItemSource,
    pub text: String,
}

/// Flatten a recipe into checkable text.
///
/// Order is fixed: string scalar fields (in [`SCALAR_FIELDS`] order), then
/// every ingredient item group by group, then method steps.
pub fn flatten(record: &RecipeRecord) -> Vec<FlattenedItem> {
    let mut items = Vec::new();

    for field in SCALAR_FIELDS {
        if let Some(text) = record.scalar(field) {
            items.push(FlattenedItem {
                source: ItemSource::Field(field),
                text: text.to_string(),
            });
        }
    }

    for (group, entries) in &record.ingredients {
        for (index, entry) in entries.iter().enumerate() {
            items.push(FlattenedItem {
                source: ItemSource::Ingredient {
                    group: group.clone(),
                    index,
                },
                text: format!("{}{}", INGREDIENT_TAG, value_to_text(entry)),
            });
        }
    }

    for (index, step) in record.method.iter().enumerate() {
        items.push(FlattenedItem {
            source: ItemSource::Step(index),
            text: value_to_text(step),
        });
    }

    items
}
