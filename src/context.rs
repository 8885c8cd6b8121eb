use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::model::{IngredientGroups, RecipeRecord};
use crate::RecipeError;

/// Everything a recipe template can reference.
///
/// Serializes as one flat mapping: the record's own keys plus `style` and
/// `main_ingredients`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    #[serde(flatten)]
    pub record: RecipeRecord,
    pub style: String,
    pub main_ingredients: IngredientGroups,
}

impl RenderContext {
    /// Build the context, promoting the first ingredient group to
    /// `main_ingredients` and removing it from `ingredients`.
    pub fn new(mut record: RecipeRecord, style: impl Into<String>) -> Result<Self, RecipeError> {
        let (name, items) = record
            .ingredients
            .shift_remove_index(0)
            .ok_or_else(|| RecipeError::DataError("no ingredient groups".to_string()))?;
        debug!("Main ingredient group: {}", name);

        // derived keys win over anything the recipe declares under the same name
        record.fields.shift_remove("style");
        record.fields.shift_remove("main_ingredients");

        let mut main_ingredients = IngredientGroups::new();
        main_ingredients.insert(name, items);

        Ok(RenderContext {
            record,
            style: style.into(),
            main_ingredients,
        })
    }

    /// Top-level names a template can resolve against this context.
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.record
            .fields
            .keys()
            .map(String::as_str)
            .chain(["ingredients", "method", "style", "main_ingredients"])
            .collect()
    }
}
