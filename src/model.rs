use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml_ng::Value;

use crate::RecipeError;

/// Scalar fields a recipe may carry, in the order they are checked.
pub const SCALAR_FIELDS: [&str; 7] = [
    "title",
    "servings",
    "number",
    "prepTime",
    "cookTime",
    "freezable",
    "notes",
];

/// Ingredient groups keyed by group name, in declaration order.
pub type IngredientGroups = IndexMap<String, Vec<Value>>;

/// A recipe as loaded from its YAML definition.
///
/// `ingredients` and `method` are typed because the pipeline reorders and
/// walks them; every other key (including the scalar fields listed in
/// [`SCALAR_FIELDS`]) stays in `fields` untouched so templates can use it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, deserialize_with = "deserialize_groups")]
    pub ingredients: IngredientGroups,
    #[serde(default, deserialize_with = "deserialize_steps")]
    pub method: Vec<Value>,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl RecipeRecord {
    /// Returns a top-level field only when it is present and a YAML string.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Parse a recipe from YAML text.
pub fn load_recipe(text: &str) -> Result<RecipeRecord, RecipeError> {
    let record = serde_yaml_ng::from_str(text)?;
    Ok(record)
}

/// Read and parse a recipe file.
pub fn load_recipe_file(path: &Path) -> Result<RecipeRecord, RecipeError> {
    let text = std::fs::read_to_string(path).map_err(|e| RecipeError::io(path, e))?;
    load_recipe(&text)
}

/// String form of a YAML value, as used when an item is not already a string.
///
/// Scalars render as written, null renders empty and collections render as
/// inline flow syntax.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => value_to_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml_ng::to_string(value).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}

// A group written as `Garnish:` with no items parses as null.
fn deserialize_groups<'de, D>(deserializer: D) -> Result<IngredientGroups, D::Error>
where
    D: Deserializer<'de>,
{
    let groups: Option<IndexMap<String, Option<Vec<Value>>>> =
        Option::deserialize(deserializer)?;
    Ok(groups
        .unwrap_or_default()
        .into_iter()
        .map(|(name, items)| (name, items.unwrap_or_default()))
        .collect())
}

fn deserialize_steps<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let steps: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(steps.unwrap_or_default())
}
