pub mod checkers;
pub mod config;
pub mod context;
pub mod error;
pub mod flatten;
pub mod model;
pub mod pipelines;
pub mod render;
pub mod report;
pub mod sanitize;
pub mod wordlist;

pub use checkers::{CheckFinding, CheckMode, CheckerFactory, TextChecker};
pub use config::RecipeConfig;
pub use context::RenderContext;
pub use error::RecipeError;
pub use flatten::{flatten, FlattenedItem, ItemSource};
pub use model::{load_recipe, load_recipe_file, RecipeRecord};
pub use pipelines::tex::{render_recipe, TexOptions};
pub use render::TemplateRenderer;
pub use sanitize::sanitize;
pub use wordlist::WordList;

use std::path::Path;

/// Load the permitted-word list.
///
/// An explicitly requested file must exist; the configured default may be
/// missing, in which case the list is empty.
pub fn load_words(
    explicit: Option<&Path>,
    config: &RecipeConfig,
) -> Result<WordList, RecipeError> {
    match explicit {
        Some(path) => WordList::load(path),
        None => WordList::load_or_empty(Path::new(&config.checker.words_file)),
    }
}

/// Check flattened recipe text with the given engine.
pub fn check_recipe(
    record: &RecipeRecord,
    checker: &dyn TextChecker,
    words: &WordList,
) -> Result<Vec<CheckFinding>, RecipeError> {
    checker.check(&flatten(record), words)
}

/// Render YAML recipe text to LaTeX in memory.
///
/// # Example
/// ```
/// use recipe_tex::{yaml_to_tex, TemplateRenderer};
///
/// let renderer = TemplateRenderer::from_source("recipe.j2", "{{ title }}").unwrap();
/// let latex = yaml_to_tex(
///     "title: Soup\ningredients:\n  Base: [water]\n",
///     "rcpphone.sty",
///     &renderer,
///     "recipe.j2",
/// )
/// .unwrap();
/// assert_eq!(latex, "Soup\n");
/// ```
pub fn yaml_to_tex(
    yaml: &str,
    style: &str,
    renderer: &TemplateRenderer,
    template: &str,
) -> Result<String, RecipeError> {
    render_recipe(load_recipe(yaml)?, style, renderer, template)
}
