use std::path::Path;

use log::debug;

use super::write_atomically;
use crate::checkers::{CheckFinding, TextChecker};
use crate::context::RenderContext;
use crate::flatten::flatten;
use crate::model::{load_recipe_file, RecipeRecord};
use crate::render::TemplateRenderer;
use crate::sanitize::sanitize;
use crate::wordlist::WordList;
use crate::RecipeError;

/// Inputs for one YAML → TeX conversion
pub struct TexOptions<'a> {
    pub yaml_file: &'a Path,
    pub tex_file: &'a Path,
    /// Style file as given on the command line (e.g., "rcpphone.sty")
    pub style: &'a str,
    pub renderer: &'a TemplateRenderer,
    pub template: &'a str,
    /// Checker to run first, or `None` to skip checking
    pub checker: Option<&'a dyn TextChecker>,
    pub words: &'a WordList,
}

/// Style name bound into templates: the style path without its extension.
pub fn style_name(style: &str) -> String {
    Path::new(style).with_extension("").to_string_lossy().into_owned()
}

/// Turn a recipe into sanitized LaTeX.
pub fn render_recipe(
    record: RecipeRecord,
    style: &str,
    renderer: &TemplateRenderer,
    template: &str,
) -> Result<String, RecipeError> {
    let context = RenderContext::new(record, style_name(style))?;
    let rendered = renderer.render(template, &context)?;
    Ok(sanitize(&rendered))
}

/// Convert a YAML recipe file to a TeX file.
///
/// This pipeline:
/// 1. Loads the recipe
/// 2. Optionally checks its text (findings are returned, never applied)
/// 3. Promotes the main ingredient group and renders the template
/// 4. Sanitizes the output and writes it in one step
pub fn run(options: &TexOptions<'_>) -> Result<Vec<CheckFinding>, RecipeError> {
    let record = load_recipe_file(options.yaml_file)?;

    let findings = match options.checker {
        Some(checker) => {
            let items = flatten(&record);
            debug!("Checking {} item(s) with {}", items.len(), checker.name());
            checker.check(&items, options.words)?
        }
        None => Vec::new(),
    };

    let latex = render_recipe(record, options.style, options.renderer, options.template)?;
    write_atomically(options.tex_file, latex.as_bytes())?;
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_name() {
        assert_eq!(style_name("rcpphone.sty"), "rcpphone");
        assert_eq!(style_name("styles/rcpbook.sty"), "styles/rcpbook");
        assert_eq!(style_name("plain"), "plain");
    }

    #[test]
    fn test_render_recipe_sanitizes() {
        let renderer =
            TemplateRenderer::from_source("t", "{{ title }}: {{ notes }} ({{ style }})").unwrap();
        let record = crate::model::load_recipe(
            "title: Crème brûlée\nnotes: 50% sugar\ningredients:\n  A: [cream]\n",
        )
        .unwrap();

        let latex = render_recipe(record, "rcpphone.sty", &renderer, "t").unwrap();
        assert_eq!(latex, "Cr\\`{e}me brûl\\'{e}e: 50\\% sugar (rcpphone)\n");
    }
}
