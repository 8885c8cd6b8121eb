use std::path::Path;

use log::debug;
use minijinja::{path_loader, AutoEscape, Environment, ErrorKind, Template, UndefinedBehavior};

use crate::context::RenderContext;
use crate::RecipeError;

// Global functions minijinja provides; never reported as missing fields.
const BUILTIN_GLOBALS: [&str; 5] = ["range", "dict", "debug", "namespace", "loop"];

/// Renders recipes through Jinja-syntax templates.
///
/// Undefined values are errors rather than empty strings, and nothing is
/// auto-escaped: escaping for LaTeX happens afterwards in
/// [`crate::sanitize`].
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Resolve template names against `search_path`.
    pub fn new(search_path: impl AsRef<Path>) -> Self {
        let mut env = base_environment();
        env.set_loader(path_loader(search_path.as_ref()));
        TemplateRenderer { env }
    }

    /// Serve a single in-memory template.
    pub fn from_source(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, RecipeError> {
        let mut env = base_environment();
        env.add_template_owned(name.into(), source.into())
            .map_err(|e| RecipeError::TemplateError(e.to_string()))?;
        Ok(TemplateRenderer { env })
    }

    /// Render `name` with `context`; the output always ends with a newline.
    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String, RecipeError> {
        let template = self.env.get_template(name).map_err(|e| {
            RecipeError::TemplateError(format!("cannot load template '{}': {}", name, e))
        })?;
        debug!("Rendering template '{}'", name);

        let mut rendered = template.render(context).map_err(|e| match e.kind() {
            ErrorKind::UndefinedError => undefined_error(name, &template, context, &e),
            _ => RecipeError::TemplateError(format!("failed to render '{}': {}", name, e)),
        })?;
        rendered.push('\n');
        Ok(rendered)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(false);
    env
}

/// Name the top-level references the context cannot satisfy.
fn undefined_error(
    name: &str,
    template: &Template<'_, '_>,
    context: &RenderContext,
    error: &minijinja::Error,
) -> RecipeError {
    let known = context.field_names();
    let mut missing: Vec<String> = template
        .undeclared_variables(false)
        .into_iter()
        .filter(|var| !known.contains(var.as_str()) && !BUILTIN_GLOBALS.contains(&var.as_str()))
        .collect();
    missing.sort();

    // narrow down to the names on the failing line when possible
    let failing_line = error
        .line()
        .and_then(|n| template.source().lines().nth(n.checked_sub(1)?));
    if let Some(line) = failing_line {
        let on_line: Vec<String> = missing
            .iter()
            .filter(|var| mentions(line, var))
            .cloned()
            .collect();
        if !on_line.is_empty() {
            missing = on_line;
        }
    }

    if missing.is_empty() {
        RecipeError::TemplateError(format!("undefined value in '{}': {}", name, error))
    } else {
        RecipeError::TemplateError(format!(
            "template '{}' references missing field(s): {}",
            name,
            missing.join(", ")
        ))
    }
}

/// Whether `line` contains `name` as a whole identifier.
fn mentions(line: &str, name: &str) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    line.match_indices(name).any(|(start, _)| {
        let before = line[..start].chars().next_back();
        let after = line[start + name.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::load_recipe;

    fn context(yaml: &str) -> RenderContext {
        RenderContext::new(load_recipe(yaml).unwrap(), "rcpphone").unwrap()
    }

    #[test]
    fn test_render_appends_newline() {
        let renderer = TemplateRenderer::from_source("t", "{{ title }}").unwrap();
        let out = renderer
            .render("t", &context("title: Soup\ningredients:\n  Base: [water]\n"))
            .unwrap();
        assert_eq!(out, "Soup\n");
    }

    #[test]
    fn test_groups_iterate_in_order() {
        let source = "{% for group, items in ingredients|items %}{{ group }}:{{ items|join(',') }};{% endfor %}";
        let renderer = TemplateRenderer::from_source("t", source).unwrap();
        let out = renderer
            .render(
                "t",
                &context("ingredients:\n  Main: [m]\n  Zest: [z]\n  Apple: [a, b]\n"),
            )
            .unwrap();
        assert_eq!(out, "Zest:z;Apple:a,b;\n");
    }

    #[test]
    fn test_missing_field_named() {
        let renderer = TemplateRenderer::from_source("t", "{{ title }} serves {{ servings }}").unwrap();
        let err = renderer
            .render("t", &context("title: Soup\ningredients:\n  Base: [water]\n"))
            .unwrap_err();

        assert!(matches!(err, RecipeError::TemplateError(_)));
        assert!(err.to_string().contains("servings"));
        assert!(!err.to_string().contains("title,"));
    }

    #[test]
    fn test_missing_field_narrowed_to_failing_line() {
        let source = "{% if notes is defined %}{{ notes }}{% endif %}\n{{ title }}\n";
        let renderer = TemplateRenderer::from_source("t", source).unwrap();
        let err = renderer
            .render("t", &context("ingredients:\n  Base: [water]\n"))
            .unwrap_err();

        assert!(err.to_string().ends_with("missing field(s): title"));
    }

    #[test]
    fn test_mentions() {
        assert!(mentions("{{ title }}", "title"));
        assert!(!mentions("{{ subtitle }}", "title"));
        assert!(!mentions("{{ title_case }}", "title"));
    }

    #[test]
    fn test_optional_field_guard() {
        let source = "{% if servings is defined %}{{ servings }}{% else %}-{% endif %}";
        let renderer = TemplateRenderer::from_source("t", source).unwrap();
        let out = renderer
            .render("t", &context("ingredients:\n  Base: [water]\n"))
            .unwrap();
        assert_eq!(out, "-\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::from_source("t.html", "{{ title }}").unwrap();
        let out = renderer
            .render("t.html", &context("title: Fish & <chips>\ningredients:\n  A: [x]\n"))
            .unwrap();
        assert_eq!(out, "Fish & <chips>\n");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new(dir.path());
        let err = renderer
            .render("nope.j2", &context("ingredients:\n  A: [x]\n"))
            .unwrap_err();
        assert!(err.to_string().contains("nope.j2"));
    }

    #[test]
    fn test_loads_from_search_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("r.j2"), "\\usepackage{ {{- style -}} }\n").unwrap();
        let renderer = TemplateRenderer::new(dir.path());
        let out = renderer
            .render("r.j2", &context("ingredients:\n  A: [x]\n"))
            .unwrap();
        assert_eq!(out, "\\usepackage{rcpphone}\n");
    }
}
