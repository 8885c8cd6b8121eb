use recipe_tex::pipelines::tex;
use recipe_tex::{
    load_recipe, yaml_to_tex, CheckerFactory, CheckMode, RecipeError, RenderContext,
    TemplateRenderer, TexOptions, WordList,
};

const MINIMAL_TEMPLATE: &str = "{{ title }}\n\
{% for group, items in main_ingredients|items %}{{ group }}: {{ items|join(', ') }}\n{% endfor %}\
{% for step in method %}{{ step }}\n{% endfor %}\
extra groups: {{ ingredients|length }}";

#[test]
fn test_soup_end_to_end() {
    let yaml = r#"{title: "Soup", ingredients: {Base: ["water"]}, method: ["boil"]}"#;

    let context = RenderContext::new(load_recipe(yaml).unwrap(), "rcpphone").unwrap();
    assert!(context.record.ingredients.is_empty());

    let renderer = TemplateRenderer::from_source("minimal.j2", MINIMAL_TEMPLATE).unwrap();
    let latex = yaml_to_tex(yaml, "rcpphone.sty", &renderer, "minimal.j2").unwrap();

    assert!(latex.contains("Soup"));
    assert!(latex.contains("water"));
    assert!(latex.contains("boil"));
    assert!(latex.contains("extra groups: 0"));
    assert!(latex.ends_with('\n'));
}

#[test]
fn test_percent_and_egrave_escaped_in_output() {
    let yaml = "title: Crème caramel\nnotes: 10% less sugar\ningredients:\n  Custard: [eggs]\n";
    let renderer = TemplateRenderer::from_source("t.j2", "{{ title }} / {{ notes }}").unwrap();
    let latex = yaml_to_tex(yaml, "rcpphone.sty", &renderer, "t.j2").unwrap();

    assert!(latex.contains("Cr\\`{e}me"));
    assert!(latex.contains("10\\%"));
    assert!(!latex.contains('è'));
    assert!(!latex.replace("\\%", "").contains('%'));
}

#[test]
fn test_shipped_template_renders_full_recipe() {
    let yaml = r#"
title: Lemon drizzle cake
servings: "8"
prepTime: 20 mins
cookTime: 45 mins
ingredients:
  Cake:
    - 225g butter
    - 225g caster sugar
  Drizzle:
    - 85g caster sugar
    - juice of 1½ lemons
method:
  - Heat oven to 180˚C.
  - Beat the butter and sugar – then add the eggs.
notes: Keeps for 3 days.
"#;
    let renderer = TemplateRenderer::new("templates");
    let latex = yaml_to_tex(yaml, "rcpphone.sty", &renderer, "recipe.j2").unwrap();

    assert!(latex.contains("\\usepackage{rcpphone}"));
    assert!(latex.contains("\\begin{recipe}{Lemon drizzle cake}"));
    assert!(latex.contains("\\servings{8}"));
    assert!(latex.contains("\\begin{mainingredients}{Cake}"));
    assert!(latex.contains("\\begin{ingredients}{Drizzle}"));
    assert!(!latex.contains("\\begin{ingredients}{Cake}"));
    assert!(latex.contains("juice of 1\\sfrac{1}{2} lemons"));
    assert!(latex.contains("180\\degree{}C"));
    assert!(latex.contains("sugar --- then"));
    assert!(!latex.contains("\\recipenumber"));
    assert!(latex.ends_with("\\end{document}\n"));
}

#[test]
fn test_shipped_template_requires_title() {
    let renderer = TemplateRenderer::new("templates");
    let err = yaml_to_tex("ingredients:\n  A: [x]\n", "rcpphone.sty", &renderer, "recipe.j2")
        .unwrap_err();

    assert!(matches!(err, RecipeError::TemplateError(_)));
    assert!(err.to_string().contains("title"));
}

#[test]
fn test_run_writes_tex_file() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_file = dir.path().join("soup.yaml");
    let tex_file = dir.path().join("soup.tex");
    std::fs::write(
        &yaml_file,
        "title: Soup\ningredients:\n  Base: [water, salt]\nmethod: [Boil.]\n",
    )
    .unwrap();

    let renderer = TemplateRenderer::new("templates");
    let checker = CheckerFactory::create(CheckMode::None, &Default::default()).unwrap();
    let words = WordList::default();
    let options = TexOptions {
        yaml_file: &yaml_file,
        tex_file: &tex_file,
        style: "rcpbook.sty",
        renderer: &renderer,
        template: "recipe.j2",
        checker: Some(checker.as_ref()),
        words: &words,
    };

    let findings = tex::run(&options).unwrap();
    assert!(findings.is_empty());

    let latex = std::fs::read_to_string(&tex_file).unwrap();
    assert!(latex.contains("\\usepackage{rcpbook}"));
    assert!(latex.contains("\\item salt"));
}

#[test]
fn test_empty_ingredients_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let yaml_file = dir.path().join("air.yaml");
    let tex_file = dir.path().join("air.tex");
    std::fs::write(&yaml_file, "title: Air\ningredients: {}\nmethod: [Breathe.]\n").unwrap();

    let renderer = TemplateRenderer::new("templates");
    let words = WordList::default();
    let options = TexOptions {
        yaml_file: &yaml_file,
        tex_file: &tex_file,
        style: "rcpphone.sty",
        renderer: &renderer,
        template: "recipe.j2",
        checker: None,
        words: &words,
    };

    let result = tex::run(&options);
    assert!(matches!(result, Err(RecipeError::DataError(_))));
    assert!(!tex_file.exists());
}
