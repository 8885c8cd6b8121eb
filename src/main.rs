//! yaml-to-tex: typesets a YAML recipe definition as a LaTeX file.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use recipe_tex::pipelines::tex;
use recipe_tex::report::{fail, report_findings};
use recipe_tex::{
    load_words, CheckerFactory, RecipeConfig, RecipeError, TemplateRenderer, TexOptions, WordList,
};

#[derive(Parser, Debug)]
#[command(
    name = "yaml-to-tex",
    version,
    about = "Generates TeX files from YAML recipe definitions"
)]
struct Cli {
    /// Input YAML file
    yaml_file: PathBuf,

    /// Output TeX file
    tex_file: PathBuf,

    /// Recipe style file; bound to the template without its extension
    #[arg(long, default_value = "rcpphone.sty")]
    style: String,

    /// Skip the spelling/grammar check
    #[arg(long)]
    nocheck: bool,

    /// Additional word list [default: src/words.txt]
    #[arg(long)]
    words: Option<PathBuf>,

    /// Checking engine: language_tool, enchant or none [default: from config]
    #[arg(long)]
    mode: Option<String>,

    /// Template to render [default: from config]
    #[arg(long)]
    template: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let color = std::io::stderr().is_terminal();

    if let Err(e) = run(&cli, color) {
        let _ = fail(&mut std::io::stderr(), &format!("error: {}", e), color);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, color: bool) -> Result<(), RecipeError> {
    let mut config = RecipeConfig::load()?;
    if let Some(mode) = &cli.mode {
        config.checker.mode = mode.clone();
    }

    let checker = if cli.nocheck {
        None
    } else {
        Some(CheckerFactory::from_config(&config.checker)?)
    };
    let words = if checker.is_some() {
        load_words(cli.words.as_deref(), &config)?
    } else {
        WordList::default()
    };

    let renderer = TemplateRenderer::new(&config.template.search_path);
    let options = TexOptions {
        yaml_file: &cli.yaml_file,
        tex_file: &cli.tex_file,
        style: &cli.style,
        renderer: &renderer,
        template: cli.template.as_deref().unwrap_or(&config.template.name),
        checker: checker.as_deref(),
        words: &words,
    };
    let findings = tex::run(&options)?;

    let input = cli.yaml_file.display().to_string();
    report_findings(&mut std::io::stderr(), &input, &findings, color)
        .map_err(|e| RecipeError::io("stderr", e))
}
