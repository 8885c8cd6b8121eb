//! check-yaml: spell/grammar checks a YAML recipe and copies it through.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use recipe_tex::pipelines::check;
use recipe_tex::report::{fail, ok, report_findings};
use recipe_tex::{load_words, CheckerFactory, RecipeConfig, RecipeError};

/// Exit status used by `--strict` when findings were reported.
const FINDINGS_EXIT_CODE: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "check-yaml",
    version,
    about = "Spell/grammar checks YAML recipe definitions"
)]
struct Cli {
    /// Input YAML file
    input_file: PathBuf,

    /// Output YAML file (a copy of the input)
    output_file: PathBuf,

    /// Additional word list [default: src/words.txt]
    #[arg(long)]
    words: Option<PathBuf>,

    /// Checking engine: language_tool, enchant or none [default: language_tool]
    #[arg(long)]
    mode: Option<String>,

    /// Exit with status 2 when anything was reported
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let color = std::io::stderr().is_terminal();

    match run(&cli, color) {
        Ok(0) => {}
        Ok(_) if cli.strict => std::process::exit(FINDINGS_EXIT_CODE),
        Ok(_) => {}
        Err(e) => {
            let _ = fail(&mut std::io::stderr(), &format!("error: {}", e), color);
            std::process::exit(1);
        }
    }
}

/// Returns the number of findings reported.
fn run(cli: &Cli, color: bool) -> Result<usize, RecipeError> {
    let mut config = RecipeConfig::load()?;
    if let Some(mode) = &cli.mode {
        config.checker.mode = mode.clone();
    }

    let checker = CheckerFactory::from_config(&config.checker)?;
    let words = load_words(cli.words.as_deref(), &config)?;
    let findings = check::run(&cli.input_file, &cli.output_file, checker.as_ref(), &words)?;

    let input = cli.input_file.display().to_string();
    let mut stderr = std::io::stderr();
    let written = if findings.is_empty() {
        ok(&mut stderr, &format!("[{}] no issues found", input), color)
    } else {
        report_findings(&mut stderr, &input, &findings, color)
    };
    written.map_err(|e| RecipeError::io("stderr", e))?;

    Ok(findings.len())
}
