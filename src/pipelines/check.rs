use std::path::Path;

use log::debug;

use super::write_atomically;
use crate::checkers::{CheckFinding, TextChecker};
use crate::flatten::flatten;
use crate::model::load_recipe;
use crate::wordlist::WordList;
use crate::RecipeError;

/// Check a recipe file and copy it to `output`.
///
/// This pipeline:
/// 1. Reads and parses `input` (a parse failure writes nothing)
/// 2. Flattens the recipe and runs `checker` over it
/// 3. Writes an exact copy of `input` to `output`
///
/// Findings are returned for the caller to report; they never stop the copy.
pub fn run(
    input: &Path,
    output: &Path,
    checker: &dyn TextChecker,
    words: &WordList,
) -> Result<Vec<CheckFinding>, RecipeError> {
    let text = std::fs::read_to_string(input).map_err(|e| RecipeError::io(input, e))?;
    let record = load_recipe(&text)?;

    let items = flatten(&record);
    debug!("Checking {} item(s) with {}", items.len(), checker.name());
    let findings = checker.check(&items, words)?;

    write_atomically(output, text.as_bytes())?;
    Ok(findings)
}
