use log::info;

use crate::checkers::{CheckMode, DictionaryChecker, LanguageTool, NoopChecker, TextChecker};
use crate::config::CheckerConfig;
use crate::RecipeError;

pub struct CheckerFactory;

impl CheckerFactory {
    /// Create a checker for the given mode
    pub fn create(
        mode: CheckMode,
        config: &CheckerConfig,
    ) -> Result<Box<dyn TextChecker>, RecipeError> {
        info!("Using '{}' checker", mode);
        match mode {
            CheckMode::LanguageTool => Ok(Box::new(LanguageTool::new(&config.language_tool))),
            CheckMode::Enchant => Ok(Box::new(DictionaryChecker::new(&config.dictionary)?)),
            CheckMode::None => Ok(Box::new(NoopChecker)),
        }
    }

    /// Create the checker named by `config.mode`
    pub fn from_config(config: &CheckerConfig) -> Result<Box<dyn TextChecker>, RecipeError> {
        Self::create(config.mode.parse()?, config)
    }
}
