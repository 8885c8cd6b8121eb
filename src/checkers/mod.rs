mod dictionary;
mod factory;
mod finding;
mod language_tool;
mod noop;

pub use dictionary::DictionaryChecker;
pub use factory::CheckerFactory;
pub use finding::{CheckFinding, FindingContext};
pub use language_tool::{LanguageTool, LanguageToolSession};
pub use noop::NoopChecker;

use std::fmt;
use std::str::FromStr;

use crate::flatten::FlattenedItem;
use crate::wordlist::WordList;
use crate::RecipeError;

/// Unified trait for all checking engines
pub trait TextChecker {
    /// Get the engine name (e.g., "language_tool", "enchant")
    fn name(&self) -> &str;

    /// Check flattened recipe text, skipping spellings the word list permits
    fn check(
        &self,
        items: &[FlattenedItem],
        words: &WordList,
    ) -> Result<Vec<CheckFinding>, RecipeError>;
}

/// Which engine to check with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Grammar and spelling via a LanguageTool server
    #[default]
    LanguageTool,
    /// Dictionary lookup, spelling only
    Enchant,
    /// No checking
    None,
}

impl CheckMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMode::LanguageTool => "language_tool",
            CheckMode::Enchant => "enchant",
            CheckMode::None => "none",
        }
    }

    pub fn all() -> [CheckMode; 3] {
        [CheckMode::LanguageTool, CheckMode::Enchant, CheckMode::None]
    }
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckMode {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckMode::all()
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                RecipeError::ConfigurationError(format!(
                    "unknown check mode '{}' (expected one of: language_tool, enchant, none)",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("language_tool".parse::<CheckMode>().unwrap(), CheckMode::LanguageTool);
        assert_eq!("enchant".parse::<CheckMode>().unwrap(), CheckMode::Enchant);
        assert_eq!("none".parse::<CheckMode>().unwrap(), CheckMode::None);
    }

    #[test]
    fn test_unknown_mode_names_value() {
        let err = "banana".parse::<CheckMode>().unwrap_err();
        assert!(matches!(err, RecipeError::ConfigurationError(_)));
        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn test_mode_names_are_case_sensitive() {
        assert!("Enchant".parse::<CheckMode>().is_err());
    }
}
