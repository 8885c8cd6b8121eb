use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};

use crate::RecipeError;

/// Words that should never be reported as misspellings.
///
/// Entries are kept exactly as they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordList {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// One word per line; line endings are stripped and blank lines ignored.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines().map(|line| line.trim_end_matches('\r')))
    }

    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let text = std::fs::read_to_string(path).map_err(|e| RecipeError::io(path, e))?;
        let list = Self::parse(&text);
        debug!("Loaded {} permitted words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Like [`WordList::load`], but a missing file gives an empty list.
    pub fn load_or_empty(path: &Path) -> Result<Self, RecipeError> {
        match std::fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Word list {} not found, continuing without permitted words",
                    path.display()
                );
                Ok(Self::default())
            }
            _ => Self::load(path),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
