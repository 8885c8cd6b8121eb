use std::path::Path;

use log::debug;
use spellbook::Dictionary;
use unicode_segmentation::UnicodeSegmentation;

use crate::checkers::{CheckFinding, TextChecker};
use crate::config::DictionaryConfig;
use crate::flatten::FlattenedItem;
use crate::wordlist::WordList;
use crate::RecipeError;

const MAX_SUGGESTIONS: usize = 3;

/// Spelling-only checks against a hunspell dictionary.
///
/// By default all items are joined with single spaces and checked as one
/// text, so finding offsets point into that joined text and carry no item
/// index. With `per_item` each item is checked on its own.
pub struct DictionaryChecker {
    dictionary: Dictionary,
    per_item: bool,
}

impl DictionaryChecker {
    /// Load the `.aff`/`.dic` pair named in the configuration
    pub fn new(config: &DictionaryConfig) -> Result<Self, RecipeError> {
        let aff = read(Path::new(&config.aff))?;
        let dic = read(Path::new(&config.dic))?;
        let checker = Self::from_hunspell(&aff, &dic, config.per_item)?;
        debug!("Loaded hunspell dictionary {}", config.dic);
        Ok(checker)
    }

    /// Build from the contents of an affix file and a word file
    pub fn from_hunspell(aff: &str, dic: &str, per_item: bool) -> Result<Self, RecipeError> {
        let dictionary = Dictionary::new(aff, dic).map_err(|e| {
            RecipeError::CheckerError(format!("invalid hunspell dictionary: {}", e))
        })?;
        Ok(DictionaryChecker {
            dictionary,
            per_item,
        })
    }

    fn is_known(&self, word: &str, words: &WordList) -> bool {
        let normalized = word.replace('\u{2019}', "'");
        self.dictionary.check(&normalized)
            || words.contains(&normalized)
            || words.contains(&normalized.to_lowercase())
    }

    fn finding(&self, word: &str) -> CheckFinding {
        let mut suggestions = Vec::new();
        self.dictionary.suggest(word, &mut suggestions);
        suggestions.truncate(MAX_SUGGESTIONS);

        let message = if suggestions.is_empty() {
            format!("Possible spelling mistake: '{}'", word)
        } else {
            format!(
                "Possible spelling mistake: '{}' (suggestions: {})",
                word,
                suggestions.join(", ")
            )
        };
        CheckFinding::new(message)
    }

    fn check_text(&self, text: &str, words: &WordList) -> Vec<CheckFinding> {
        tokens(text)
            .into_iter()
            .filter(|token| !self.is_known(token.word, words))
            .map(|token| {
                self.finding(token.word)
                    .with_context(text, token.offset, token.word.chars().count())
            })
            .collect()
    }
}

impl TextChecker for DictionaryChecker {
    fn name(&self) -> &str {
        "enchant"
    }

    fn check(
        &self,
        items: &[FlattenedItem],
        words: &WordList,
    ) -> Result<Vec<CheckFinding>, RecipeError> {
        if self.per_item {
            return Ok(items
                .iter()
                .enumerate()
                .flat_map(|(index, item)| {
                    self.check_text(&item.text, words)
                        .into_iter()
                        .map(move |finding| finding.for_item(index))
                })
                .collect());
        }

        let joined = items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(self.check_text(&joined, words))
    }
}

fn read(path: &Path) -> Result<String, RecipeError> {
    std::fs::read_to_string(path).map_err(|e| RecipeError::io(path, e))
}

#[derive(Debug, PartialEq)]
struct Token<'t> {
    word: &'t str,
    /// Character offset into the scanned text
    offset: usize,
}

/// Words worth spell checking, located by Unicode word boundaries.
///
/// Segments without letters are skipped, as are those containing digits
/// (quantities such as `180C` or `2tbsp`).
fn tokens(text: &str) -> Vec<Token<'_>> {
    let mut found = Vec::new();
    let mut cursor = 0;
    let mut chars = 0;

    for (byte, segment) in text.split_word_bound_indices() {
        // word boundaries keep letters either side of ':' together (Item:flour)
        let mut start = byte;
        for part in segment.split(':') {
            let checkable = part.chars().any(char::is_alphabetic)
                && !part.chars().any(char::is_numeric);
            if checkable {
                chars += text[cursor..start].chars().count();
                cursor = start;
                found.push(Token {
                    word: part,
                    offset: chars,
                });
            }
            start += part.len() + 1;
        }
    }

    found
}
