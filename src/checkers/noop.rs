use crate::checkers::{CheckFinding, TextChecker};
use crate::flatten::FlattenedItem;
use crate::wordlist::WordList;
use crate::RecipeError;

/// Checker used when checking is switched off.
pub struct NoopChecker;

impl TextChecker for NoopChecker {
    fn name(&self) -> &str {
        "none"
    }

    fn check(
        &self,
        _items: &[FlattenedItem],
        _words: &WordList,
    ) -> Result<Vec<CheckFinding>, RecipeError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::ItemSource;

    #[test]
    fn test_never_reports() {
        let items = vec![FlattenedItem {
            source: ItemSource::Field("title"),
            text: "Thsi is teribble speling".to_string(),
        }];
        let findings = NoopChecker.check(&items, &WordList::default()).unwrap();
        assert!(findings.is_empty());
    }
}
