use std::fmt;

/// The flagged span of a finding, relative to `text`.
///
/// `offset` and `length` count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingContext {
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

/// One spelling or grammar issue, normalized across engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFinding {
    pub message: String,
    pub context: Option<FindingContext>,
    /// Index of the flattened item the finding belongs to, when known
    pub item: Option<usize>,
}

impl CheckFinding {
    pub fn new(message: impl Into<String>) -> Self {
        CheckFinding {
            message: message.into(),
            context: None,
            item: None,
        }
    }

    pub fn with_context(mut self, text: impl Into<String>, offset: usize, length: usize) -> Self {
        self.context = Some(FindingContext {
            text: text.into(),
            offset,
            length,
        });
        self
    }

    pub fn for_item(mut self, item: usize) -> Self {
        self.item = Some(item);
        self
    }

    /// The flagged text, if the finding carries a usable context.
    pub fn flagged(&self) -> Option<String> {
        let context = self.context.as_ref()?;
        let flagged: String = context
            .text
            .chars()
            .skip(context.offset)
            .take(context.length)
            .collect();
        (!flagged.is_empty()).then_some(flagged)
    }
}

/// Characters of context shown either side of a flagged span.
const CONTEXT_RADIUS: usize = 40;
const ELLIPSIS: &str = "...";

impl fmt::Display for CheckFinding {
    /// Message, then the context line with a caret marker under the span.
    /// Long contexts are cut down to a window around the span.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        let Some(context) = &self.context else {
            return Ok(());
        };

        let chars: Vec<char> = context.text.chars().collect();
        let start = context.offset.saturating_sub(CONTEXT_RADIUS).min(chars.len());
        let end = (context.offset + context.length + CONTEXT_RADIUS).min(chars.len());
        let mut line = String::new();
        if start > 0 {
            line.push_str(ELLIPSIS);
        }
        let marker_at = line.chars().count() + context.offset - start;
        line.extend(&chars[start..end]);
        if end < chars.len() {
            line.push_str(ELLIPSIS);
        }

        write!(
            f,
            "\n    {}\n    {}{}",
            line,
            " ".repeat(marker_at),
            "^".repeat(context.length.max(1))
        )
    }
}
