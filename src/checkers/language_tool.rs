use std::process::{Child, Command, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::checkers::{CheckFinding, TextChecker};
use crate::config::LanguageToolConfig;
use crate::flatten::FlattenedItem;
use crate::wordlist::WordList;
use crate::RecipeError;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);
const MAX_SUGGESTIONS: usize = 3;

/// Grammar and spelling checks against a LanguageTool HTTP server
pub struct LanguageTool {
    base_url: String,
    language: String,
    timeout: Duration,
    server_command: Vec<String>,
    startup_timeout: Duration,
}

impl LanguageTool {
    /// Create a new LanguageTool checker from configuration
    pub fn new(config: &LanguageToolConfig) -> Self {
        LanguageTool {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout),
            server_command: config.server_command.clone(),
            startup_timeout: Duration::from_secs(config.startup_timeout),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&LanguageToolConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Open a checking session.
    ///
    /// When a server command is configured the server is started here and
    /// stopped again when the session is dropped.
    pub fn open(&self) -> Result<LanguageToolSession, RecipeError> {
        let client = Client::builder().timeout(self.timeout).build()?;
        let mut session = LanguageToolSession {
            client,
            base_url: self.base_url.clone(),
            language: self.language.clone(),
            server: None,
        };

        if let Some((program, args)) = self.server_command.split_first() {
            info!("Starting LanguageTool server: {}", self.server_command.join(" "));
            let child = Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| {
                    RecipeError::CheckerError(format!(
                        "failed to start LanguageTool server '{}': {}",
                        program, e
                    ))
                })?;
            session.server = Some(child);
            session.wait_until_ready(self.startup_timeout)?;
        }

        debug!("Opened LanguageTool session against {}", self.base_url);
        Ok(session)
    }
}

impl TextChecker for LanguageTool {
    fn name(&self) -> &str {
        "language_tool"
    }

    fn check(
        &self,
        items: &[FlattenedItem],
        words: &WordList,
    ) -> Result<Vec<CheckFinding>, RecipeError> {
        let session = self.open()?;
        let mut findings = Vec::new();

        for (index, item) in items.iter().enumerate() {
            if item.text.trim().is_empty() {
                continue;
            }
            for rule_match in session.check(&item.text)? {
                if rule_match.is_spelling() {
                    if let Some(word) = rule_match.flagged_in(&item.text) {
                        if words.contains(word) {
                            debug!("Permitted word '{}' in {}", word, item.source);
                            continue;
                        }
                    }
                }
                findings.push(rule_match.into_finding(&item.text).for_item(index));
            }
        }

        Ok(findings)
    }
}

/// A live connection to a LanguageTool server.
///
/// Dropping the session stops any server it started.
pub struct LanguageToolSession {
    client: Client,
    base_url: String,
    language: String,
    server: Option<Child>,
}

impl LanguageToolSession {
    /// Check one piece of text
    pub fn check(&self, text: &str) -> Result<Vec<RuleMatch>, RecipeError> {
        let response = self
            .client
            .post(format!("{}/v2/check", self.base_url))
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()?
            .error_for_status()?;

        let body: CheckResponse = response.json()?;
        debug!("{} match(es) for {:?}", body.matches.len(), text);
        Ok(body.matches)
    }

    fn wait_until_ready(&mut self, startup_timeout: Duration) -> Result<(), RecipeError> {
        let deadline = Instant::now() + startup_timeout;
        let probe = format!("{}/v2/languages", self.base_url);

        loop {
            if let Some(child) = self.server.as_mut() {
                if let Ok(Some(status)) = child.try_wait() {
                    return Err(RecipeError::CheckerError(format!(
                        "LanguageTool server exited during startup ({})",
                        status
                    )));
                }
            }
            match self.client.get(&probe).send() {
                Ok(response) if response.status().is_success() => return Ok(()),
                _ if Instant::now() >= deadline => {
                    return Err(RecipeError::CheckerError(format!(
                        "LanguageTool server at {} not ready after {:?}",
                        self.base_url, startup_timeout
                    )))
                }
                _ => sleep(READY_POLL_INTERVAL),
            }
        }
    }
}

impl Drop for LanguageToolSession {
    fn drop(&mut self) {
        if let Some(mut child) = self.server.take() {
            if let Err(e) = child.kill() {
                warn!("Failed to stop LanguageTool server (pid {}): {}", child.id(), e);
            }
            let _ = child.wait();
            debug!("Stopped LanguageTool server (pid {})", child.id());
        }
        debug!("Closed LanguageTool session");
    }
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RuleMatch>,
}

/// A single match as reported by the server.
///
/// Offsets are UTF-16 code units, as LanguageTool counts them.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleMatch {
    #[serde(default)]
    pub message: String,
    pub offset: Option<usize>,
    pub length: Option<usize>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    pub context: Option<MatchContext>,
    pub rule: Option<Rule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchContext {
    pub text: String,
    pub offset: Option<usize>,
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(rename = "issueType")]
    pub issue_type: Option<String>,
}

impl RuleMatch {
    pub fn is_spelling(&self) -> bool {
        self.rule.as_ref().is_some_and(|rule| {
            rule.issue_type.as_deref() == Some("misspelling")
                || rule.id.starts_with("MORFOLOGIK_")
                || rule.id.contains("SPELLER")
        })
    }

    /// The span of `text` this match flags.
    pub fn flagged_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        utf16_span(text, self.offset?, self.length?)
    }

    fn into_finding(self, checked: &str) -> CheckFinding {
        let mut message = self.message;
        if !self.replacements.is_empty() {
            let suggestions: Vec<&str> = self
                .replacements
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(|r| r.value.as_str())
                .collect();
            message = format!("{} (suggestions: {})", message, suggestions.join(", "));
        }

        let finding = CheckFinding::new(message);
        let from_server = self.context.as_ref().and_then(|ctx| {
            char_span(&ctx.text, ctx.offset?, ctx.length?).map(|s| (ctx.text.as_str(), s))
        });
        let from_item = || char_span(checked, self.offset?, self.length?).map(|s| (checked, s));

        match from_server.or_else(from_item) {
            Some((text, (offset, length))) => finding.with_context(text, offset, length),
            None => finding,
        }
    }
}

/// Slice `text` by a UTF-16 offset and length.
fn utf16_span(text: &str, offset: usize, length: usize) -> Option<&str> {
    let end = offset.checked_add(length)?;
    let mut units = 0;
    let mut start = None;

    for (byte, ch) in text.char_indices() {
        if units == offset {
            start = Some(byte);
        }
        if units == end {
            return start.map(|s| &text[s..byte]);
        }
        units += ch.len_utf16();
    }

    if units == offset {
        start = Some(text.len());
    }
    if units == end {
        return start.map(|s| &text[s..]);
    }
    None
}

/// Convert a UTF-16 span into a character offset and length.
fn char_span(text: &str, offset: usize, length: usize) -> Option<(usize, usize)> {
    let before = utf16_span(text, 0, offset)?;
    let flagged = utf16_span(text, offset, length)?;
    Some((before.chars().count(), flagged.chars().count()))
}
