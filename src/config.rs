use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration for both tools
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecipeConfig {
    /// Spelling and grammar checking
    #[serde(default)]
    pub checker: CheckerConfig,
    /// Template lookup
    #[serde(default)]
    pub template: TemplateConfig,
}

/// Configuration for the checking engines
#[derive(Debug, Deserialize, Clone)]
pub struct CheckerConfig {
    /// Engine to use: "language_tool", "enchant" or "none"
    #[serde(default = "default_mode")]
    pub mode: String,
    /// File of permitted words, one per line
    #[serde(default = "default_words_file")]
    pub words_file: String,
    #[serde(default)]
    pub language_tool: LanguageToolConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            words_file: default_words_file(),
            language_tool: LanguageToolConfig::default(),
            dictionary: DictionaryConfig::default(),
        }
    }
}

/// Configuration for the LanguageTool grammar and spelling engine
#[derive(Debug, Deserialize, Clone)]
pub struct LanguageToolConfig {
    /// Base URL of the LanguageTool HTTP server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Language code sent with every check (e.g., "en-GB")
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Command that starts a local server for the session (empty = use a running one)
    #[serde(default)]
    pub server_command: Vec<String>,
    /// Seconds to wait for a spawned server to answer
    #[serde(default = "default_startup_timeout")]
    pub startup_timeout: u64,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout: default_timeout(),
            server_command: Vec::new(),
            startup_timeout: default_startup_timeout(),
        }
    }
}

/// Configuration for the hunspell dictionary spelling engine
#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Hunspell affix file
    #[serde(default = "default_aff_path")]
    pub aff: String,
    /// Hunspell word file, paired with `aff`
    #[serde(default = "default_dic_path")]
    pub dic: String,
    /// Check each flattened item separately instead of one joined text
    #[serde(default)]
    pub per_item: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            aff: default_aff_path(),
            dic: default_dic_path(),
            per_item: false,
        }
    }
}

/// Configuration for template resolution
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// Directory templates are loaded from
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Template rendered for each recipe
    #[serde(default = "default_template_name")]
    pub name: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            search_path: default_search_path(),
            name: default_template_name(),
        }
    }
}

// Default value functions
fn default_mode() -> String {
    "language_tool".to_string()
}

fn default_words_file() -> String {
    "src/words.txt".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_language() -> String {
    "en-GB".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_startup_timeout() -> u64 {
    30
}

fn default_aff_path() -> String {
    "/usr/share/hunspell/en_GB.aff".to_string()
}

fn default_dic_path() -> String {
    "/usr/share/hunspell/en_GB.dic".to_string()
}

fn default_search_path() -> String {
    "templates".to_string()
}

fn default_template_name() -> String {
    "recipe.j2".to_string()
}

impl RecipeConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. recipes.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__CHECKER__LANGUAGE_TOOL__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`RecipeConfig::load`] for the precedence rules.
pub fn load_config() -> Result<RecipeConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipes").required(false))
        // Use double underscore for nested: RECIPES__CHECKER__MODE
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_mode(), "language_tool");
        assert_eq!(default_words_file(), "src/words.txt");
        assert_eq!(default_base_url(), "http://localhost:8081");
        assert_eq!(default_language(), "en-GB");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_template_name(), "recipe.j2");
    }

    #[test]
    fn test_checker_config_default() {
        let checker = CheckerConfig::default();
        assert_eq!(checker.mode, "language_tool");
        assert!(checker.language_tool.server_command.is_empty());
        assert!(!checker.dictionary.per_item);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings = Config::builder()
            .add_source(File::from_str(
                r#"
[checker]
mode = "enchant"

[checker.dictionary]
per_item = true

[template]
search_path = "tex"
"#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: RecipeConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.checker.mode, "enchant");
        assert!(config.checker.dictionary.per_item);
        assert_eq!(config.checker.dictionary.aff, "/usr/share/hunspell/en_GB.aff");
        assert_eq!(config.checker.dictionary.dic, "/usr/share/hunspell/en_GB.dic");
        assert_eq!(config.checker.words_file, "src/words.txt");
        assert_eq!(config.template.search_path, "tex");
        assert_eq!(config.template.name, "recipe.j2");
    }

    #[test]
    fn test_empty_sources_yield_defaults() {
        let config: RecipeConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.checker.mode, "language_tool");
        assert_eq!(config.checker.words_file, "src/words.txt");
        assert_eq!(config.checker.language_tool.base_url, "http://localhost:8081");
        assert_eq!(config.checker.language_tool.startup_timeout, 30);
        assert_eq!(config.checker.dictionary.dic, "/usr/share/hunspell/en_GB.dic");
        assert_eq!(config.template.search_path, "templates");
        assert_eq!(config.template.name, "recipe.j2");
    }
}
