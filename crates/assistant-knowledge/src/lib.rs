//! Assistant knowledge base and widget configuration.
//!
//! An [`AssistantConfig`] carries everything a chat widget needs at
//! initialization:
//! - the ordered [`KnowledgeEntry`] list (keywords → canned responses),
//! - the fallback replies used when nothing matches,
//! - the [`RouteAction`] table that turns action keys into links,
//! - display details (name, greeting, [`Theme`], quick replies) and the
//!   simulated reply delay.
//!
//! The built-in defaults describe the Giggs Software Labs assistant. Callers
//! may override any subset of fields with a [`ConfigOverrides`] value, usually
//! read from a TOML or JSON file via [`load_overrides`].

mod defaults;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assistant_keywords::{KeywordPattern, PatternError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub use defaults::DEFAULT_REPLY_DELAY_MS;

/// One keyword-set → response-set record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Words or short phrases that trigger this entry, in match order.
    pub keywords: Vec<String>,
    /// Candidate replies. One is picked at random per match.
    pub responses: Vec<String>,
    /// Optional route-action key attached to replies from this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A navigational call-to-action shown alongside a bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAction {
    pub url: String,
    pub label: String,
    pub icon: String,
}

/// Widget colour theme. Values are passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub primary_dark: String,
    pub accent: String,
    pub success: String,
}

impl Default for Theme {
    fn default() -> Self {
        defaults::default_theme()
    }
}

/// Full widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Display name of the assistant.
    pub name: String,
    /// First bot message of every session.
    pub greeting: String,
    pub theme: Theme,
    /// Action key → link. Looked up by key; iteration is in key order.
    pub routes: BTreeMap<String, RouteAction>,
    /// Suggested user messages, usually prefixed with an emoji.
    pub quick_replies: Vec<String>,
    /// Entries in precedence order. The first matching entry wins.
    pub knowledge: Vec<KnowledgeEntry>,
    /// Replies used when no entry matches. Never empty once validated.
    pub fallbacks: Vec<String>,
    /// Simulated thinking delay before a reply is shown.
    pub reply_delay_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        defaults::default_config()
    }
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("fallback list is empty")]
    EmptyFallbacks,
    #[error("knowledge entry {entry} has no responses")]
    EmptyResponses { entry: usize },
    #[error("knowledge entry {entry} has no keywords")]
    NoKeywords { entry: usize },
    #[error("knowledge entry {entry} has an invalid keyword: {source}")]
    InvalidKeyword {
        entry: usize,
        #[source]
        source: PatternError,
    },
}

impl AssistantConfig {
    /// Built-in defaults with overrides from `path` applied, then validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let overrides = load_overrides(path)?;
        let config = overrides.apply(AssistantConfig::default());
        config.validate()?;
        info!(
            path = %path.display(),
            entries = config.knowledge.len(),
            fallbacks = config.fallbacks.len(),
            "loaded assistant config"
        );
        Ok(config)
    }

    /// Check the invariants the responder relies on.
    ///
    /// Every entry needs at least one keyword and one response, every keyword
    /// must compile, and the fallback list must not be empty. Action keys
    /// with no matching route are allowed (the link is just not rendered)
    /// but are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallbacks.is_empty() {
            return Err(ConfigError::EmptyFallbacks);
        }
        for (idx, entry) in self.knowledge.iter().enumerate() {
            if entry.keywords.is_empty() {
                return Err(ConfigError::NoKeywords { entry: idx });
            }
            if entry.responses.is_empty() {
                return Err(ConfigError::EmptyResponses { entry: idx });
            }
            for keyword in &entry.keywords {
                KeywordPattern::new(keyword)
                    .map_err(|source| ConfigError::InvalidKeyword { entry: idx, source })?;
            }
        }
        self.warn_dangling_actions();
        Ok(())
    }

    /// Log every entry whose action key names no configured route. Returns
    /// how many there were.
    pub fn warn_dangling_actions(&self) -> usize {
        let mut dangling = 0;
        for (idx, entry) in self.knowledge.iter().enumerate() {
            if let Some(action) = &entry.action {
                if !self.routes.contains_key(action) {
                    warn!(entry = idx, action = %action, "action has no configured route");
                    dangling += 1;
                }
            }
        }
        dangling
    }

    /// Look up the link for an action key.
    pub fn route(&self, action: &str) -> Option<&RouteAction> {
        self.routes.get(action)
    }
}

/// A partial configuration. Each present field replaces the default wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    pub greeting: Option<String>,
    pub theme: Option<Theme>,
    pub routes: Option<BTreeMap<String, RouteAction>>,
    pub quick_replies: Option<Vec<String>>,
    pub knowledge: Option<Vec<KnowledgeEntry>>,
    pub fallbacks: Option<Vec<String>>,
    pub reply_delay_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Shallow merge onto `base`. Nested values are not merged.
    pub fn apply(self, base: AssistantConfig) -> AssistantConfig {
        AssistantConfig {
            name: self.name.unwrap_or(base.name),
            greeting: self.greeting.unwrap_or(base.greeting),
            theme: self.theme.unwrap_or(base.theme),
            routes: self.routes.unwrap_or(base.routes),
            quick_replies: self.quick_replies.unwrap_or(base.quick_replies),
            knowledge: self.knowledge.unwrap_or(base.knowledge),
            fallbacks: self.fallbacks.unwrap_or(base.fallbacks),
            reply_delay_ms: self.reply_delay_ms.unwrap_or(base.reply_delay_ms),
        }
    }
}

/// Read overrides from a `.toml` or `.json` file.
pub fn load_overrides(path: &Path) -> Result<ConfigOverrides, ConfigError> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
        Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        Format::Toml => Ok(toml::from_str(&content)?),
        Format::Json => Ok(serde_json::from_str(&content)?),
    }
}

enum Format {
    Toml,
    Json,
}
