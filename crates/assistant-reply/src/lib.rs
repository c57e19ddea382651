//! Assistant reply selection: first-match-wins keyword lookup with random
//! response choice.
//!
//! Selection runs in two steps:
//!
//! 1. **Select**: walk the knowledge entries in configured order, and each
//!    entry's keywords in configured order. The first entry with a keyword
//!    that occurs as a whole word/phrase in the normalized input wins.
//!    Nothing is scored; entry order is the precedence.
//! 2. **Pick**: choose one of the winning entry's responses uniformly at
//!    random and attach its action key. When nothing matched, pick a fallback
//!    and attach no action.
//!
//! Step 1 is deterministic for a given input and configuration. Only step 2
//! consumes randomness, which comes from the caller's [`Rng`] so tests can
//! seed it.

use assistant_keywords::{KeywordPattern, normalize};
use assistant_knowledge::{AssistantConfig, ConfigError, KnowledgeEntry};
use rand::Rng;
use tracing::debug;

/// The entry and keyword that produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Index of the winning entry in the knowledge list.
    pub entry: usize,
    /// The normalized keyword that fired.
    pub keyword: String,
}

/// One bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    /// Action key of the matched entry, if it declares one. Always `None`
    /// for fallback replies.
    pub action: Option<String>,
    /// `None` when the reply came from the fallback set.
    pub matched: Option<Match>,
}

impl Reply {
    /// Whether this reply came from the fallback set.
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

#[derive(Debug, Clone)]
struct CompiledEntry {
    patterns: Vec<KeywordPattern>,
    responses: Vec<String>,
    action: Option<String>,
}

/// A knowledge base with every keyword pattern compiled up front.
#[derive(Debug, Clone)]
pub struct Responder {
    entries: Vec<CompiledEntry>,
    fallbacks: Vec<String>,
}

impl Responder {
    /// Compile `knowledge` and `fallbacks`.
    ///
    /// Fails when an entry has no keywords or responses, a keyword is blank,
    /// or `fallbacks` is empty, so a built responder can always answer.
    pub fn new(knowledge: &[KnowledgeEntry], fallbacks: &[String]) -> Result<Self, ConfigError> {
        if fallbacks.is_empty() {
            return Err(ConfigError::EmptyFallbacks);
        }
        let entries = knowledge
            .iter()
            .enumerate()
            .map(|(idx, entry)| compile_entry(idx, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Responder {
            entries,
            fallbacks: fallbacks.to_vec(),
        })
    }

    /// Compile the knowledge base of a full configuration.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, ConfigError> {
        Self::new(&config.knowledge, &config.fallbacks)
    }

    /// Number of compiled entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the knowledge base has no entries (every reply is a fallback).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deterministic half of [`Responder::respond`]: which entry, if any,
    /// the input selects.
    pub fn select(&self, input: &str) -> Option<Match> {
        let normalized = normalize(input);
        self.entries.iter().enumerate().find_map(|(idx, entry)| {
            entry
                .patterns
                .iter()
                .find(|p| p.is_match(&normalized))
                .map(|p| Match {
                    entry: idx,
                    keyword: p.keyword().to_string(),
                })
        })
    }

    /// Map one user message to a reply.
    ///
    /// Never fails: input that matches nothing, including symbol- or
    /// emoji-only input, gets a fallback.
    pub fn respond<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Reply {
        match self.select(input) {
            Some(matched) => {
                let entry = &self.entries[matched.entry];
                debug!(entry = matched.entry, keyword = %matched.keyword, "keyword matched");
                Reply {
                    message: pick(&entry.responses, rng),
                    action: entry.action.clone(),
                    matched: Some(matched),
                }
            }
            None => {
                debug!("no keyword matched, using fallback");
                Reply {
                    message: pick(&self.fallbacks, rng),
                    action: None,
                    matched: None,
                }
            }
        }
    }
}

/// One-shot reply without a prebuilt [`Responder`].
///
/// Patterns are compiled on every call. Blank keywords can never match and
/// are skipped. `fallbacks` must be non-empty; with an empty list a
/// non-matching input yields an empty message.
pub fn respond<R: Rng + ?Sized>(
    input: &str,
    knowledge: &[KnowledgeEntry],
    fallbacks: &[String],
    rng: &mut R,
) -> Reply {
    let normalized = normalize(input);
    for (idx, entry) in knowledge.iter().enumerate() {
        let hit = entry
            .keywords
            .iter()
            .filter_map(|k| KeywordPattern::new(k).ok())
            .find(|p| p.is_match(&normalized));
        if let Some(pattern) = hit {
            debug!(entry = idx, keyword = %pattern.keyword(), "keyword matched");
            return Reply {
                message: pick(&entry.responses, rng),
                action: entry.action.clone(),
                matched: Some(Match {
                    entry: idx,
                    keyword: pattern.keyword().to_string(),
                }),
            };
        }
    }
    debug!("no keyword matched, using fallback");
    Reply {
        message: pick(fallbacks, rng),
        action: None,
        matched: None,
    }
}

fn compile_entry(idx: usize, entry: &KnowledgeEntry) -> Result<CompiledEntry, ConfigError> {
    if entry.keywords.is_empty() {
        return Err(ConfigError::NoKeywords { entry: idx });
    }
    if entry.responses.is_empty() {
        return Err(ConfigError::EmptyResponses { entry: idx });
    }
    let patterns = entry
        .keywords
        .iter()
        .map(|k| KeywordPattern::new(k))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::InvalidKeyword { entry: idx, source })?;
    Ok(CompiledEntry {
        patterns,
        responses: entry.responses.clone(),
        action: entry.action.clone(),
    })
}

/// Uniform choice from `candidates`.
fn pick<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let idx = rng.random_range(0..candidates.len());
    candidates[idx].clone()
}
