//! Keyword chat assistant — the widget session that wraps the responder.
//!
//! This is the facade crate that wires together the lower-level components:
//! - [`assistant_keywords`]: input normalization and whole-word patterns
//! - [`assistant_knowledge`]: knowledge base, routes and widget configuration
//! - [`assistant_reply`]: first-match-wins reply selection
//!
//! A [`ChatSession`] owns everything one widget instance needs: its
//! configuration, the compiled responder, the conversation history, the
//! panel/unread state and its random source. Nothing is global, so several
//! sessions (or tests) never interfere.
//!
//! # Quick Start
//!
//! ```
//! use assistant::{AssistantConfig, ChatSession};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut chat = ChatSession::new(AssistantConfig::default(), SmallRng::seed_from_u64(42)).unwrap();
//! let pending = chat.submit("How much does this cost?").unwrap();
//! // A UI would wait `pending.delay()` here before showing the reply.
//! let reply = chat.deliver(pending).unwrap();
//! assert_eq!(reply.action(), Some("contact"));
//! ```

use std::fmt;
use std::time::Duration;

use assistant_keywords::strip_quick_reply_prefix;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

// Re-export types that consumers (like the CLI) need.
pub use assistant_knowledge::{
    AssistantConfig, ConfigError, ConfigOverrides, KnowledgeEntry, RouteAction, Theme,
    load_overrides,
};
pub use assistant_reply::{Match, Reply, Responder, respond};

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
    /// Route-action key. Only bot turns carry one.
    action: Option<String>,
}

impl Turn {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Route-action key of a bot reply. Always `None` for user turns.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    fn user(text: String) -> Self {
        Turn {
            role: Role::User,
            text,
            action: None,
        }
    }

    fn bot(text: String, action: Option<String>) -> Self {
        Turn {
            role: Role::Bot,
            text,
            action,
        }
    }
}

/// Whether the chat panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

/// Handle for a reply that has been requested but not yet shown.
///
/// The host waits [`PendingReply::delay`] and then hands the handle back to
/// [`ChatSession::deliver`]. Handles go stale when the pending reply is
/// cancelled.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingReply {
    ticket: u64,
    delay: Duration,
}

impl PendingReply {
    /// Simulated thinking time before the reply should appear.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// A resolved call-to-action link for a bot turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    pub url: String,
    pub label: String,
    pub icon: String,
}

impl fmt::Display for ActionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.label)
    }
}

/// Why a submission was ignored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    Empty,
    #[error("a reply is already pending")]
    ReplyPending,
    #[error("no quick reply at index {0}")]
    UnknownQuickReply(usize),
}

struct Pending {
    ticket: u64,
    text: String,
}

/// One chat widget session.
///
/// Generic over the PRNG type `R` so tests can seed reply selection.
pub struct ChatSession<R: Rng> {
    config: AssistantConfig,
    responder: Responder,
    /// Append-only.
    history: Vec<Turn>,
    panel: PanelState,
    /// `Some` while awaiting a reply.
    pending: Option<Pending>,
    next_ticket: u64,
    /// Launcher notification badge.
    unread: bool,
    rng: R,
}

impl<R: Rng> ChatSession<R> {
    /// Start a session: compile the responder (which rejects an invalid
    /// config) and post the greeting.
    ///
    /// The panel starts closed with the unread badge raised, since the
    /// greeting has not been seen yet.
    pub fn new(config: AssistantConfig, rng: R) -> Result<Self, ConfigError> {
        let responder = Responder::from_config(&config)?;
        config.warn_dangling_actions();
        let greeting = Turn::bot(config.greeting.clone(), None);
        Ok(ChatSession {
            config,
            responder,
            history: vec![greeting],
            panel: PanelState::Closed,
            pending: None,
            next_ticket: 0,
            unread: true,
            rng,
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn has_unread(&self) -> bool {
        self.unread
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    pub fn quick_replies(&self) -> &[String] {
        &self.config.quick_replies
    }

    /// Flip the panel between open and closed. Returns the new state.
    pub fn toggle(&mut self) -> PanelState {
        match self.panel {
            PanelState::Open => self.close(),
            PanelState::Closed => self.open(),
        }
        self.panel
    }

    /// Show the panel and clear the unread badge.
    pub fn open(&mut self) {
        self.panel = PanelState::Open;
        self.unread = false;
    }

    pub fn close(&mut self) {
        self.panel = PanelState::Closed;
    }

    /// Post a user message and start waiting for the reply.
    ///
    /// The text is trimmed. Empty messages, and any message sent while a
    /// reply is still pending, are rejected without touching the history.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, SubmitError> {
        let text = text.trim();
        if text.is_empty() {
            warn!("ignoring empty submission");
            return Err(SubmitError::Empty);
        }
        if self.pending.is_some() {
            warn!("ignoring submission while a reply is pending");
            return Err(SubmitError::ReplyPending);
        }

        self.history.push(Turn::user(text.to_string()));
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(Pending {
            ticket,
            text: text.to_string(),
        });
        debug!(ticket, "awaiting reply");
        Ok(PendingReply {
            ticket,
            delay: Duration::from_millis(self.config.reply_delay_ms),
        })
    }

    /// Submit the quick reply at `index`, minus its emoji prefix.
    pub fn submit_quick_reply(&mut self, index: usize) -> Result<PendingReply, SubmitError> {
        let label = self
            .config
            .quick_replies
            .get(index)
            .ok_or(SubmitError::UnknownQuickReply(index))?;
        let text = strip_quick_reply_prefix(label).to_string();
        self.submit(&text)
    }

    /// Compute and post the reply for `pending`.
    ///
    /// Returns `None` (and changes nothing) if the handle is stale. If the
    /// panel is closed when the reply lands, the unread badge is raised.
    pub fn deliver(&mut self, pending: PendingReply) -> Option<&Turn> {
        match &self.pending {
            Some(p) if p.ticket == pending.ticket => {}
            _ => {
                debug!(ticket = pending.ticket, "dropping stale reply");
                return None;
            }
        }
        let text = self.pending.take()?.text;
        Some(self.reply_to(&text))
    }

    /// Submit and deliver immediately, skipping the simulated delay.
    pub fn send(&mut self, text: &str) -> Result<&Turn, SubmitError> {
        let text = text.trim();
        self.submit(text)?;
        self.pending = None;
        Ok(self.reply_to(text))
    }

    /// Drop the pending reply, if any, so it is never shown. Returns whether
    /// something was cancelled.
    pub fn cancel_pending(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            debug!("pending reply cancelled");
        }
        cancelled
    }

    /// Resolve a turn's action key to a link. `None` if the turn has no
    /// action or the action has no configured route.
    pub fn action_link(&self, turn: &Turn) -> Option<ActionLink> {
        let route = self.config.route(turn.action()?)?;
        Some(ActionLink {
            url: route.url.clone(),
            label: route.label.clone(),
            icon: route.icon.clone(),
        })
    }

    fn reply_to(&mut self, text: &str) -> &Turn {
        let reply = self.responder.respond(text, &mut self.rng);
        self.history.push(Turn::bot(reply.message, reply.action));
        if self.panel == PanelState::Closed {
            self.unread = true;
        }
        &self.history[self.history.len() - 1]
    }
}
