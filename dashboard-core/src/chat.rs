//! Scripted search conversation.
//!
//! A submitted query moves the session `Idle -> Waiting -> Streaming -> Done`.
//! Drivers own the clocks: they call [`ChatSession::resolve`] once the response
//! delay elapses and [`ChatSession::advance`] on every reveal tick, and they
//! call [`ChatSession::cancel`] when the view goes away.

use crate::config::SimulationConfig;
use crate::error::{DashboardError, Result};
use crate::fixtures::DataProvider;
use crate::model::{ChatMessage, ChatRecord, Conversation, Source};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const LOADING_LABELS: [&str; 30] = [
    "Searching",
    "Analyzing",
    "Processing",
    "Finding",
    "Reviewing",
    "Examining",
    "Scanning",
    "Investigating",
    "Coalescing",
    "Manifesting",
    "Brewing",
    "Synthesizing",
    "Aggregating",
    "Compiling",
    "Orchestrating",
    "Curating",
    "Assembling",
    "Materializing",
    "Conjuring",
    "Foraging",
    "Mining",
    "Excavating",
    "Harvesting",
    "Distilling",
    "Weaving",
    "Crafting",
    "Summoning",
    "Channeling",
    "Divining",
    "Contemplating",
];

/// Label shown while waiting, rotating every `interval`.
pub fn loading_label(elapsed: Duration, interval: Duration) -> &'static str {
    let ticks = match interval.as_nanos() {
        0 => 0,
        period => (elapsed.as_nanos() / period) as usize,
    };
    LOADING_LABELS[ticks % LOADING_LABELS.len()]
}

pub fn chat_id(now: DateTime<Utc>) -> String {
    format!("chat_{}", now.timestamp_millis())
}

/// First `limit` characters of the query, with `...` when cut.
pub fn chat_title(query: &str, limit: usize) -> String {
    let mut chars = query.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

pub fn fallback_reply(query: &str) -> String {
    format!(
        "I understand you're asking about {query}. Based on your connected data sources, \
         I don't have specific information about this query in the demo environment. \
         Try asking about ACME Corp, NetLogic coordination, revenue analysis, or recent \
         client communications."
    )
}

/// How many characters each reveal tick adds.
pub trait RevealSteps {
    fn next_step(&mut self) -> usize;
}

pub struct RandomSteps {
    rng: StdRng,
    min: usize,
    max: usize,
}

impl RandomSteps {
    pub fn new(config: &SimulationConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    pub fn seeded(seed: u64, config: &SimulationConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(rng: StdRng, config: &SimulationConfig) -> Self {
        let min = config.min_step.max(1);
        Self {
            rng,
            min,
            max: config.max_step.max(min),
        }
    }
}

impl RevealSteps for RandomSteps {
    fn next_step(&mut self) -> usize {
        self.rng.gen_range(self.min..=self.max)
    }
}

pub struct FixedSteps(pub usize);

impl RevealSteps for FixedSteps {
    fn next_step(&mut self) -> usize {
        self.0.max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Waiting,
    Streaming,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub chat_id: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The canned reply is ready to be revealed.
    Streaming,
    /// No canned reply; a fallback message was appended.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamProgress {
    Partial { shown: usize, total: usize },
    Completed(ChatRecord),
}

#[derive(Clone, Debug)]
struct PendingReply {
    content: String,
    sources: Vec<Source>,
    total: usize,
    shown: usize,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    config: SimulationConfig,
    transcript: Vec<ChatMessage>,
    phase: ChatPhase,
    chat_id: Option<String>,
    title: Option<String>,
    query: Option<String>,
    pending: Option<PendingReply>,
}

impl ChatSession {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            transcript: Vec::new(),
            phase: ChatPhase::Idle,
            chat_id: None,
            title: None,
            query: None,
            pending: None,
        }
    }

    /// Session showing a stored canned conversation.
    pub fn open(config: SimulationConfig, conversation: &Conversation) -> Self {
        Self {
            transcript: conversation.messages.clone(),
            chat_id: Some(conversation.id.clone()),
            title: Some(conversation.title.clone()),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, ChatPhase::Waiting | ChatPhase::Streaming)
    }

    /// Prefix of the reply revealed so far.
    pub fn streaming_text(&self) -> Option<&str> {
        if self.phase != ChatPhase::Streaming {
            return None;
        }
        let pending = self.pending.as_ref()?;
        let end = pending
            .content
            .char_indices()
            .nth(pending.shown)
            .map_or(pending.content.len(), |(idx, _)| idx);
        Some(&pending.content[..end])
    }

    pub fn submit(&mut self, query: &str, now: DateTime<Utc>) -> Result<Submission> {
        if query.trim().is_empty() {
            return Err(DashboardError::EmptyQuery);
        }
        if self.is_busy() {
            tracing::warn!(phase = ?self.phase, "submission rejected while busy");
            return Err(DashboardError::Busy(self.phase));
        }

        let submission = Submission {
            chat_id: chat_id(now),
            title: chat_title(query, self.config.title_limit),
        };
        self.transcript.push(ChatMessage::user(query));
        self.chat_id = Some(submission.chat_id.clone());
        self.title = Some(submission.title.clone());
        self.query = Some(query.to_string());
        self.pending = None;
        self.phase = ChatPhase::Waiting;
        tracing::debug!(chat_id = %submission.chat_id, "waiting for reply");
        Ok(submission)
    }

    /// Picks the canned reply once the response delay has elapsed.
    pub fn resolve(&mut self, provider: &dyn DataProvider) -> Result<Resolution> {
        if self.phase != ChatPhase::Waiting {
            return Err(DashboardError::InvalidPhase {
                action: "resolve",
                phase: self.phase,
            });
        }

        match provider.demo_reply() {
            Some(reply) => {
                self.pending = Some(PendingReply {
                    total: reply.content.chars().count(),
                    content: reply.content,
                    sources: reply.sources,
                    shown: 0,
                });
                self.phase = ChatPhase::Streaming;
                tracing::debug!(chat_id = ?self.chat_id, "streaming reply");
                Ok(Resolution::Streaming)
            }
            None => {
                let query = self.query.take().unwrap_or_default();
                self.transcript
                    .push(ChatMessage::assistant(fallback_reply(&query), Vec::new()));
                self.phase = ChatPhase::Done;
                Ok(Resolution::Fallback)
            }
        }
    }

    /// Reveals `step` more characters. Completing the reply appends it to the
    /// transcript and yields the record to persist.
    pub fn advance(&mut self, step: usize, now: DateTime<Utc>) -> Result<StreamProgress> {
        if self.phase != ChatPhase::Streaming {
            return Err(DashboardError::InvalidPhase {
                action: "advance",
                phase: self.phase,
            });
        }
        let Some(pending) = self.pending.as_mut() else {
            return Err(DashboardError::InvalidPhase {
                action: "advance",
                phase: self.phase,
            });
        };

        pending.shown = (pending.shown + step.max(1)).min(pending.total);
        if pending.shown < pending.total {
            return Ok(StreamProgress::Partial {
                shown: pending.shown,
                total: pending.total,
            });
        }

        let done = self.pending.take().ok_or(DashboardError::InvalidPhase {
            action: "advance",
            phase: self.phase,
        })?;
        self.transcript
            .push(ChatMessage::assistant(done.content, done.sources));
        self.phase = ChatPhase::Done;
        self.query = None;

        let record = ChatRecord {
            id: self.chat_id.clone().unwrap_or_else(|| chat_id(now)),
            title: self.title.clone().unwrap_or_default(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        tracing::debug!(chat_id = %record.id, "reply complete");
        Ok(StreamProgress::Completed(record))
    }

    /// Drops a pending reply. Returns whether anything was in flight.
    pub fn cancel(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        self.pending = None;
        self.query = None;
        self.phase = ChatPhase::Idle;
        tracing::debug!(chat_id = ?self.chat_id, "reply cancelled");
        true
    }
}
