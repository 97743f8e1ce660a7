// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the catalog, completion, and conversation crates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random session id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random message id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// True only for [`HealthStatus::Healthy`].
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Identifies the type of an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Completion,
}

// --- Catalog types ---

/// A single board game in the catalog.
///
/// Records are deserialized once from the embedded dataset and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    /// Player range as displayed, e.g. `"2-5"` or `"4-20+"`.
    pub players: String,
    pub play_time: String,
    /// 1 (easy) to 5 (hard).
    pub difficulty: u8,
    /// 1 (pick up in minutes) to 5 (long teach).
    pub learning_curve: u8,
    pub description: String,
    pub categories: Vec<String>,
    pub rating: f32,
    pub youtube_url: String,
    pub manual_url: String,
}

/// Maximum description length shown on a game card.
const CARD_DESCRIPTION_CHARS: usize = 120;

impl GameRecord {
    /// Parses [`players`](Self::players) into an inclusive `(min, max)` range.
    ///
    /// `"3-4"` gives `(3, 4)`, `"4-20+"` gives `(4, 20)`, `"2"` gives `(2, 2)`.
    /// Returns `None` when the text is not a number or a range of numbers.
    pub fn player_range(&self) -> Option<(u32, u32)> {
        let parse = |s: &str| s.trim().trim_end_matches('+').trim().parse::<u32>().ok();
        match self.players.split_once('-') {
            Some((lo, hi)) => {
                let (lo, hi) = (parse(lo)?, parse(hi)?);
                (lo <= hi).then_some((lo, hi))
            }
            None => parse(&self.players).map(|n| (n, n)),
        }
    }

    /// True when a group of `count` players fits this game.
    pub fn supports_players(&self, count: u32) -> bool {
        self.player_range()
            .is_some_and(|(lo, hi)| lo <= count && count <= hi)
    }

    /// Short card text used when a game is recommended in chat.
    pub fn card_summary(&self) -> String {
        let mut blurb: String = self
            .description
            .chars()
            .take(CARD_DESCRIPTION_CHARS)
            .collect();
        if self.description.chars().count() > CARD_DESCRIPTION_CHARS {
            blurb.push_str("...");
        }
        format!(
            "**{}** ({} players, {}, Difficulty: {}/5)\n{}",
            self.name, self.players, self.play_time, self.difficulty, blurb
        )
    }
}

// --- Conversation types ---

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Why a message exists. Lets the UI style greetings and fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Greeting,
    User,
    Reply,
    Fallback,
}

/// One entry in a conversation log. Immutable once appended.
#[derive(Debug, Clone)]
pub struct ConversationMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub kind: MessageKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Games attached to an assistant message, in catalog order.
    pub recommended_games: Vec<Arc<GameRecord>>,
}

impl ConversationMessage {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::User, text.into(), Vec::new())
    }

    /// The synthetic assistant message that opens every session.
    pub fn greeting(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageKind::Greeting, text.into(), Vec::new())
    }

    /// A model reply annotated with the games it mentions.
    pub fn reply(text: impl Into<String>, games: Vec<Arc<GameRecord>>) -> Self {
        Self::new(Sender::Assistant, MessageKind::Reply, text.into(), games)
    }

    /// The canned apology used when a completion fails.
    pub fn fallback(text: impl Into<String>, games: Vec<Arc<GameRecord>>) -> Self {
        Self::new(Sender::Assistant, MessageKind::Fallback, text.into(), games)
    }

    fn new(
        sender: Sender,
        kind: MessageKind,
        text: String,
        recommended_games: Vec<Arc<GameRecord>>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            sender,
            kind,
            text,
            timestamp: Utc::now(),
            recommended_games,
        }
    }

    /// Converts this message into a history turn for a completion request.
    pub fn to_turn(&self) -> ChatTurn {
        let role = match self.sender {
            Sender::User => Role::User,
            Sender::Assistant => Role::Assistant,
        };
        ChatTurn {
            role,
            content: self.text.clone(),
        }
    }
}

// --- Completion types ---

/// Role of a message in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single `{role, content}` entry sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Input to a [`CompletionAdapter`](crate::CompletionAdapter) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    /// Already capped to the history window, oldest first.
    pub history: Vec<ChatTurn>,
    pub user_message: String,
}

impl CompletionRequest {
    /// Flattens the request into the ordered wire message list:
    /// one system entry, the history, then the new user entry.
    pub fn messages(&self) -> Vec<ChatTurn> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatTurn::system(self.system_prompt.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatTurn::user(self.user_message.clone()));
        messages
    }
}

/// Token accounting reported by the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub id: String,
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}
