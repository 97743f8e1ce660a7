// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single chat session: the conversation log and the Idle/Awaiting gate.
//!
//! At most one completion is in flight per session. The gate is an atomic
//! flag taken with compare-and-swap; a submission that finds it taken is
//! rejected, never queued. The log lock is never held across the model call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use gameguru_core::{ChatTurn, CompletionFailure, ConversationMessage, SessionId};
use serde::Serialize;
use strum::Display;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::assistant::{window, Assistant};

/// States in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    /// Ready for a submission.
    Idle,
    /// A completion request is in flight.
    Awaiting,
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// Empty or whitespace-only text.
    Blank,
    /// Another submission is still awaiting its reply.
    Busy,
}

/// What a call to [`ConversationSession::submit`] did.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The model replied; the annotated reply was appended.
    Replied(ConversationMessage),
    /// The model call failed; the fallback message was appended.
    FellBack {
        message: ConversationMessage,
        failure: CompletionFailure,
    },
    /// Nothing was appended and no request was made.
    Rejected(RejectReason),
}

impl SubmitOutcome {
    /// The assistant message appended by this submission, if any.
    pub fn message(&self) -> Option<&ConversationMessage> {
        match self {
            SubmitOutcome::Replied(message) | SubmitOutcome::FellBack { message, .. } => {
                Some(message)
            }
            SubmitOutcome::Rejected(_) => None,
        }
    }
}

/// Releases the Awaiting gate on every exit path, including cancellation.
struct AwaitingGuard<'a>(&'a AtomicBool);

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Manages the log and turn-taking for one conversation.
pub struct ConversationSession {
    id: SessionId,
    assistant: Arc<Assistant>,
    log: RwLock<Vec<ConversationMessage>>,
    awaiting: AtomicBool,
    last_error: RwLock<Option<CompletionFailure>>,
    created_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Starts a session whose log holds only `greeting`.
    pub fn new(id: SessionId, assistant: Arc<Assistant>, greeting: &str) -> Self {
        debug!(session_id = %id, "session started");
        Self {
            id,
            assistant,
            log: RwLock::new(vec![ConversationMessage::greeting(greeting)]),
            awaiting: AtomicBool::new(false),
            last_error: RwLock::new(None),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> SessionState {
        if self.awaiting.load(Ordering::Acquire) {
            SessionState::Awaiting
        } else {
            SessionState::Idle
        }
    }

    /// A copy of the full log, oldest first.
    pub async fn snapshot(&self) -> Vec<ConversationMessage> {
        self.log.read().await.clone()
    }

    /// The classification of the most recent failed turn, until dismissed
    /// or cleared by a successful turn.
    pub async fn last_error(&self) -> Option<CompletionFailure> {
        self.last_error.read().await.clone()
    }

    /// Hides the error banner. The log is untouched.
    pub async fn dismiss_error(&self) {
        *self.last_error.write().await = None;
    }

    /// Submits user text.
    ///
    /// Blank text and submissions while Awaiting are rejected with no side
    /// effects. Otherwise the user message is appended, the model is called
    /// with the messages that preceded it, and exactly one assistant message
    /// (reply or fallback) is appended.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::Blank);
        }
        if self
            .awaiting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(session_id = %self.id, "submission rejected while awaiting");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        }
        let _gate = AwaitingGuard(&self.awaiting);

        let history: Vec<ChatTurn> = {
            let mut log = self.log.write().await;
            let history = window(&log, self.assistant.history_window())
                .iter()
                .map(ConversationMessage::to_turn)
                .collect();
            log.push(ConversationMessage::user(text));
            history
        };

        match self.assistant.reply(&history, text).await {
            Ok(reply) => {
                self.log.write().await.push(reply.clone());
                *self.last_error.write().await = None;
                info!(
                    session_id = %self.id,
                    games = reply.recommended_games.len(),
                    "reply appended"
                );
                SubmitOutcome::Replied(reply)
            }
            Err(failure) => {
                let message = self.assistant.fallback().to_message();
                self.log.write().await.push(message.clone());
                *self.last_error.write().await = Some(failure.clone());
                info!(
                    session_id = %self.id,
                    kind = %failure.kind(),
                    "fallback appended"
                );
                SubmitOutcome::FellBack { message, failure }
            }
        }
    }
}
