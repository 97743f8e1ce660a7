// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live session registry with a capacity limit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use gameguru_config::model::AgentConfig;
use gameguru_core::{GameGuruError, SessionId};
use tracing::{debug, info, warn};

use crate::assistant::Assistant;
use crate::session::ConversationSession;

/// Owns every live session. Sessions share nothing but the [`Assistant`].
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<ConversationSession>>,
    live: AtomicUsize,
    assistant: Arc<Assistant>,
    greeting: String,
    cleared_greeting: String,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(assistant: Arc<Assistant>, agent: &AgentConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            live: AtomicUsize::new(0),
            assistant,
            greeting: agent.greeting.clone(),
            cleared_greeting: agent.cleared_greeting.clone(),
            max_sessions: agent.max_sessions,
        }
    }

    pub fn assistant(&self) -> &Arc<Assistant> {
        &self.assistant
    }

    /// Opens a new session seeded with the greeting.
    pub fn start_session(&self) -> Result<Arc<ConversationSession>, GameGuruError> {
        self.live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_sessions).then_some(n + 1)
            })
            .map_err(|_| {
                warn!(max = self.max_sessions, "session capacity reached");
                GameGuruError::Capacity {
                    max: self.max_sessions,
                }
            })?;

        let id = SessionId::generate();
        let session = Arc::new(ConversationSession::new(
            id.clone(),
            Arc::clone(&self.assistant),
            &self.greeting,
        ));
        self.sessions.insert(id.clone(), Arc::clone(&session));
        info!(session_id = %id, live = self.len(), "session opened");
        Ok(session)
    }

    pub fn get(&self, id: &SessionId) -> Result<Arc<ConversationSession>, GameGuruError> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| GameGuruError::SessionNotFound { id: id.to_string() })
    }

    /// Discards a session and its log.
    pub fn end_session(&self, id: &SessionId) -> Result<(), GameGuruError> {
        match self.sessions.remove(id) {
            Some(_) => {
                self.live.fetch_sub(1, Ordering::AcqRel);
                info!(session_id = %id, "session ended");
                Ok(())
            }
            None => Err(GameGuruError::SessionNotFound { id: id.to_string() }),
        }
    }

    /// Clears the chat: the session keeps its id but restarts from the
    /// "chat cleared" greeting with an empty error banner.
    pub fn reset_session(&self, id: &SessionId) -> Result<Arc<ConversationSession>, GameGuruError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| GameGuruError::SessionNotFound { id: id.to_string() })?;
        let fresh = Arc::new(ConversationSession::new(
            id.clone(),
            Arc::clone(&self.assistant),
            &self.cleared_greeting,
        ));
        *entry = Arc::clone(&fresh);
        debug!(session_id = %id, "session reset");
        Ok(fresh)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
