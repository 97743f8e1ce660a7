// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One completion turn: window the history, call the model, annotate the reply.

use std::sync::Arc;

use gameguru_catalog::{Catalog, NameMatcher};
use gameguru_config::GameGuruConfig;
use gameguru_core::{
    ChatTurn, CompletionAdapter, CompletionFailure, CompletionRequest, ConversationMessage,
    GameGuruError,
};
use tracing::{debug, info, warn};

use crate::fallback::FallbackReply;
use crate::prompt::load_system_prompt;

/// Everything a turn needs, shared by all sessions.
pub struct Assistant {
    provider: Arc<dyn CompletionAdapter>,
    matcher: Arc<NameMatcher>,
    fallback: FallbackReply,
    system_prompt: String,
    history_window: usize,
}

impl Assistant {
    pub fn new(
        provider: Arc<dyn CompletionAdapter>,
        matcher: Arc<NameMatcher>,
        fallback: FallbackReply,
        system_prompt: String,
        history_window: usize,
    ) -> Self {
        Self {
            provider,
            matcher,
            fallback,
            system_prompt,
            history_window: history_window.max(1),
        }
    }

    /// Builds the assistant from configuration: compiles name patterns,
    /// resolves the fallback shortlist and loads the system prompt.
    pub async fn from_config(
        config: &GameGuruConfig,
        provider: Arc<dyn CompletionAdapter>,
        catalog: Arc<Catalog>,
    ) -> Result<Self, GameGuruError> {
        let fallback = FallbackReply::resolve(&config.fallback, &catalog)?;
        let system_prompt = load_system_prompt(&config.agent, &catalog).await;
        let matcher = Arc::new(NameMatcher::new(catalog)?);
        info!(
            provider = provider.name(),
            history_window = config.agent.history_window,
            "assistant initialized"
        );
        Ok(Self::new(
            provider,
            matcher,
            fallback,
            system_prompt,
            config.agent.history_window,
        ))
    }

    pub fn provider(&self) -> &Arc<dyn CompletionAdapter> {
        &self.provider
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.matcher.catalog()
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }

    pub fn fallback(&self) -> &FallbackReply {
        &self.fallback
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Calls the model once with the last `history_window` turns of `history`
    /// and returns the reply annotated with the games it names.
    pub async fn reply(
        &self,
        history: &[ChatTurn],
        user_text: &str,
    ) -> Result<ConversationMessage, CompletionFailure> {
        let request = CompletionRequest {
            system_prompt: self.system_prompt.clone(),
            history: window(history, self.history_window).to_vec(),
            user_message: user_text.to_string(),
        };
        debug!(history = request.history.len(), "requesting completion");

        match self.provider.complete(request).await {
            Ok(response) => {
                let games = self.matcher.find_mentioned_games(&response.text);
                debug!(
                    games = games.len(),
                    finish_reason = ?response.finish_reason,
                    "completion succeeded"
                );
                Ok(ConversationMessage::reply(response.text, games))
            }
            Err(failure) => {
                warn!(kind = %failure.kind(), "completion failed, using fallback");
                Err(failure)
            }
        }
    }
}

/// The most recent `k` items, oldest first.
pub fn window<T>(items: &[T], k: usize) -> &[T] {
    &items[items.len().saturating_sub(k)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_tail() {
        let items: Vec<u32> = (0..15).collect();
        assert_eq!(window(&items, 10), &items[5..]);
        assert_eq!(window(&items[..3], 10), &items[..3]);
        assert!(window::<u32>(&[], 10).is_empty());
    }
}
