// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring a session registry to the embedded catalog.
//!
//! `SessionHarness` builds the same assistant stack the server uses, with
//! a [`MockCompletion`] in place of the network adapter.

use std::sync::Arc;

use gameguru_agent::{Assistant, ConversationSession, SessionRegistry};
use gameguru_catalog::Catalog;
use gameguru_config::GameGuruConfig;
use gameguru_core::{FailureKind, GameGuruError};

use crate::mock_completion::MockCompletion;

/// Builder for [`SessionHarness`].
pub struct SessionHarnessBuilder {
    config: GameGuruConfig,
    mock: MockCompletion,
    failures: Vec<FailureKind>,
}

impl SessionHarnessBuilder {
    fn new() -> Self {
        Self {
            config: GameGuruConfig::default(),
            mock: MockCompletion::new(),
            failures: Vec::new(),
        }
    }

    /// Use a prepared mock (e.g. [`MockCompletion::gated`]).
    pub fn with_mock(mut self, mock: MockCompletion) -> Self {
        self.mock = mock;
        self
    }

    /// Script successful replies, in order.
    pub fn with_responses(mut self, responses: Vec<String>) -> Self {
        self.mock = MockCompletion::with_responses(responses);
        self
    }

    /// Script failures, queued after any scripted replies.
    pub fn with_failures(mut self, kinds: Vec<FailureKind>) -> Self {
        self.failures = kinds;
        self
    }

    pub fn with_history_window(mut self, k: usize) -> Self {
        self.config.agent.history_window = k;
        self
    }

    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.config.agent.max_sessions = max;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.agent.system_prompt = Some(prompt.into());
        self
    }

    /// Mutate the full config before building.
    pub fn configure(mut self, f: impl FnOnce(&mut GameGuruConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub async fn build(self) -> Result<SessionHarness, GameGuruError> {
        for kind in self.failures {
            self.mock.push_failure(kind).await;
        }
        let catalog = Arc::new(Catalog::builtin()?);
        let assistant = Arc::new(
            Assistant::from_config(&self.config, Arc::new(self.mock.clone()), Arc::clone(&catalog))
                .await?,
        );
        let registry = Arc::new(SessionRegistry::new(assistant, &self.config.agent));
        Ok(SessionHarness {
            config: self.config,
            catalog,
            mock: self.mock,
            registry,
        })
    }
}

/// A ready-to-use registry backed by a mock completion adapter.
pub struct SessionHarness {
    config: GameGuruConfig,
    catalog: Arc<Catalog>,
    mock: MockCompletion,
    registry: Arc<SessionRegistry>,
}

impl SessionHarness {
    pub fn builder() -> SessionHarnessBuilder {
        SessionHarnessBuilder::new()
    }

    pub fn config(&self) -> &GameGuruConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn mock(&self) -> &MockCompletion {
        &self.mock
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Opens a session, panicking if the registry is full.
    pub fn start(&self) -> Arc<ConversationSession> {
        self.registry
            .start_session()
            .unwrap_or_else(|e| panic!("failed to start session: {e}"))
    }
}
