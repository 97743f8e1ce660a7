// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion adapter for deterministic testing.
//!
//! `MockCompletion` pops scripted outcomes from a FIFO queue and records
//! every request it receives. A gated mock holds each call until the test
//! releases it, which makes the Awaiting window observable.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gameguru_core::{
    AdapterType, CompletionAdapter, CompletionFailure, CompletionRequest, CompletionResponse,
    FailureKind, GameGuruError, HealthStatus, PluginAdapter, TokenUsage,
};
use tokio::sync::{Mutex, Semaphore};

type Scripted = Result<String, CompletionFailure>;

/// A scripted completion adapter.
///
/// When the queue is empty, `"mock response"` is returned.
#[derive(Clone, Default)]
pub struct MockCompletion {
    outcomes: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads successful replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            ..Self::default()
        }
    }

    /// A mock whose calls block until [`release`](Self::release) is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub async fn push_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    pub async fn push_failure(&self, kind: FailureKind) {
        self.outcomes
            .lock()
            .await
            .push_back(Err(CompletionFailure::from_kind(kind)));
    }

    /// Lets one held call proceed.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Polls until at least `n` calls have arrived. Panics after five seconds.
    pub async fn wait_for_calls(&self, n: usize) {
        let waited = tokio::time::timeout(Duration::from_secs(5), async {
            while self.call_count().await < n {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(waited.is_ok(), "timed out waiting for {n} completion calls");
    }
}

#[async_trait]
impl PluginAdapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, GameGuruError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GameGuruError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for MockCompletion {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionFailure> {
        let call = {
            let mut requests = self.requests.lock().await;
            requests.push(request);
            requests.len()
        };
        if let Some(gate) = &self.gate {
            // A closed semaphore only happens if the test dropped it; proceed.
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        let text = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))?;
        Ok(CompletionResponse {
            id: format!("mock-{call}"),
            text,
            model: "mock-model".to_string(),
            finish_reason: Some("stop".to_string()),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            }),
        })
    }
}
