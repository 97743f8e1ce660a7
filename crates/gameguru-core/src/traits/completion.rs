// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for remote text-generation services.

use async_trait::async_trait;

use crate::error::CompletionFailure;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a remote chat-completion service.
///
/// Implementations make exactly one attempt per call and never retry.
/// Every failure is returned as a classified [`CompletionFailure`].
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends the conversation and returns the generated reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionFailure>;
}
