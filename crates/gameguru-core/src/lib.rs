// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for GameGuru.
//!
//! Foundational trait definitions, error types, and the domain types shared by
//! the catalog, completion client, and conversation orchestrator.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{CompletionFailure, FailureKind, GameGuruError, Remediation};
pub use types::{
    AdapterType, ChatTurn, CompletionRequest, CompletionResponse, ConversationMessage,
    GameRecord, HealthStatus, MessageId, MessageKind, Role, Sender, SessionId, TokenUsage,
};

pub use traits::{CompletionAdapter, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        let s = AdapterType::Completion.to_string();
        assert_eq!(s, "Completion");
        let parsed = AdapterType::from_str(&s).expect("should parse back");
        assert_eq!(parsed, AdapterType::Completion);
        assert!(AdapterType::from_str("Gateway").is_err());
    }

    #[test]
    fn health_status_variants() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Degraded("slow".into()).is_healthy());
        assert!(!HealthStatus::Unhealthy("down".into()).is_healthy());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
        assert_ne!(MessageId::generate(), MessageId::generate());
    }

    #[test]
    fn traits_are_object_safe() {
        fn _assert_completion(_: &dyn CompletionAdapter) {}
        fn _assert_plugin(_: &dyn PluginAdapter) {}
    }
}
