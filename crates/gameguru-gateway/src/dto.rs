// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire shapes for the gateway. Domain types stay free of HTTP concerns;
//! everything here is a plain mapping.

use gameguru_agent::{ConversationSession, SessionState};
use gameguru_core::{
    CompletionFailure, ConversationMessage, FailureKind, GameRecord, MessageKind, Remediation,
    Sender,
};
use serde::{Deserialize, Serialize};

/// A recommended game as attached to a chat message.
#[derive(Debug, Serialize)]
pub struct GameCard {
    pub id: String,
    pub name: String,
    pub players: String,
    pub play_time: String,
    pub difficulty: u8,
    pub summary: String,
}

impl From<&GameRecord> for GameCard {
    fn from(game: &GameRecord) -> Self {
        Self {
            id: game.id.clone(),
            name: game.name.clone(),
            players: game.players.clone(),
            play_time: game.play_time.clone(),
            difficulty: game.difficulty,
            summary: game.card_summary(),
        }
    }
}

/// One log entry.
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: String,
    pub sender: Sender,
    pub kind: MessageKind,
    pub text: String,
    /// RFC 3339.
    pub timestamp: String,
    pub recommended_games: Vec<GameCard>,
}

impl From<&ConversationMessage> for MessageView {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            id: message.id.0.clone(),
            sender: message.sender,
            kind: message.kind,
            text: message.text.clone(),
            timestamp: message.timestamp.to_rfc3339(),
            recommended_games: message
                .recommended_games
                .iter()
                .map(|g| GameCard::from(g.as_ref()))
                .collect(),
        }
    }
}

/// The dismissible error banner shown after a failed turn.
#[derive(Debug, Serialize)]
pub struct ErrorBanner {
    pub kind: FailureKind,
    pub message: &'static str,
    pub remediation: Remediation,
}

impl From<&CompletionFailure> for ErrorBanner {
    fn from(failure: &CompletionFailure) -> Self {
        let kind = failure.kind();
        Self {
            kind,
            message: kind.user_message(),
            remediation: kind.remediation(),
        }
    }
}

/// Full view of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub state: SessionState,
    pub created_at: String,
    pub messages: Vec<MessageView>,
    pub error: Option<ErrorBanner>,
}

impl SessionView {
    pub async fn capture(session: &ConversationSession) -> Self {
        let messages = session.snapshot().await;
        let error = session.last_error().await;
        Self {
            id: session.id().0.clone(),
            state: session.state(),
            created_at: session.created_at().to_rfc3339(),
            messages: messages.iter().map(MessageView::from).collect(),
            error: error.as_ref().map(ErrorBanner::from),
        }
    }
}

/// Body of `POST /v1/sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

/// Whether a submission got a model reply or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    Replied,
    FellBack,
}

/// Response to an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: TurnOutcome,
    pub message: MessageView,
    pub session: SessionView,
}

/// Query string of `GET /v1/games`.
#[derive(Debug, Default, Deserialize)]
pub struct GamesQuery {
    /// Free-text term matched against name, description and categories.
    pub q: Option<String>,
    pub players: Option<u32>,
    pub max_difficulty: Option<u8>,
    pub max_learning_curve: Option<u8>,
    pub category: Option<String>,
}

// --- Stateless chat proxy (`/api/*`, camelCase) ---

/// Body of `POST /api/chat`.
///
/// Fields are loosely typed so malformed history entries can be dropped
/// instead of rejecting the whole request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    /// Anything other than an array is treated as no history.
    #[serde(default)]
    pub conversation_history: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
    pub recommended_games: Vec<GameCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub port: u16,
    pub version: String,
    pub uptime_secs: u64,
    pub openai_configured: bool,
    pub catalog_size: usize,
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub endpoints: Vec<&'static str>,
}

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_tolerates_missing_fields() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());
        assert!(req.conversation_history.is_none());

        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","conversationHistory":[{"role":"user"},42]}"#,
        )
        .unwrap();
        assert_eq!(req.message.unwrap().as_str(), Some("hi"));
        assert_eq!(req.conversation_history.unwrap().as_array().unwrap().len(), 2);

        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","conversationHistory":"oops"}"#).unwrap();
        assert_eq!(req.conversation_history, Some(serde_json::json!("oops")));
    }

    #[test]
    fn error_response_omits_absent_kind() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "nope".into(),
            kind: None,
            timestamp: "t".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"nope","timestamp":"t"}"#);
    }

    #[test]
    fn banner_carries_user_message_and_remediation() {
        let banner = ErrorBanner::from(&CompletionFailure::Timeout {
            after: std::time::Duration::from_secs(30),
        });
        let json = serde_json::to_value(&banner).unwrap();
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["remediation"], "check_connectivity");
        assert_eq!(json["message"], "Request timeout. Please try again.");
    }

    #[test]
    fn health_response_uses_camel_case() {
        let json = serde_json::to_value(HealthResponse {
            status: "ok".into(),
            timestamp: "t".into(),
            port: 5000,
            version: "0.1.0".into(),
            uptime_secs: 3,
            openai_configured: true,
            catalog_size: 40,
        })
        .unwrap();
        assert_eq!(json["openaiConfigured"], true);
        assert_eq!(json["catalogSize"], 40);
    }
}
