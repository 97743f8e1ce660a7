// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation orchestration for GameGuru.
//!
//! - [`Assistant`] runs one completion turn and annotates the reply with the
//!   catalog games it names.
//! - [`ConversationSession`] owns a conversation log and enforces one request
//!   in flight at a time.
//! - [`SessionRegistry`] tracks live sessions up to a configured capacity.

pub mod assistant;
pub mod fallback;
pub mod prompt;
pub mod registry;
pub mod session;

pub use assistant::Assistant;
pub use fallback::FallbackReply;
pub use prompt::{default_system_prompt, load_system_prompt};
pub use registry::SessionRegistry;
pub use session::{ConversationSession, RejectReason, SessionState, SubmitOutcome};
