// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for GameGuru.
//!
//! Exposes the session API under `/v1/sessions`, catalog lookup under
//! `/v1/games`, and the stateless chat proxy under `/api`. Handlers only map
//! between JSON and the agent crate; no conversation logic lives here.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod server;
pub mod sessions;

pub use error::ApiError;
pub use server::{router, start_server, GatewayState};
