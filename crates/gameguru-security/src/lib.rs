// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction and outbound URL policy for GameGuru.

pub mod redact;
pub mod tls;

pub use redact::{redact, RedactingWriter};
pub use tls::{is_localhost, validate_url};
