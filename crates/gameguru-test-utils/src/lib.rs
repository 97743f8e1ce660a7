// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for GameGuru integration tests.
//!
//! - [`MockCompletion`] - scripted completion adapter that records requests
//! - [`SessionHarness`] - registry wired to the embedded catalog and a mock

pub mod harness;
pub mod mock_completion;

pub use harness::SessionHarness;
pub use mock_completion::MockCompletion;
