// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport policy for the completion endpoint URL.

use gameguru_core::GameGuruError;
use tracing::error;

/// Validate an outbound base URL.
///
/// Localhost URLs may use any scheme; remote URLs must use HTTPS so the
/// bearer credential never crosses the network in clear text.
pub fn validate_url(url: &str) -> Result<(), GameGuruError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| GameGuruError::Config(format!("invalid URL `{url}`: {e}")))?;

    let host = parsed.host_str().unwrap_or("");
    if is_localhost(host) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        error!(url = %url, "TLS required for remote completion endpoint");
        return Err(GameGuruError::Config(format!(
            "`{url}` must use https for a remote host"
        )));
    }

    Ok(())
}

/// Check if a host refers to the local machine.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "localhost" | "::1" | "[::1]") || host.starts_with("127.")
}
