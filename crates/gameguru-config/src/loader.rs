// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./gameguru.toml` > `~/.config/gameguru/gameguru.toml` >
//! `/etc/gameguru/gameguru.toml` with environment variable overrides via `GAMEGURU_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GameGuruConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/gameguru/gameguru.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "gameguru.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gameguru/gameguru.toml` (system-wide)
/// 3. `~/.config/gameguru/gameguru.toml` (user XDG config)
/// 4. `./gameguru.toml` (local directory)
/// 5. `GAMEGURU_*` environment variables
pub fn load_config() -> Result<GameGuruConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GameGuruConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GameGuruConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GameGuruConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GameGuruConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GameGuruConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/gameguru/gameguru.toml`, when a config dir exists on this platform.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("gameguru").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing keys
/// survive: `GAMEGURU_OPENAI_API_KEY` must map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("GAMEGURU_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config path.
fn map_env_key(key: &str) -> String {
    for section in ["agent", "openai", "gateway", "fallback"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
