// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt resolution.

use gameguru_catalog::Catalog;
use gameguru_config::model::AgentConfig;
use tracing::{info, warn};

const BASE_PROMPT: &str = "You are an expert board game recommendation assistant for a web application.

Your role is to:
1. Recommend games based on user preferences (player count, time, complexity, theme, etc.)
2. Explain WHY each game fits their criteria
3. Provide helpful details about gameplay, mechanics, and what makes each game special
4. Be conversational and enthusiastic about board games
5. When recommending games, mention their exact names clearly so users can learn more
6. Keep responses concise but informative (aim for 2-4 sentences per game)";

/// The built-in prompt: assistant instructions plus every catalog name.
pub fn default_system_prompt(catalog: &Catalog) -> String {
    let mut prompt = String::from(BASE_PROMPT);
    prompt.push_str("\n\nGames in the catalog:\n");
    for name in catalog.names() {
        prompt.push_str("- ");
        prompt.push_str(name);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nWhen you recommend one of these games, write its name exactly as listed above.\n\
         Be helpful, knowledgeable, and passionate about board games!",
    );
    prompt
}

/// Loads the system prompt following priority: file > inline > default.
///
/// An unreadable or empty file is logged and skipped.
pub async fn load_system_prompt(agent: &AgentConfig, catalog: &Catalog) -> String {
    if let Some(file_path) = &agent.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = %file_path, "loaded system prompt from file");
                    return trimmed.to_string();
                }
                warn!(path = %file_path, "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = %file_path,
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(prompt) = &agent.system_prompt
        && !prompt.trim().is_empty()
    {
        return prompt.clone();
    }

    default_system_prompt(catalog)
}
