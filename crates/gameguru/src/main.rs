// SPDX-FileCopyrightText: 2026 GameGuru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GameGuru - a board game recommendation assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gameguru_config::{ConfigError, GameGuruConfig};

/// GameGuru - a board game recommendation assistant.
#[derive(Parser, Debug)]
#[command(name = "gameguru", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Inspect GameGuru configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate configuration and print the effective values (secrets masked).
    Check,
}

fn load(path: Option<&PathBuf>) -> Result<GameGuruConfig, Vec<ConfigError>> {
    match path {
        Some(path) => gameguru_config::load_and_validate_path(path),
        None => gameguru_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            gameguru_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config {
            action: ConfigAction::Check,
        }) => match gameguru_config::render_toml(&config) {
            Ok(rendered) => {
                eprintln!("gameguru: configuration is valid");
                print!("{rendered}");
            }
            Err(e) => {
                gameguru_config::render_errors(&[e]);
                std::process::exit(1);
            }
        },
        None => {
            println!("gameguru: use --help for available commands");
        }
    }
}
