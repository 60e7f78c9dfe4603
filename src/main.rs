//! headerset command line.
//!
//! Renders the headers a registry configuration would write onto a
//! response, without serving anything.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use headerset::config::{load_config, load_seed, Defaults};
use headerset::observability::logging::init_logging;
use headerset::{HeaderRegistry, RegistryConfig, Seed};

#[derive(Parser)]
#[command(name = "headerset")]
#[command(about = "Render HTTP response headers from a registry configuration", long_about = None)]
struct Cli {
    /// Registry configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headers the registry would write
    Render {
        /// Seed file holding `seed = "safe"` or a `[seed]` table.
        #[arg(short, long, conflicts_with = "safe")]
        seed: Option<PathBuf>,

        /// Seed with the safe profile.
        #[arg(long)]
        safe: bool,

        /// Set a header (or nickname) before rendering, as NAME=VALUE.
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,

        /// Mark a header (or nickname) as removed.
        #[arg(long = "remove", value_name = "NAME")]
        removals: Vec<String>,

        /// Print a JSON object instead of header lines.
        #[arg(long)]
        json: bool,
    },
    /// List nickname paths and the headers they stand for
    Nicknames,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("headerset=warn")?;
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RegistryConfig::default(),
    };

    match cli.command {
        Commands::Render {
            seed,
            safe,
            assignments,
            removals,
            json,
        } => {
            let seed = match (seed, safe) {
                (_, true) => Seed::Safe,
                (Some(path), false) => load_seed(&path)?,
                (None, false) => Seed::default(),
            };

            let mut registry = HeaderRegistry::new(seed, config)?;
            for (name, value) in assignments {
                registry.get(&name).set(value);
            }
            for name in removals {
                registry.get(&name).remove();
            }

            let written = registry.render();
            if json {
                println!("{}", serde_json::to_string_pretty(&written)?);
            } else {
                for (name, value) in &written {
                    println!("{name}: {value}");
                }
            }
        }
        Commands::Nicknames => {
            let nicknames = Defaults::builtin().nicknames.merged(&config.nicknames);
            for (path, canonical) in nicknames.paths() {
                println!("{path} -> {canonical}");
            }
        }
    }

    Ok(())
}
