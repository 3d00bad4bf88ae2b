use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use iacline::config::Config;
use iacline::file::loader::{load_source, normalize_line_endings};
use iacline::resolver::{resolve_walk, Walk, WalkState};
use iacline::violation::{read_violations, render_text, resolve_violations};

/// iacline - Resolve policy violation paths to source lines
#[derive(Parser)]
#[command(name = "iacline")]
#[command(version)]
#[command(about = "Resolve policy violation paths to source lines", long_about = None)]
struct Cli {
    /// Output format: text or json (default: from config)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one path inside one document
    Resolve {
        /// YAML/JSON document (use - for stdin)
        file: String,

        /// Path of the field, e.g. spec.containers[0].image
        path: String,

        /// Line to fall back to (default: from config)
        #[arg(short, long)]
        start_line: Option<usize>,
    },
    /// Resolve a JSON array of violation records
    Batch {
        /// JSON file with violation records (use - for stdin)
        violations: String,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    file: &'a str,
    path: &'a str,
    line: usize,
    state: WalkState,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load();
    let format = cli.format.unwrap_or_else(|| config.output_format.clone());
    let json = match format.as_str() {
        "json" => true,
        "text" => false,
        other => anyhow::bail!("Unknown output format '{}', expected text or json", other),
    };

    match cli.command {
        Command::Resolve {
            file,
            path,
            start_line,
        } => {
            let start_line = start_line.unwrap_or(config.default_start_line);
            let mut data = load_source(&file)?;
            if config.normalize_line_endings {
                data = normalize_line_endings(&data);
            }

            let walk = match resolve_walk(&data, &path, start_line) {
                Ok(walk) => walk,
                Err(err) if config.fallback_on_error => {
                    log::warn!("{} '{}': {}, using start line {}", file, path, err, start_line);
                    Walk {
                        line: start_line,
                        state: WalkState::FallenBack,
                    }
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Failed to resolve '{}' in {}", path, file))
                }
            };

            if json {
                let resolution = Resolution {
                    file: &file,
                    path: &path,
                    line: walk.line,
                    state: walk.state,
                };
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                println!("{}", walk.line);
            }
        }
        Command::Batch { violations } => {
            let records = read_violations(&load_source(&violations)?)?;
            let resolved = resolve_violations(&records, |name| load_source(name), &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                print!("{}", render_text(&resolved));
            }
        }
    }

    Ok(())
}
