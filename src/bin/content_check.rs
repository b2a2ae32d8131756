/**
 * Content Check
 *
 * Runs a message document through validation and sanitization from the
 * command line, printing the sanitized JSON. With `--rank <query>` the input
 * is a JSON array of search candidates instead, printed in ranked order.
 *
 * ```text
 * aigm-content [FILE]
 * aigm-content --rank <QUERY> [FILE]
 * ```
 *
 * Input is read from FILE, or stdin when FILE is omitted or `-`.
 * Exit status is 2 when the document is rejected and 1 on usage or I/O errors.
 */

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use aigm::shared::content;
use aigm::shared::search::{self, Candidate};
use aigm::shared::AppConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Validate and sanitize a message document, or rank search candidates
#[derive(Parser)]
#[command(name = "aigm-content", version)]
struct Cli {
    /// Rank a JSON array of candidates against QUERY instead of checking a document
    #[arg(long, value_name = "QUERY")]
    rank: Option<String>,

    /// Input file; stdin when omitted or `-`
    file: Option<PathBuf>,
}

/// A candidate as given on input; unknown fields pass through unchanged
#[derive(Debug, Serialize, Deserialize)]
struct RankEntry {
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl Candidate for RankEntry {
    fn username(&self) -> &str {
        &self.username
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

#[cfg(feature = "ssr")]
fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "ssr"))]
fn init_tracing(_config: &AppConfig) {}

fn run(cli: Cli) -> Result<String, (ExitCode, String)> {
    let io_error = |e: std::io::Error| (ExitCode::from(1), format!("failed to read input: {}", e));
    let json_error = |e: serde_json::Error| (ExitCode::from(1), format!("invalid JSON: {}", e));

    let input = read_input(cli.file.as_deref()).map_err(io_error)?;

    match cli.rank {
        None => {
            let doc: serde_json::Value = serde_json::from_str(&input).map_err(json_error)?;

            let valid = content::validate(&doc).map_err(|e| {
                tracing::debug!(error = %e, "document rejected");
                (ExitCode::from(2), e.to_string())
            })?;
            tracing::info!(text_length = valid.text_length(), "document accepted");

            serde_json::to_string_pretty(&content::sanitize(&valid)).map_err(json_error)
        }
        Some(query) => {
            let entries: Vec<RankEntry> = serde_json::from_str(&input).map_err(json_error)?;

            let ranked = search::rank(entries, &query);
            serde_json::to_string_pretty(&ranked).map_err(json_error)
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    #[cfg(feature = "ssr")]
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return ExitCode::from(1);
        }
    };
    init_tracing(&config);

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err((code, message)) => {
            eprintln!("{}", message);
            code
        }
    }
}
