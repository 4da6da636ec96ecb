//! `socdash`: query the dashboard backend through the resilient client.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use socdash_core::{ApiResponse, ClientConfig, EndpointPath, FallbackTable};
use socdash_runtime::ResilientClient;

/// Exit code for `fetch --strict` when fallback data was served.
const EXIT_FALLBACK: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "socdash", version, about = "Security-operations dashboard API client")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch an endpoint and print its payload (live or fallback)
    Fetch {
        /// Endpoint path relative to the base prefix, e.g. /dashboard/stats
        path: EndpointPath,

        /// Config file (YAML, or JSON by extension)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Backend URL, overrides config and SOCDASH_BACKEND_URL
        #[arg(long)]
        backend: Option<String>,

        /// Base prefix, overrides config and SOCDASH_BASE_PREFIX
        #[arg(long)]
        prefix: Option<String>,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,

        /// Exit with status 2 when fallback data was served
        #[arg(long)]
        strict: bool,
    },

    /// List fallback rules in match order
    Fallbacks {
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Show which fallback rule a path would be served from
    Explain { path: EndpointPath },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Table,
    Json,
    Yaml,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(
    path: Option<&PathBuf>,
    backend: Option<String>,
    prefix: Option<String>,
) -> Result<ClientConfig> {
    load_config_with(path, backend, prefix, |key| std::env::var(key).ok())
}

/// Layer file, environment and flags (later wins), then validate once.
fn load_config_with(
    path: Option<&PathBuf>,
    backend: Option<String>,
    prefix: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::read_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::default(),
    };
    let mut config = config.apply_overrides_from(env);

    if let Some(backend) = backend {
        config.backend_url = backend;
    }
    if let Some(prefix) = prefix {
        config.base_prefix = prefix;
    }
    config.validate()?;

    Ok(config)
}

/// One-line description of where a response came from.
fn describe(response: &ApiResponse) -> String {
    match response {
        ApiResponse::Live { status, .. } => format!("live ({status})"),
        ApiResponse::Fallback { reason, area, .. } => match area {
            Some(area) => format!("fallback [{area}] after: {reason}"),
            None => format!("fallback [generic] after: {reason}"),
        },
    }
}

fn explain(table: &FallbackTable, path: &EndpointPath) -> String {
    match table.resolve(path) {
        Some(rule) => format!(
            "{path} -> {} (pattern '{}')",
            rule.area, rule.pattern
        ),
        None => format!("{path} -> generic wrapper (no rule matches)"),
    }
}

fn render_rules(table: &FallbackTable, format: ListFormat) -> Result<String> {
    let rendered = match format {
        ListFormat::Table => table
            .rules()
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{:>2}  {:<12} {}", i + 1, rule.pattern, rule.area))
            .collect::<Vec<_>>()
            .join("\n"),
        ListFormat::Json => serde_json::to_string_pretty(table)?,
        ListFormat::Yaml => serde_yaml::to_string(table)?,
    };
    Ok(rendered)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Fetch {
            path,
            config,
            backend,
            prefix,
            compact,
            strict,
        } => {
            let config = load_config(config.as_ref(), backend, prefix)?;
            let client = ResilientClient::builder()
                .config(config)
                .build()
                .context("building client")?;

            let response = client.call(&path, None).await;
            eprintln!("{}: {}", client.target(&path), describe(&response));

            let payload = response.payload();
            let text = if compact {
                serde_json::to_string(payload)?
            } else {
                serde_json::to_string_pretty(payload)?
            };
            println!("{text}");

            if strict && response.is_fallback() {
                return Ok(ExitCode::from(EXIT_FALLBACK));
            }
        }
        Command::Fallbacks { format } => {
            println!("{}", render_rules(&FallbackTable::security_ops(), format)?);
        }
        Command::Explain { path } => {
            println!("{}", explain(&FallbackTable::security_ops(), &path));
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli).await
}
