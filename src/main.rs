use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use futures::future::join_all;
use fyyur_client::{
    format_datetime, handle_delete_venue, load_config, parse_iso_string, DateFormat, DeleteOutcome,
    HttpVenueClient, LogNavigator,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Fyyur venue helpers")]
struct Cli {
    /// JSON config file; defaults are used if it does not exist
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a loosely delimited ISO-8601 timestamp
    Parse {
        timestamp: String,
        /// Render as `full` or `medium` instead of RFC 3339
        #[arg(long)]
        format: Option<DateFormat>,
    },
    /// Delete venues by id, then redirect on success
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for results.
    // Delete failures are debug events, so they are shown by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fyyur_client=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { timestamp, format } => parse(&timestamp, format),
        Command::Delete { ids } => delete(&cli.config, &ids).await,
    }
}

fn parse(timestamp: &str, format: Option<DateFormat>) -> ExitCode {
    match parse_iso_string(timestamp) {
        Ok(dt) => {
            match format {
                Some(format) => println!("{}", format_datetime(&dt, format)),
                None => println!("{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Cannot parse '{}': {}", timestamp, e);
            ExitCode::FAILURE
        }
    }
}

async fn delete(config_path: &Path, ids: &[String]) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpVenueClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Deleting {} venue(s) via {}", ids.len(), config.base_url);

    // every id is its own request, nothing is de-duplicated
    let tasks = ids
        .iter()
        .map(|id| handle_delete_venue(&client, &LogNavigator, id, &config.redirect_to));
    let results = join_all(tasks).await;

    // the handler already logged each failure and refusal
    let mut deleted = 0;
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(DeleteOutcome::Redirected { .. }) => deleted += 1,
            Ok(DeleteOutcome::NotDeleted) => {}
            Err(_) => failed += 1,
        }
    }
    info!(
        "Done: {} deleted, {} not deleted, {} failed",
        deleted,
        results.len() - deleted - failed,
        failed
    );

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
