//! Research Explorer - Entry Point
//!
//! Line-oriented interactive session over stdin/stdout. Logs go to stderr.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use research_explorer::{Command, Config, Explorer, Outcome, SessionState};

#[derive(Parser, Debug)]
#[command(name = "research-explorer")]
#[command(about = "Interactive research-paper discovery on Semantic Scholar")]
#[command(version)]
struct Cli {
    /// Semantic Scholar API key (overrides .env and SEMANTIC_SCHOLAR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Search to run before the first prompt
    query: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?config, "Starting research explorer");

    let explorer = Explorer::new(&config)?;
    run_session(&explorer, cli.query).await
}

async fn run_session(explorer: &Explorer, initial: Option<String>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut state = SessionState::new();
    let mut line = String::new();

    stdout
        .write_all(b"Research Explorer. Type a topic, DOI, or paper URL; 'help' for commands.\n")
        .await?;

    if let Some(query) = initial {
        let outcome = explorer.dispatch(&mut state, Command::Search(query)).await;
        write_block(&mut stdout, &outcome.render(&state, explorer.page_size())).await?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match Command::parse(trimmed) {
            Ok(command) => command,
            Err(e) => {
                write_block(&mut stdout, &e.to_user_message()).await?;
                continue;
            }
        };

        tracing::debug!(?command, "Dispatching command");
        let outcome = explorer.dispatch(&mut state, command).await;
        write_block(&mut stdout, &outcome.render(&state, explorer.page_size())).await?;

        if matches!(outcome, Outcome::Quit) {
            break;
        }
    }

    Ok(())
}

async fn write_block(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n\n").await?;
    stdout.flush().await
}
