use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use decksmith_core::impls::{InMemoryComboCorpus, load_cards, load_combos};
use decksmith_core::ports::CardCorpus;
use decksmith_core::{
    BudgetTier, CardQuery, EngineBuilder, EngineConfig, ErrorKind, StrategyFocus,
};

#[derive(Parser)]
#[command(name = "decksmith", about = "Commander deck recommendations over a card corpus snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a full deck list around a commander and print it as JSON.
    Recommend {
        #[arg(long)]
        commander: String,

        #[arg(long, default_value = "balanced")]
        focus: StrategyFocus,

        #[arg(long, default_value = "casual")]
        tier: BudgetTier,

        /// Card snapshot (JSON array of cards).
        #[arg(long)]
        cards: PathBuf,

        /// Combo snapshot (JSON object with `combos` and `staples`).
        #[arg(long)]
        combos: Option<PathBuf>,

        /// Engine config (TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a single corpus query, e.g. `type:creature mv<=2 order:-price`.
    Search {
        query: String,

        #[arg(long)]
        cards: PathBuf,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

/// Exit codes: 2 = commander not found, 3 = corpus failure.
fn exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::NotFound => ExitCode::from(2),
        ErrorKind::Upstream => ExitCode::from(3),
    }
}

async fn recommend(
    commander: &str,
    focus: StrategyFocus,
    tier: BudgetTier,
    cards: PathBuf,
    combos: Option<PathBuf>,
    config: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let config = match config {
        Some(path) => EngineConfig::from_path(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let cards = load_cards(&cards)?;
    let combos = match combos {
        Some(path) => load_combos(&path)?,
        None => InMemoryComboCorpus::default(),
    };

    let engine = EngineBuilder::new()
        .with_card_corpus(Arc::new(cards))
        .with_combo_corpus(Arc::new(combos))
        .with_config(config)
        .build()?;

    match engine.recommend(commander, focus, tier).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "recommendation failed");
            eprintln!("error: {e}");
            Ok(exit_code(e.kind()))
        }
    }
}

async fn search(query: &str, cards: PathBuf, limit: usize) -> anyhow::Result<ExitCode> {
    let query: CardQuery = query.parse().context("parsing query")?;
    let corpus = load_cards(&cards)?;
    let hits = corpus.search(&query, limit).await?;
    tracing::info!(%query, hits = hits.len(), "search finished");
    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decksmith_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Recommend {
            commander,
            focus,
            tier,
            cards,
            combos,
            config,
        } => recommend(&commander, focus, tier, cards, combos, config).await,
        Command::Search {
            query,
            cards,
            limit,
        } => search(&query, cards, limit).await,
    }
}
