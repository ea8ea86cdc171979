//! kikitori CLI — audio vocabulary drills in the terminal.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod audio;
mod drill;
mod wanikani;

use audio::AudioPlayer;
use wanikani::WaniKaniClient;

#[derive(Parser)]
#[command(name = "kikitori", version, about = "WaniKani audio vocabulary drills in the terminal")]
struct Cli {
    /// Levels to draw vocabulary from (comma-separated, e.g. "1,2,3")
    #[arg(long, default_value = "1")]
    levels: String,

    /// Maximum number of items in the session
    #[arg(long, default_value = "100")]
    limit: usize,

    /// WaniKani API token (falls back to WANIKANI_API_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// External command used to play audio (e.g. "mpv"); without one the
    /// item's characters are shown instead
    #[arg(long)]
    player: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kikitori=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let levels = parse_levels(&cli.levels)?;
    let token = cli
        .token
        .or_else(|| std::env::var("WANIKANI_API_TOKEN").ok())
        .context("no API token; pass --token or set WANIKANI_API_TOKEN")?;

    let client = WaniKaniClient::new(&token);
    let items = client
        .fetch_vocab_for_levels(&levels, cli.limit)
        .await
        .context("failed to fetch vocabulary")?;
    info!(count = items.len(), ?levels, "vocabulary loaded");

    if items.is_empty() {
        println!("No quizzable vocabulary found for levels {}.", cli.levels);
        return Ok(());
    }

    let player = AudioPlayer::new(cli.player);
    drill::run_session(items, &player)
}

fn parse_levels(raw: &str) -> anyhow::Result<Vec<u32>> {
    let levels = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().with_context(|| format!("invalid level '{s}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    anyhow::ensure!(!levels.is_empty(), "no levels given");
    Ok(levels)
}
