//! Test hand generator - Main Binary
//!
//! Draws Pokémon TCG opening hands from an exported deck list

use anyhow::Context;
use clap::{Parser, Subcommand};
use pkmn_test_hand::{
    loader::{DeckLoader, TcgdexClient},
    CardImageResolver, Config, DeckInput, HandAttempt, HandError, Session,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "testhand")]
#[command(about = "Pokémon TCG test hand generator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML)
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw opening hands from a deck list
    Draw {
        /// Deck list file (PTCG Live export)
        #[arg(value_name = "DECK_FILE")]
        deck: PathBuf,

        /// Number of hands to draw
        #[arg(long, short = 'n', default_value_t = 1)]
        hands: usize,

        /// Set random seed for reproducible hands
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after this many draws per hand
        #[arg(long)]
        max_attempts: Option<usize>,

        /// Fetch every card of the deck before drawing
        #[arg(long)]
        prefetch: bool,

        /// Print hands as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed card counts of a deck list
    Parse {
        /// Deck list file (PTCG Live export)
        #[arg(value_name = "DECK_FILE")]
        deck: PathBuf,
    },

    /// Resolve individual card names to images
    Resolve {
        /// Card names such as "Pikachu SVI 70"
        #[arg(value_name = "CARD_NAME", required = true)]
        cards: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Draw {
            deck,
            hands,
            seed,
            max_attempts,
            prefetch,
            json,
        } => {
            if max_attempts.is_some() {
                config.max_attempts = max_attempts;
            }
            run_draw(config, &deck, hands, seed, prefetch, json).await?
        }
        Commands::Parse { deck } => run_parse(&deck)?,
        Commands::Resolve { cards } => run_resolve(config, &cards).await?,
    }

    Ok(())
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

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn read_deck(path: &Path) -> anyhow::Result<DeckInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck list {}", path.display()))?;
    Ok(DeckInput::new(content))
}

async fn run_draw(
    config: Config,
    deck_path: &Path,
    hands: usize,
    seed: Option<u64>,
    prefetch: bool,
    json: bool,
) -> anyhow::Result<()> {
    let input = read_deck(deck_path)?;
    let session = Session::from_config(config, seed)?;

    if prefetch {
        let (loaded, duration) = session.prefetch(&input).await?;
        eprintln!("Prefetched {loaded} cards in {duration:?}");
    }

    for _ in 0..hands {
        match session.submit_deck(&input).await {
            Ok(hand) if !json => print_hand(session.len().await, &hand),
            Ok(_) => {}
            Err(e @ HandError::DeckTooSmall { .. }) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session.hands().await)?);
    }

    Ok(())
}

fn print_hand(number: usize, hand: &HandAttempt) {
    let draws = if hand.attempts == 1 { "draw" } else { "draws" };
    println!("Hand {number} ({} {draws})", hand.attempts);
    for (idx, (card, image)) in hand.cards.iter().zip(&hand.images).enumerate() {
        println!("  {}. {card:<40} {image}", idx + 1);
    }
}

fn run_parse(deck_path: &Path) -> anyhow::Result<()> {
    let deck = DeckLoader::load_from_file(deck_path)
        .with_context(|| format!("failed to read deck list {}", deck_path.display()))?;

    for count in deck.counts() {
        println!("{:>3} {}", count.count, count.card_name);
    }
    println!("Total Cards: {}", deck.total_cards());

    Ok(())
}

async fn run_resolve(config: Config, cards: &[String]) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let client = Arc::new(TcgdexClient::new(Arc::clone(&config))?);
    let resolver = CardImageResolver::new(client, config);

    for name in cards {
        let card = resolver.resolve(name).await;
        let basic = if card.basic_creature { " [Basic]" } else { "" };
        println!("{name}: {}{basic}", card.image);
    }

    Ok(())
}
