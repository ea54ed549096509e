//! CLI frontend for the Nebula Tarot reading engine.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tarot",
    about = "Nebula Tarot: draw a spread, turn the cards, hear the synthesis",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug events to stderr (overrides TAROT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in spreads
    Spreads,

    /// List cards in the deck
    Cards {
        /// Only cards of this suit (wands, cups, swords, pentacles)
        #[arg(short, long)]
        suit: Option<String>,

        /// Only the Major Arcana
        #[arg(long, conflicts_with_all = ["minor", "suit"])]
        major: bool,

        /// Only the Minor Arcana
        #[arg(long)]
        minor: bool,
    },

    /// Show the full definition of one card
    Show {
        /// Card name, English or Chinese (case-insensitive)
        name: String,
    },

    /// Draw a spread and reveal it
    Read {
        /// Spread to draw: single, three-card, celtic-cross
        #[arg(short, long, default_value = "three-card")]
        spread: String,

        /// RNG seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Probability (0.0-1.0) that a card is dealt reversed
        #[arg(long, default_value = "0.5")]
        reversal_chance: f64,

        /// Skip the narrative service and show the fallback text
        #[arg(long)]
        offline: bool,

        /// Reveal every card at once instead of reading commands from stdin
        #[arg(short, long)]
        reveal_all: bool,

        /// Print the finished reading as JSON (implies --reveal-all)
        #[arg(long)]
        json: bool,

        /// Also write the finished reading as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Spreads => commands::spreads::run(),
        Commands::Cards { suit, major, minor } => {
            commands::cards::run(suit.as_deref(), major, minor)
        }
        Commands::Show { name } => commands::show::run(&name),
        Commands::Read {
            spread,
            seed,
            reversal_chance,
            offline,
            reveal_all,
            json,
            output,
        } => commands::read::run(&commands::read::ReadOptions {
            spread,
            seed,
            reversal_chance,
            offline,
            reveal_all: reveal_all || json,
            json,
            output,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
