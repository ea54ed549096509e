use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tarot_core::SpreadKind;
use tarot_reading::{
    ChatCompletionsProvider, DisabledProvider, NarrativeProvider, NarrativeStatus, ReadingConfig,
    ReadingSession, RevealOutcome,
};
use tracing::info;

/// Options for `tarot read`.
pub struct ReadOptions {
    pub spread: String,
    pub seed: Option<u64>,
    pub reversal_chance: f64,
    pub offline: bool,
    pub reveal_all: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Reveal the card at this zero-based position.
    Flip(usize),
    All,
    Status,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    match command.as_str() {
        "flip" | "f" | "reveal" => {
            let arg = parts
                .next()
                .ok_or_else(|| "usage: flip <position>".to_string())?;
            let position: usize = arg
                .parse()
                .map_err(|_| format!("not a position: \"{arg}\""))?;
            if position == 0 {
                return Err("positions start at 1".into());
            }
            Ok(Input::Flip(position - 1))
        }
        "all" | "a" => Ok(Input::All),
        "status" | "s" => Ok(Input::Status),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => {
            // A bare number flips that position.
            match other.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Input::Flip(n - 1)),
                _ => Err(format!("unknown command: \"{line}\". Type 'help'")),
            }
        }
    }
}

const HELP: &str = "  flip <n>   reveal the card at position n
  all        reveal every remaining card
  status     show the table and the synthesis status
  help       show this help
  quit       leave without finishing";

pub fn run(opts: &ReadOptions) -> Result<(), String> {
    let kind = SpreadKind::parse(&opts.spread).map_err(|e| e.to_string())?;
    let spread = kind
        .config()
        .ok_or_else(|| format!("spread \"{kind}\" has no built-in layout"))?;

    let mut config = ReadingConfig::default().with_reversal_chance(opts.reversal_chance);
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }

    let provider: Arc<dyn NarrativeProvider> = if opts.offline {
        Arc::new(DisabledProvider)
    } else {
        let provider = ChatCompletionsProvider::from_env().map_err(|e| e.to_string())?;
        if !provider.is_available() {
            info!("TAROT_API_KEY is not set; the synthesis will fall back");
        }
        Arc::new(provider)
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let _guard = runtime.enter();

    let mut session = ReadingSession::new(provider, config);
    session.start(&spread).map_err(|e| e.to_string())?;

    let quiet = opts.json;
    if !quiet {
        println!("  {} {}", "Drawing".bold(), spread.name);
        if !spread.description.is_empty() {
            println!("  {}", spread.description.dimmed());
        }
        if let Some(seed) = opts.seed {
            println!("  Seed: {seed}");
        }
        println!();
    }

    let completed = if opts.reveal_all {
        session.reveal_all().map_err(|e| e.to_string())?;
        if !quiet {
            print_revealed(&session);
        }
        true
    } else {
        interactive(&mut session)?
    };

    if !completed {
        println!("  The reading was left unfinished.");
        return Ok(());
    }

    if !quiet {
        println!();
        println!("  {}", "Consulting the stars...".dimmed());
        io::stdout().flush().map_err(|e| e.to_string())?;
    }
    let status = runtime
        .block_on(session.wait_narrative())
        .map_err(|e| e.to_string())?;

    if !quiet {
        println!();
        print_synthesis(&status, session.fallback_text());
    }

    let snapshot = session
        .snapshot()
        .ok_or_else(|| "the reading disappeared before it could be saved".to_string())?;
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;

    if quiet {
        println!("{json}");
    }
    if let Some(path) = &opts.output {
        std::fs::write(path, format!("{json}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        if !quiet {
            println!();
            println!("  Saved to {}", path.display());
        }
    }

    Ok(())
}

/// Read commands from stdin until the reading completes, the user quits, or
/// input ends. Returns whether the reading completed.
fn interactive(session: &mut ReadingSession) -> Result<bool, String> {
    print_table(session);
    println!();
    println!("  Type 'flip <n>' to turn a card, 'help' for commands.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => return Ok(false), // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match parse_input(input) {
            Ok(command) => command,
            Err(e) => {
                println!("{}\n", e.yellow());
                continue;
            }
        };

        match command {
            Input::Flip(index) => match session.reveal(index) {
                Ok(RevealOutcome::AlreadyRevealed) => {
                    println!("  {}\n", "That card is already face up.".dimmed());
                }
                Ok(outcome) => {
                    let card = &session.cards()[index];
                    let label = session
                        .spread()
                        .map(|s| s.position_label(index))
                        .unwrap_or_default();
                    super::print_card(index, &label, card);
                    println!();
                    if outcome == RevealOutcome::Completed {
                        return Ok(true);
                    }
                }
                Err(e) => println!("{}\n", e.to_string().yellow()),
            },
            Input::All => {
                let before: Vec<bool> = session.cards().iter().map(|c| c.is_revealed()).collect();
                session.reveal_all().map_err(|e| e.to_string())?;
                let spread = session.spread();
                for (index, card) in session.cards().iter().enumerate() {
                    if !before[index] {
                        let label = spread
                            .map(|s| s.position_label(index))
                            .unwrap_or_default();
                        super::print_card(index, &label, card);
                    }
                }
                return Ok(true);
            }
            Input::Status => {
                print_table(session);
                println!("  synthesis: {}\n", status_label(session.narrative_status()));
            }
            Input::Help => println!("{HELP}\n"),
            Input::Quit => return Ok(false),
        }
    }
}

fn print_revealed(session: &ReadingSession) {
    let Some(spread) = session.spread() else {
        return;
    };
    for (index, card) in session.cards().iter().enumerate() {
        super::print_card(index, &spread.position_label(index), card);
    }
}

/// Table of positions; face-down cards stay hidden.
fn print_table(session: &ReadingSession) {
    let Some(spread) = session.spread() else {
        return;
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Position", "Card", "Orientation"]);

    for (index, drawn) in session.cards().iter().enumerate() {
        let (name, orientation) = if drawn.is_revealed() {
            (drawn.card().to_string(), drawn.orientation().to_string())
        } else {
            ("(face down)".to_string(), "-".to_string())
        };
        table.add_row(vec![
            (index + 1).to_string(),
            spread.position_label(index),
            name,
            orientation,
        ]);
    }

    println!("{table}");
}

fn status_label(status: Option<&NarrativeStatus>) -> String {
    match status {
        None => "none".to_string(),
        Some(NarrativeStatus::Pending) => "pending".to_string(),
        Some(NarrativeStatus::Ready(_)) => "ready".to_string(),
        Some(NarrativeStatus::Failed(reason)) => format!("failed ({reason})"),
    }
}

fn print_synthesis(status: &NarrativeStatus, fallback: &str) {
    println!("  {}", "Synthesis".bold());
    match status {
        NarrativeStatus::Ready(text) => {
            for line in text.lines() {
                println!("  {}", line.trim_end());
            }
        }
        NarrativeStatus::Failed(reason) => {
            println!("  {fallback}");
            println!("  {}", format!("({reason})").dimmed());
        }
        // wait_narrative only returns settled states.
        NarrativeStatus::Pending => println!("  {fallback}"),
    }
}
