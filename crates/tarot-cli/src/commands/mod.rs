pub mod cards;
pub mod read;
pub mod show;
pub mod spreads;

use colored::{ColoredString, Colorize};
use tarot_core::{DrawnCard, Orientation};

/// Trim `text` to at most `max` characters, ending in "..." when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

fn orientation_label(orientation: Orientation) -> ColoredString {
    match orientation {
        Orientation::Upright => "Upright".green(),
        Orientation::Reversed => "Reversed".red(),
    }
}

/// Print one revealed card: position, identity, orientation, meaning.
fn print_card(index: usize, label: &str, drawn: &DrawnCard<'_>) {
    let card = drawn.card();
    println!(
        "  {}. {}: {} ({}) [{}]",
        index + 1,
        label.dimmed(),
        card.name_en.bold(),
        card.name_cn,
        orientation_label(drawn.orientation()),
    );
    println!("     {}", drawn.meaning());
}
