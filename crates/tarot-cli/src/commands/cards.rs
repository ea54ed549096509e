use comfy_table::{ContentArrangement, Table};
use tarot_core::{ArcanaType, CardDefinition, Suit, all_cards};

pub fn run(suit: Option<&str>, major: bool, minor: bool) -> Result<(), String> {
    let suit = suit
        .map(|s| {
            Suit::parse(s).ok_or_else(|| {
                format!("unknown suit: \"{s}\". Use: wands, cups, swords, pentacles")
            })
        })
        .transpose()?;

    let cards = filter_cards(all_cards(), suit, major, minor);

    if cards.is_empty() {
        println!("  No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "中文", "Arcana", "Suit", "Upright"]);

    for card in &cards {
        let suit = if card.suit == Suit::None {
            "-".to_string()
        } else {
            card.suit.to_string()
        };
        table.add_row(vec![
            card.id.to_string(),
            card.name_en.clone(),
            card.name_cn.clone(),
            card.arcana.to_string(),
            suit,
            super::truncate(&card.meaning_upright, 48),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}

fn filter_cards(
    cards: &'static [CardDefinition],
    suit: Option<Suit>,
    major: bool,
    minor: bool,
) -> Vec<&'static CardDefinition> {
    cards
        .iter()
        .filter(|c| !major || c.arcana == ArcanaType::Major)
        .filter(|c| !minor || c.arcana == ArcanaType::Minor)
        .filter(|c| suit.is_none_or(|s| c.suit == s))
        .collect()
}
