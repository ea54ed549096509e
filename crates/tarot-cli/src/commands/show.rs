use colored::Colorize;
use tarot_core::deck::{find_by_name, suggest};

pub fn run(name: &str) -> Result<(), String> {
    let Some(card) = find_by_name(name) else {
        let suggestions = suggest(name, 3);
        return Err(if suggestions.is_empty() {
            format!("card not found: \"{name}\"")
        } else {
            format!(
                "card not found: \"{name}\". Did you mean: {}?",
                suggestions.join(", ")
            )
        });
    };

    println!(
        "  {} ({}) [{}]",
        card.name_en.bold(),
        card.name_cn,
        card.arcana.to_string().dimmed()
    );
    println!();

    println!("  id:        {}", card.id);
    if let Some(element) = card.suit.element() {
        println!("  suit:      {} ({element})", card.suit);
    }
    if let Some(rank) = card.rank_name() {
        println!("  rank:      {rank}");
    }
    println!();

    println!("  {}", "Upright".green());
    println!("    {}", card.meaning_upright);
    println!("  {}", "Reversed".red());
    println!("    {}", card.meaning_reversed);

    if !card.keywords.is_empty() {
        println!();
        println!("  keywords: {}", card.keywords.join(", "));
    }

    Ok(())
}
