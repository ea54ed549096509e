use comfy_table::{ContentArrangement, Table};
use tarot_core::all_spreads;

pub fn run() -> Result<(), String> {
    let spreads = all_spreads();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Cards", "Description"]);

    for spread in &spreads {
        table.add_row(vec![
            spread.kind.to_string(),
            spread.name.clone(),
            spread.card_count.to_string(),
            spread.description.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} spreads", spreads.len());

    Ok(())
}
