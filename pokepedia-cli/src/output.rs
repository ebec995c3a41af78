//! Table and JSON rendering for catalog entries

use anyhow::Result;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use pokepedia_core::Entry;

/// Table row for an entry
#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            number: entry.display_number().unwrap_or_else(|| "-".to_string()),
            name: entry.name.clone(),
            image: entry.image.clone().unwrap_or_else(|| "(none)".to_string()),
        }
    }
}

pub fn render_table(entries: &[Entry]) -> String {
    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub fn print_entries(entries: &[Entry], json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    println!("{}", render_table(entries));
    println!("{} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
    Ok(())
}

pub fn print_entry(entry: &Entry, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    match entry.display_number() {
        Some(number) => println!("{number} {}", entry.name),
        None => println!("{}", entry.name),
    }
    println!("Image: {}", entry.image.as_deref().unwrap_or("(none)"));
    Ok(())
}
