//! Category listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use companion_core::repository::category::CategorySource;

use crate::state::AppState;

/// Print the categories offered by the store, in the order it lists them.
pub async fn list_categories(state: &AppState, json: bool) -> Result<()> {
    let categories = state.client.list_categories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!();
        println!(
            "  {} The store at {} has no categories yet.",
            style("i").blue().bold(),
            style(state.client.base_url()).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new(state.messages.category_label).fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for category in &categories {
        table.add_row(vec![
            Cell::new(&category.name).fg(Color::Cyan),
            Cell::new(&category.id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
