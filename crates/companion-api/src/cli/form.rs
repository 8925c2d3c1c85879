//! The guided companion form, rendered as terminal prompts.
//!
//! Mirrors the web form's layout: the avatar, name, description, and
//! category under "General Information", then the instructions and example
//! conversation under "Configuration". Values given as flags are applied
//! first; the remaining fields are prompted for, seeded with the draft's
//! current values.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Editor, Input, Select};

use companion_core::defaults;
use companion_core::session::FormSession;
use companion_types::category::Category;
use companion_types::companion::FieldName;

use super::FieldArgs;

/// Map a `--category` value to a category id.
///
/// Accepts an exact id or a case-insensitive category name; the lookup
/// ignores surrounding whitespace. Anything else is passed through exactly
/// as typed: the schema only requires a non-empty value and the store
/// decides whether the id exists.
pub fn resolve_category(categories: &[Category], value: &str) -> String {
    let key = value.trim();
    categories
        .iter()
        .find(|c| c.id.as_str() == key || c.name.eq_ignore_ascii_case(key))
        .map(|c| c.id.to_string())
        .unwrap_or_else(|| value.to_string())
}

fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Apply flag values to the draft. Returns the fields that were set.
pub fn apply_args(session: &mut FormSession, args: &FieldArgs) -> Result<Vec<FieldName>> {
    let mut provided = Vec::new();

    if let Some(src) = &args.src {
        session.draft.set_field(FieldName::Src, src.clone());
        provided.push(FieldName::Src);
    }
    if let Some(name) = &args.name {
        session.draft.set_field(FieldName::Name, name.clone());
        provided.push(FieldName::Name);
    }
    if let Some(description) = &args.description {
        session.draft.set_field(FieldName::Description, description.clone());
        provided.push(FieldName::Description);
    }
    if let Some(category) = &args.category {
        let id = resolve_category(&session.categories, category);
        session.draft.set_field(FieldName::CategoryId, id);
        provided.push(FieldName::CategoryId);
    }
    if let Some(path) = &args.instructions_file {
        session.draft.set_field(FieldName::Instructions, read_text_file(path)?);
        provided.push(FieldName::Instructions);
    }
    if let Some(path) = &args.seed_file {
        session.draft.set_field(FieldName::Seed, read_text_file(path)?);
        provided.push(FieldName::Seed);
    }

    Ok(provided)
}

fn section(title: &str, subtitle: &str) {
    println!();
    println!("  {}", style(title).bold());
    println!("  {}", style(subtitle).dim());
    println!("  {}", style("─".repeat(48)).dim());
}

fn placeholder(field: FieldName) -> Option<&'static str> {
    match field {
        FieldName::Name => Some(defaults::EXAMPLE_NAME),
        FieldName::Description => Some(defaults::EXAMPLE_DESCRIPTION),
        FieldName::Instructions => Some(defaults::EXAMPLE_INSTRUCTIONS),
        FieldName::Seed => Some(defaults::EXAMPLE_SEED),
        FieldName::Src | FieldName::CategoryId => None,
    }
}

/// Prompt for `fields`, in form order, with section headers.
pub fn prompt_fields(session: &mut FormSession, fields: &[FieldName]) -> Result<()> {
    let messages = session.messages();
    let mut shown_basics = false;
    let mut shown_configuration = false;

    for field in FieldName::ALL.into_iter().filter(|f| fields.contains(f)) {
        let is_configuration = matches!(field, FieldName::Instructions | FieldName::Seed);
        if is_configuration && !shown_configuration {
            section(messages.configuration_title, messages.configuration_subtitle);
            shown_configuration = true;
        } else if !is_configuration && !shown_basics {
            section(messages.basics_title, messages.basics_subtitle);
            shown_basics = true;
        }
        prompt_field(session, field)?;
    }
    Ok(())
}

fn prompt_field(session: &mut FormSession, field: FieldName) -> Result<()> {
    let messages = session.messages();
    let label = messages.label(field);

    if let Some(hint) = messages.hint(field) {
        println!("  {}", style(hint).dim());
    }
    if let Some(error) = session.draft.field_error(field) {
        println!("  {}", style(error).red());
    }

    let current = session.draft.field(field).to_string();
    let value = match field {
        FieldName::CategoryId if !session.categories.is_empty() => {
            let names: Vec<&str> = session.categories.iter().map(|c| c.name.as_str()).collect();
            let selected = session
                .selected_category()
                .and_then(|s| session.categories.iter().position(|c| c.id == s.id))
                .unwrap_or(0);
            let index = Select::new()
                .with_prompt(format!("{label} ({})", messages.category_placeholder))
                .items(&names)
                .default(selected)
                .interact()?;
            session.categories[index].id.to_string()
        }
        FieldName::Instructions | FieldName::Seed => {
            if current.is_empty() {
                if let Some(example) = placeholder(field) {
                    let first_line = example.lines().next().unwrap_or_default();
                    println!("  {} {}", style("e.g.").dim(), style(first_line).dim().italic());
                }
            }
            println!("  {} {}", style(label).bold(), style("(opening $EDITOR)").dim());
            // Closing the editor without saving keeps the current text.
            Editor::new().edit(&current)?.unwrap_or(current)
        }
        _ => {
            let mut input = Input::<String>::new()
                .with_prompt(label)
                .allow_empty(true);
            if current.is_empty() {
                if let Some(example) = placeholder(field) {
                    println!("  {} {}", style("e.g.").dim(), style(example).dim().italic());
                }
            } else {
                input = input.with_initial_text(current);
            }
            input.interact_text()?
        }
    };

    session.draft.set_field(field, value);
    Ok(())
}

/// Print the inline errors recorded on the draft.
pub fn print_field_errors(session: &FormSession) {
    let messages = session.messages();
    println!();
    for (field, error) in session.draft.errors().iter() {
        println!(
            "  {} {}: {}",
            style("✗").red().bold(),
            style(messages.label(field)).bold(),
            style(error).red()
        );
    }
    println!();
}
