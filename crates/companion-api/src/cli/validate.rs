//! Offline check of a companion definition file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use console::style;

use companion_core::schema::CompanionSchema;
use companion_types::companion::CompanionFields;
use companion_types::error::FieldErrors;

use crate::state::AppState;

/// Parse a definition from `.toml` or JSON (any other extension).
pub fn read_definition(path: &Path) -> Result<CompanionFields> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

/// Validate a definition file without contacting the store.
pub fn validate_file(state: &AppState, path: &Path, json: bool, quiet: bool) -> Result<()> {
    let fields = read_definition(path)?;
    let schema = CompanionSchema::new(state.messages);

    match schema.validate(&fields) {
        Ok(_) => {
            if json {
                println!("{}", serde_json::json!({ "valid": true, "errors": {} }));
            } else if !quiet {
                println!(
                    "  {} {} is a valid companion definition",
                    style("✓").green().bold(),
                    style(path.display()).cyan()
                );
            }
            Ok(())
        }
        Err(errors) => {
            if json {
                println!("{}", serde_json::json!({ "valid": false, "errors": errors }));
            } else {
                print_violations(state, &errors);
            }
            bail!("{errors}")
        }
    }
}

fn print_violations(state: &AppState, errors: &FieldErrors) {
    println!();
    for (field, message) in errors.iter() {
        println!(
            "  {} {}: {}",
            style("✗").red().bold(),
            style(state.messages.label(field)).bold(),
            style(message).red()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::defaults;
    use companion_core::messages;
    use companion_types::companion::FieldName;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_definition() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("elon.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "src": "https://img.example/elon.png",
                "name": "Elon",
                "description": "CEO",
                "categoryId": "cat-1",
                "instructions": defaults::EXAMPLE_INSTRUCTIONS,
                "seed": defaults::EXAMPLE_SEED,
            })
            .to_string(),
        )
        .unwrap();

        let fields = read_definition(&path).unwrap();
        assert_eq!(fields.category_id, "cat-1");
        assert!(CompanionSchema::new(&messages::EN).validate(&fields).is_ok());
    }

    #[test]
    fn test_read_toml_definition_with_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("draft.TOML");
        std::fs::write(&path, "name = \"Ada\"\nseed = \"short\"\n").unwrap();

        let fields = read_definition(&path).unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.src, "");

        let errors = CompanionSchema::new(&messages::EN)
            .validate(&fields)
            .unwrap_err();
        assert!(!errors.contains(FieldName::Name));
        assert!(errors.contains(FieldName::Seed));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_read_definition_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_definition(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
