//! The `windcheck catalog` command.

use std::path::PathBuf;

use anyhow::Result;

use windcheck_core::catalog::{builtin_catalog, parse_catalog};

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => parse_catalog(&path)?,
        None => builtin_catalog(),
    };

    println!("Catalog: {} ({})", catalog.name, catalog.id);
    if !catalog.description.is_empty() {
        println!("{}", catalog.description);
    }
    println!();

    for (i, question) in catalog.questions.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, question.id, question.text);
    }

    if catalog.questions.is_empty() {
        println!("(catalog has no questions)");
    }

    Ok(())
}
