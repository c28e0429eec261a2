//! Name parsing command

use anyhow::Result;

use super::output::Output;
use crate::storage::CategorizerConfig;

/// Show the parent category and full category chain of a task name
pub fn parse(output: &Output, name: &str, separator: Option<&str>) -> Result<()> {
    let mut config = CategorizerConfig::default();
    config.apply_overrides(separator, false);
    let parser = config.parser()?;

    let parent = parser.parent_category(name);
    let categories = parser.ancestor_categories(name);

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "parent": parent,
            "categories": categories,
            "leaf": parser.leaf(name),
        }));
    } else {
        println!("Name:       {}", name);
        println!("Parent:     {}", parent.unwrap_or("(none)"));
        if categories.is_empty() {
            println!("Categories: (none)");
        } else {
            println!("Categories: {}", categories.join(", "));
        }
    }

    Ok(())
}
