//! Render command - render one template with an optional data file

use crate::context::Context;
use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use trellis_core::Engine;

/// Render `name` and print the result, or write it to `output`
///
/// `name` may also be a path to an existing template file, which is
/// rendered as-is without name resolution.
pub fn run(ctx: &Context, name: &str, data: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let context = match &data {
        Some(path) => load_data(path)?,
        None => trellis_core::Context::new(),
    };

    if ctx.verbose {
        eprintln!("{} Rendering '{}'", "→".cyan(), name);
    }

    let engine = ctx.file_engine();
    let direct = Path::new(name);
    let rendered = if direct.is_file() {
        engine.render_file(direct, &context)?
    } else {
        engine.render(name, &context)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &rendered)?;
            eprintln!(
                "{} Rendered '{}' to {}",
                "✓".green().bold(),
                name,
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Read a render context; `.toml` files are parsed as TOML, anything else as JSON
fn load_data(path: &Path) -> Result<trellis_core::Context> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let value: Value = if is_toml {
        toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?
    };

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Data file {} must contain an object, got {}",
            path.display(),
            kind(&other)
        ),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
