//! Find command - show where a template name resolves

use crate::context::Context;
use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::json;

pub fn run(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let found = ctx.file_engine().finder().find(name);

    if json {
        let output = json!({
            "name": name,
            "path": found.as_ref().map(|path| path.display().to_string()),
            "folders": ctx
                .engine
                .folders
                .iter()
                .map(|folder| folder.display().to_string())
                .collect::<Vec<_>>(),
            "config": ctx.config_path.as_ref().map(|path| path.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match found {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => {
            if ctx.verbose {
                for folder in &ctx.engine.folders {
                    eprintln!("{} searched {}", "!".yellow(), folder.display());
                }
            }
            bail!("template '{}' not found", name)
        }
    }
}
