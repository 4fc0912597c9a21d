use super::{load_graph, write_files};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use jsonmodeler_writer::{WriterRegistry, WritingOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Class graph in JSON form
    pub model: PathBuf,

    /// Output language (swift, objc, java)
    #[arg(short, long)]
    pub language: String,

    /// Writer option, repeatable
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let registry = WriterRegistry::new();
    let writer = registry.get_by_name(&args.language)?;

    let pairs = args
        .options
        .iter()
        .map(|raw| parse_option(raw))
        .collect::<Result<Vec<_>>>()?;
    let options = WritingOptions::from_pairs(writer.language(), pairs)
        .with_context(|| format!("Invalid {} options", writer.language()))?;

    let graph = load_graph(&cwd.join(&args.model))?;
    let files = writer.render(&graph, &options)?;

    if args.stdout {
        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", format!("// ---- {} ----", file.filename).dimmed());
            print!("{}", file.contents);
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("🔨 Rendering {} models...", writer.language()).bright_blue().bold()
    );
    let out_dir = cwd.join(&args.out_dir);
    for path in write_files(&out_dir, &files)? {
        let relative = path.strip_prefix(cwd).unwrap_or(&path);
        println!("  {} {}", "✓".green(), relative.display());
    }
    println!();
    println!("{} Rendered {} files", "✅".green(), files.len());

    Ok(())
}

/// Split a `key=value` command-line option
fn parse_option(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Option '{}' must have the form key=value", raw))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
