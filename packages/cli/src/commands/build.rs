use super::{load_graph, write_files};
use crate::config::{Config, TargetConfig};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use jsonmodeler_writer::{
    OutputFile, OutputLanguageWriter, WriterRegistry, WriterResult, WritingOptions,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory containing jsonmodeler.config.json
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// A configured target resolved against the registry
struct Target<'a> {
    writer: &'a dyn OutputLanguageWriter,
    options: WritingOptions,
    out_dir: PathBuf,
}

fn resolve_target<'a>(
    registry: &'a WriterRegistry,
    target: &TargetConfig,
    root: &Path,
) -> Result<Target<'a>> {
    let writer = registry.get_by_name(&target.language)?;
    let options = WritingOptions::from_pairs(writer.language(), target.option_pairs()?)
        .with_context(|| format!("Invalid options for target '{}'", target.language))?;
    Ok(Target {
        writer,
        options,
        out_dir: target.get_out_dir(root, writer.language()),
    })
}

pub fn build(args: BuildArgs, cwd: &Path) -> Result<()> {
    let root = cwd.join(&args.path);
    let config = Config::load(&root)?;
    let registry = WriterRegistry::new();

    // Every target is validated before anything is rendered
    let targets = config
        .targets
        .iter()
        .map(|target| resolve_target(&registry, target, &root))
        .collect::<Result<Vec<_>>>()?;

    let graph = load_graph(&config.get_model_path(&root))?;

    println!(
        "{}",
        format!("🔨 Rendering {} targets...", targets.len()).bright_blue().bold()
    );

    let results: Vec<WriterResult<Vec<OutputFile>>> = targets
        .par_iter()
        .map(|target| target.writer.render(&graph, &target.options))
        .collect();

    let mut error_count = 0;
    for (target, result) in targets.iter().zip(results) {
        let language = target.writer.language();
        match result.map_err(anyhow::Error::from).and_then(|files| write_files(&target.out_dir, &files)) {
            Ok(paths) => {
                let relative = target.out_dir.strip_prefix(&root).unwrap_or(&target.out_dir);
                println!(
                    "  {} {} → {} ({} files)",
                    "✓".green(),
                    language,
                    relative.display(),
                    paths.len()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), language, e.to_string().red());
            }
        }
    }

    println!();
    info!(targets = targets.len(), failed = error_count, "build finished");
    if error_count == 0 {
        println!("{} Rendered {} targets successfully", "✅".green(), targets.len());
        Ok(())
    } else {
        Err(anyhow!("{} of {} targets failed", error_count, targets.len()))
    }
}
