use anyhow::Result;
use clap::Args;
use colored::Colorize;
use jsonmodeler_writer::{WriterRegistry, WritingOptions};

#[derive(Debug, Args)]
pub struct LanguagesArgs {}

pub fn languages(_args: LanguagesArgs) -> Result<()> {
    let registry = WriterRegistry::new();

    for writer in registry.writers() {
        let language = writer.language();
        println!(
            "{} {}",
            language.to_string().bright_white().bold(),
            format!("({})", language.key()).dimmed()
        );
        println!("  options: {}", WritingOptions::keys(language).join(", "));
    }

    Ok(())
}
