mod commands;
mod config;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use commands::{build, languages, render, BuildArgs, LanguagesArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// JSONModeler CLI - render model classes for Swift, Objective-C and Java
#[derive(Parser, Debug)]
#[command(name = "jsonmodeler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a class graph for one language
    Render(RenderArgs),

    /// Render every target listed in jsonmodeler.config.json
    Build(BuildArgs),

    /// List available languages and their options
    Languages(LanguagesArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Render(args) => render(args, &cwd),
            Command::Build(args) => build(args, &cwd),
            Command::Languages(args) => languages(args),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
