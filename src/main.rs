mod catalog;
mod cli;
mod commands;
mod engine;
mod resource;
mod schema;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Validate(args) => commands::declarative::validate(&ctx, args.manifest.as_deref()),
        Command::Deps(args) => {
            commands::declarative::deps(&ctx, args.manifest.manifest.as_deref(), args.json)
        }
        Command::Diff(args) => commands::declarative::diff(
            &ctx,
            args.manifest.manifest.as_deref(),
            &args.observed,
            args.json,
        ),
        Command::Describe => commands::declarative::describe(),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "cisco-aaa-exec", &mut io::stdout());
            Ok(())
        }
    }
}
