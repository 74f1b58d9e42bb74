//! kanban-md CLI - Kanban boards stored as Markdown

mod board_file;
mod cli;
mod colors;
mod commands;
mod output;

use std::process::ExitCode;

use cli::Commands;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let config = cli.config.as_deref();

    let result = match cli.command {
        Some(Commands::Show { file }) => commands::run_show(&file, config, cli.json, cli.quiet),
        Some(Commands::Check { file }) => commands::run_check(&file, config, cli.json, cli.quiet),
        Some(Commands::Format { file, write }) => {
            commands::run_format(&file, write, config, cli.json, cli.quiet)
        }
        Some(Commands::Sort { file, today, write }) => {
            commands::run_sort(&file, today, write, config, cli.json, cli.quiet)
        }
        Some(Commands::Slides { file }) => commands::run_slides(&file, cli.json, cli.quiet),
        None => {
            // No subcommand - print version info
            if !cli.quiet {
                println!("kanban-md v{}", env!("CARGO_PKG_VERSION"));
                println!("Use --help for usage information");
            }
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
