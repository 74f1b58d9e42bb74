//! CLI argument parsing with clap derive

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// kanban-md - Kanban boards stored as Markdown
#[derive(Parser)]
#[command(name = "kanban-md")]
#[command(version = VERSION)]
#[command(about = "Inspect, format and automatically sort Markdown kanban boards")]
#[command(long_about = "kanban-md reads kanban boards written in Markdown: a front matter block marked `kanban-plugin: board`, one `## ` heading per column and one `- ` line per card.\n\nColumns can file cards automatically with `#gather_<rule>` tags, and can show slide documents with `!!!columninclude(path)!!!`.")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: kanban-md.toml next to the board)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a board's columns and cards
    ///
    /// Columns are grouped by their layout row.
    Show {
        /// Board file
        file: PathBuf,
    },

    /// Check that a file is a valid board
    ///
    /// Reports include files that cannot be found and gather rules that do
    /// not parse.
    #[command(long_about = "Check that a file is a valid board.\n\nChecks:\n  - Front matter carries `kanban-plugin: board`\n  - Column include files exist\n  - Standalone include files exist\n  - Gather rules parse\n\nExits with 1 when the board is not valid.")]
    Check {
        /// Board file
        file: PathBuf,
    },

    /// Rewrite a board in canonical form
    ///
    /// Prints the result unless --write is given.
    #[command(long_about = "Rewrite a board in canonical form.\n\nDuplicate row tags are collapsed and, if `sort_on_format` is enabled in the configuration, cards are filed automatically.\n\nEvery card is written as `- [ ] `: checked `- [x]` items come back unchecked. The same applies to `sort --write`.\n\nPrints the result unless --write is given.")]
    Format {
        /// Board file
        file: PathBuf,

        /// Write the result back to the file
        #[arg(long)]
        write: bool,
    },

    /// File cards into columns by their gather rules
    ///
    /// Prints the result unless --write is given.
    #[command(long_about = "File cards into columns by their gather rules.\n\nCards are moved to the first column whose `#gather_<rule>` matches their `@` tags. Tagged cards that match nothing go to the `#ungathered` column. Cards tagged `@sticky` never move. Columns tagged `#sort-bydate` or `#sort-byname` are ordered afterwards.\n\nCards are written back as `- [ ] `, so checked items come back unchecked.\n\nPrints the result unless --write is given.")]
    Sort {
        /// Board file
        file: PathBuf,

        /// Date that day offsets are measured from (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,

        /// Write the result back to the file
        #[arg(long)]
        write: bool,
    },

    /// Show the cards a slide document turns into
    Slides {
        /// Slide document
        file: PathBuf,
    },
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
