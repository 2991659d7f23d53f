pub mod app;
pub mod command;
pub mod date;
pub mod error;
pub mod notify;
pub mod parser;
pub mod persistence;
pub mod task;
pub mod tasklist;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI shared between main and tests
#[derive(Parser, Debug)]
#[command(name = "taskbot", version, about = "A chatty task list with deadlines and reminders")]
pub struct Cli {
    /// Optional override for the data file
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Cmd {
    /// Read commands line by line from stdin (default)
    Console,
    /// Launch the full-screen TUI
    Tui,
    /// Run a single command, e.g. `taskbot exec todo read book`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}
