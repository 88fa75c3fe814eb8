//! Interactive dashboard shell.
//!
//! Reads one command per line, applies it to the [`Dashboard`] and writes
//! the result. Rendering happens after every command that changes what is
//! on screen.

use crate::state::Dashboard;
use crate::table::{Column, PAGE_SIZE_PRESETS};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

pub const HELP: &str = "\
Commands:
  search <query>    filter by author name
  reset             clear the search
  sort <column>     cycle sorting (id, author, title, year, subjects, rating, dob, top_work)
  next | prev       change page
  size <n>          page size (10, 50, 100)
  export [path]     write the current view to CSV
  show              redraw the table
  help              this message
  quit              leave";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Reset,
    Sort(Column),
    Next,
    Previous,
    PageSize(usize),
    Export(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("page size must be 10, 50 or 100, got {0}")]
    InvalidPageSize(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            // a bare "search" behaves like the empty query
            "search" | "s" => Ok(Command::Search(arg.to_string())),
            "reset" | "r" => Ok(Command::Reset),
            "sort" => {
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("sort"));
                }
                arg.parse()
                    .map(Command::Sort)
                    .map_err(|_| CommandError::UnknownColumn(arg.to_string()))
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "previous" | "p" => Ok(Command::Previous),
            "size" => {
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("size"));
                }
                match arg.parse::<usize>() {
                    Ok(size) if PAGE_SIZE_PRESETS.contains(&size) => Ok(Command::PageSize(size)),
                    _ => Err(CommandError::InvalidPageSize(arg.to_string())),
                }
            }
            "export" | "e" => Ok(Command::Export(
                (!arg.is_empty()).then(|| PathBuf::from(arg)),
            )),
            "show" | "ls" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Output(String),
    Quit,
}

impl Command {
    /// Apply the command to the dashboard
    pub fn execute(self, dashboard: &mut Dashboard, export_dir: &Path) -> Result<Outcome> {
        let output = match self {
            Command::Search(query) => {
                let matches = dashboard.search(&query);
                format!("{}\n{} matching books", dashboard.render(), matches)
            }
            Command::Reset => {
                dashboard.reset();
                dashboard.render()
            }
            Command::Sort(column) => {
                dashboard.table_mut().toggle_sort(column);
                dashboard.render()
            }
            Command::Next => {
                let rows = dashboard.view().len();
                if dashboard.table_mut().next_page(rows) {
                    dashboard.render()
                } else {
                    "Already on the last page".to_string()
                }
            }
            Command::Previous => {
                let rows = dashboard.view().len();
                if dashboard.table_mut().previous_page(rows) {
                    dashboard.render()
                } else {
                    "Already on the first page".to_string()
                }
            }
            Command::PageSize(size) => {
                dashboard.table_mut().set_page_size(size)?;
                dashboard.render()
            }
            Command::Export(path) => {
                let written = dashboard
                    .export(path.as_deref(), export_dir)
                    .context("Export failed")?;
                format!(
                    "Exported {} books to {}",
                    dashboard.view().len(),
                    written.display()
                )
            }
            Command::Show => dashboard.render(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }
}

/// Run the read-eval-print loop until `quit` or end of input
pub fn run<R: BufRead, W: Write>(
    dashboard: &mut Dashboard,
    export_dir: &Path,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", dashboard.render())?;
    writeln!(output, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read command")?,
            None => break,
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        debug!(command = ?command, "Executing command");
        match command.execute(dashboard, export_dir) {
            Ok(Outcome::Output(text)) => writeln!(output, "{}", text)?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                error!(error = %e, "Command failed");
                writeln!(output, "Error: {:#}", e)?;
            }
        }
    }

    Ok(())
}
