//! Reading-list dashboard.
//!
//! Holds the enriched record set in memory and provides author search, a
//! sortable and paginated table view, CSV export, and an interactive shell
//! tying them together.

pub mod export;
pub mod search;
pub mod shell;
pub mod state;
pub mod table;

pub use search::filter_by_author;
pub use shell::{Command, CommandError};
pub use state::Dashboard;
pub use table::{Column, SortDirection, SortState, TableState, PAGE_SIZE_PRESETS};
