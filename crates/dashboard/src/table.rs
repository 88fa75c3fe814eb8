//! Table state and rendering.
//!
//! Holds the sort and pagination state for the record table and renders the
//! current page through `comfy-table`.

use anyhow::{bail, Result};
use comfy_table::Table;
use shared::EnrichedRecord;
use std::cmp::Ordering;

/// Page sizes offered to the user
pub const PAGE_SIZE_PRESETS: [usize; 3] = [10, 50, 100];

/// Shown instead of the table until enrichment completes
pub const LOADING_MESSAGE: &str = "Loading Data...";

/// Table columns, in display and export order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    AuthorName,
    Title,
    FirstPublish,
    Subjects,
    AverageRating,
    DateOfBirth,
    TopWork,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Id,
        Column::AuthorName,
        Column::Title,
        Column::FirstPublish,
        Column::Subjects,
        Column::AverageRating,
        Column::DateOfBirth,
        Column::TopWork,
    ];

    /// Column header as displayed and exported
    pub fn header(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::AuthorName => "Author's Name",
            Column::Title => "Title",
            Column::FirstPublish => "First Publish",
            Column::Subjects => "Subjects",
            Column::AverageRating => "Avg. Rating",
            Column::DateOfBirth => "Date of Birth",
            Column::TopWork => "Top Work",
        }
    }

    /// Short name accepted by the `sort` command
    pub fn key(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::AuthorName => "author",
            Column::Title => "title",
            Column::FirstPublish => "year",
            Column::Subjects => "subjects",
            Column::AverageRating => "rating",
            Column::DateOfBirth => "dob",
            Column::TopWork => "top_work",
        }
    }

    /// Cell text for a record
    pub fn cell(&self, record: &EnrichedRecord) -> String {
        match self {
            Column::Id => record.id.to_string(),
            Column::AuthorName => record.author_name.clone(),
            Column::Title => record.title.clone(),
            Column::FirstPublish => record
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            Column::Subjects => record.subjects_display(),
            Column::AverageRating => record.average_rating.clone(),
            Column::DateOfBirth => record.dob.clone(),
            Column::TopWork => record.top_work.clone().unwrap_or_default(),
        }
    }

    fn sort_key(&self, record: &EnrichedRecord) -> SortKey {
        match self {
            Column::Id => SortKey::Number(record.id as f64),
            Column::FirstPublish => record
                .first_publish_year
                .map(|y| SortKey::Number(y as f64))
                .unwrap_or(SortKey::Missing),
            Column::AverageRating => record
                .average_rating
                .parse()
                .map(SortKey::Number)
                .unwrap_or(SortKey::Missing),
            _ => {
                let text = self.cell(record);
                if text.is_empty() {
                    SortKey::Missing
                } else {
                    SortKey::Text(text.to_lowercase())
                }
            }
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Column {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Column::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.header().to_lowercase() == wanted)
            .or(match wanted.as_str() {
                "author_name" | "name" => Some(Column::AuthorName),
                "first_publish_year" | "first_publish" => Some(Column::FirstPublish),
                "average_rating" | "avg" => Some(Column::AverageRating),
                "birth_date" => Some(Column::DateOfBirth),
                _ => None,
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown column: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort: one column at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// Sort and pagination state for the record table
#[derive(Debug, Clone)]
pub struct TableState {
    sorting: Option<SortState>,
    page_index: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sorting: None,
            page_index: 0,
            page_size: PAGE_SIZE_PRESETS[0],
        }
    }
}

impl TableState {
    /// Create table state with an initial page size
    pub fn with_page_size(page_size: usize) -> Result<Self> {
        let mut state = Self::default();
        state.set_page_size(page_size)?;
        Ok(state)
    }

    pub fn sorting(&self) -> Option<SortState> {
        self.sorting
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Cycle the sort on a column: none -> ascending -> descending -> none
    ///
    /// Toggling a column other than the sorted one starts it at ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sorting = match self.sorting {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => match direction {
                SortDirection::Ascending => Some(SortState {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Change the page size; the page index is kept as is
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !PAGE_SIZE_PRESETS.contains(&page_size) {
            bail!(
                "Unsupported page size {} (choose one of {:?})",
                page_size,
                PAGE_SIZE_PRESETS
            );
        }
        self.page_size = page_size;
        Ok(())
    }

    /// Back to the first page, used whenever the view changes
    pub fn reset_page_index(&mut self) {
        self.page_index = 0;
    }

    pub fn page_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.page_size)
    }

    /// Displayed page, clamped to the last available page
    pub fn current_page(&self, rows: usize) -> usize {
        self.page_index.min(self.page_count(rows).saturating_sub(1))
    }

    pub fn can_previous_page(&self, rows: usize) -> bool {
        self.current_page(rows) > 0
    }

    pub fn can_next_page(&self, rows: usize) -> bool {
        self.current_page(rows) + 1 < self.page_count(rows)
    }

    /// Move back one page; false when already on the first page
    pub fn previous_page(&mut self, rows: usize) -> bool {
        if !self.can_previous_page(rows) {
            return false;
        }
        self.page_index = self.current_page(rows) - 1;
        true
    }

    /// Move forward one page; false when already on the last page
    pub fn next_page(&mut self, rows: usize) -> bool {
        if !self.can_next_page(rows) {
            return false;
        }
        self.page_index = self.current_page(rows) + 1;
        true
    }

    /// Records in display order (stable, so ties keep view order)
    pub fn sorted<'a>(&self, records: &'a [EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
        let mut rows: Vec<&EnrichedRecord> = records.iter().collect();
        if let Some(SortState { column, direction }) = self.sorting {
            rows.sort_by(|a, b| compare(&column.sort_key(a), &column.sort_key(b), direction));
        }
        rows
    }

    /// Records on the displayed page
    pub fn page_rows<'a>(&self, records: &'a [EnrichedRecord]) -> Vec<&'a EnrichedRecord> {
        let start = self.current_page(records.len()) * self.page_size;
        self.sorted(records)
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Render the table, or the loading message while `loading`
    pub fn render(&self, records: &[EnrichedRecord], loading: bool) -> String {
        if loading {
            return LOADING_MESSAGE.to_string();
        }

        let mut table = Table::new();
        table.set_header(Column::ALL.iter().map(|c| self.header_label(*c)));
        for record in self.page_rows(records) {
            table.add_row(Column::ALL.iter().map(|c| c.cell(record)));
        }

        let rows = records.len();
        format!(
            "{}\nPage {} of {} · {} books · page size {}{}{}",
            table,
            self.current_page(rows) + 1,
            self.page_count(rows).max(1),
            rows,
            self.page_size,
            if self.can_previous_page(rows) { " · [prev]" } else { "" },
            if self.can_next_page(rows) { " · [next]" } else { "" },
        )
    }

    fn header_label(&self, column: Column) -> String {
        match self.sorting {
            Some(SortState {
                column: sorted,
                direction,
            }) if sorted == column => {
                let arrow = match direction {
                    SortDirection::Ascending => "▲",
                    SortDirection::Descending => "▼",
                };
                format!("{} {}", column.header(), arrow)
            }
            _ => column.header().to_string(),
        }
    }
}

/// Missing values sort last in both directions
fn compare(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    match (a, b) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        _ => {
            let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
