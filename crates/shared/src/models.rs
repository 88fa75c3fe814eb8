//! Data models for the dashboard.
//!
//! This module defines the records that flow from the reading list through
//! enrichment into the table: raw list entries, the three kinds of
//! enrichment metadata, and the flattened record that gets displayed and
//! exported.

use serde::{Deserialize, Serialize};

/// Placeholder shown when an author record carries no birth date
pub const NO_DATA: &str = "No Data";

/// Maximum number of subject tags kept per record
pub const MAX_SUBJECTS: usize = 2;

/// One item of the source reading list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub work_key: String,         // e.g. "/works/OL45804W"
    pub title: String,
    pub first_publish_year: Option<i32>,
    pub author_names: Vec<String>,
}

impl ListEntry {
    /// Name of the entry's first listed author, empty if the list has none
    pub fn author_name(&self) -> &str {
        self.author_names.first().map(String::as_str).unwrap_or("")
    }
}

/// Rating summary for a work
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
}

impl RatingSummary {
    /// Average rating formatted with exactly two decimals ("0.00" when absent)
    ///
    /// Exact ties (`x.125`, `x.375`, ...) round away from zero; everything
    /// else rounds to the nearest two-decimal value.
    pub fn formatted_average(&self) -> String {
        let average = self.average.unwrap_or(0.0);
        let eighths = average * 8.0;
        if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
            return format!("{:.2}", (average * 100.0).round() / 100.0);
        }
        format!("{:.2}", average)
    }
}

/// Work detail, reduced to the subject tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkDetail {
    pub subjects: Vec<String>,
}

impl WorkDetail {
    /// The leading subjects kept for display
    pub fn leading_subjects(&self) -> Vec<String> {
        self.subjects.iter().take(MAX_SUBJECTS).cloned().collect()
    }
}

/// Author metadata from the author search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub birth_date: Option<String>,
    pub top_work: Option<String>,
}

/// Flattened record displayed in the table and written to CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub id: usize,                // 1-based position in the source list
    pub author_name: String,
    pub title: String,
    pub first_publish_year: Option<i32>,
    pub subjects: Vec<String>,
    pub average_rating: String,   // always two decimals
    pub dob: String,              // birth date or NO_DATA
    pub top_work: Option<String>,
}

impl EnrichedRecord {
    /// Project a list entry and its metadata into a record
    ///
    /// `position` is the zero-based index of the entry in the source list.
    pub fn project(
        position: usize,
        entry: &ListEntry,
        rating: &RatingSummary,
        work: &WorkDetail,
        author: &AuthorInfo,
    ) -> Self {
        Self {
            id: position + 1,
            author_name: entry.author_name().to_string(),
            title: entry.title.clone(),
            first_publish_year: entry.first_publish_year,
            subjects: work.leading_subjects(),
            average_rating: rating.formatted_average(),
            dob: author
                .birth_date
                .clone()
                .unwrap_or_else(|| NO_DATA.to_string()),
            top_work: author.top_work.clone(),
        }
    }

    /// Record built from the list entry alone, used when enrichment failed
    pub fn placeholder(position: usize, entry: &ListEntry) -> Self {
        Self::project(
            position,
            entry,
            &RatingSummary::default(),
            &WorkDetail::default(),
            &AuthorInfo::default(),
        )
    }

    /// Subjects joined for display
    pub fn subjects_display(&self) -> String {
        self.subjects.join(", ")
    }
}
