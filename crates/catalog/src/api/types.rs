//! Open Library response types.
//!
//! These types represent the JSON documents returned by the four endpoints
//! the dashboard reads. Only the fields the dashboard uses are modelled,
//! and apart from the work key every one of them may be absent; everything
//! else in the documents is ignored.

use serde::Deserialize;
use shared::{AuthorInfo, ListEntry, RatingSummary, WorkDetail};

/// Reading-log shelf response (`/people/{user}/books/{shelf}.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingLogResponse {
    pub reading_log_entries: Vec<ReadingLogEntry>,
}

/// One shelf entry
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingLogEntry {
    pub work: ReadingLogWork,
}

/// Work summary embedded in a shelf entry
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingLogWork {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub author_names: Vec<String>,
}

impl From<ReadingLogEntry> for ListEntry {
    fn from(entry: ReadingLogEntry) -> Self {
        ListEntry {
            work_key: entry.work.key,
            title: entry.work.title.unwrap_or_default(),
            first_publish_year: entry.work.first_publish_year,
            author_names: entry.work.author_names,
        }
    }
}

/// Ratings response (`/works/{id}/ratings.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct RatingsResponse {
    #[serde(default)]
    pub summary: Option<RatingsSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingsSummary {
    #[serde(default)]
    pub average: Option<f64>,
}

impl From<RatingsResponse> for RatingSummary {
    fn from(response: RatingsResponse) -> Self {
        RatingSummary {
            average: response.summary.and_then(|s| s.average),
        }
    }
}

/// Work detail response (`/works/{id}.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct WorkResponse {
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
}

impl From<WorkResponse> for WorkDetail {
    fn from(response: WorkResponse) -> Self {
        WorkDetail {
            subjects: response.subjects.unwrap_or_default(),
        }
    }
}

/// Author search response (`/search/authors.json?q=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSearchResponse {
    #[serde(default)]
    pub docs: Vec<AuthorDoc>,
}

/// One author search hit
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorDoc {
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub top_work: Option<String>,
}

impl From<AuthorSearchResponse> for AuthorInfo {
    /// Only the first (best) hit is used
    fn from(response: AuthorSearchResponse) -> Self {
        response
            .docs
            .into_iter()
            .next()
            .map(|doc| AuthorInfo {
                birth_date: doc.birth_date,
                top_work: doc.top_work,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_log_parse() {
        let body = r#"{
            "page": 1,
            "reading_log_entries": [
                {
                    "work": {
                        "title": "Dune",
                        "key": "/works/OL893415W",
                        "author_keys": ["/authors/OL79034A"],
                        "author_names": ["Frank Herbert"],
                        "first_publish_year": 1965,
                        "lending_edition_s": null,
                        "edition_key": ["OL26242482M"],
                        "cover_id": 11481354,
                        "cover_edition_key": "OL26242482M"
                    },
                    "logged_edition": "/books/OL26242482M",
                    "logged_date": "2023/04/11, 09:12:53"
                },
                {
                    "work": {
                        "title": "Untitled",
                        "key": "/works/OL1W"
                    }
                }
            ]
        }"#;

        let response: ReadingLogResponse = serde_json::from_str(body).unwrap();
        let entries: Vec<ListEntry> = response
            .reading_log_entries
            .into_iter()
            .map(ListEntry::from)
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].work_key, "/works/OL893415W");
        assert_eq!(entries[0].author_name(), "Frank Herbert");
        assert_eq!(entries[0].first_publish_year, Some(1965));
        assert_eq!(entries[1].first_publish_year, None);
        assert!(entries[1].author_names.is_empty());
    }

    #[test]
    fn test_missing_entries_is_malformed() {
        let result: Result<ReadingLogResponse, _> = serde_json::from_str(r#"{"page": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ratings_without_summary() {
        let response: RatingsResponse = serde_json::from_str(r#"{"counts": {}}"#).unwrap();
        let rating = RatingSummary::from(response);
        assert_eq!(rating.average, None);
        assert_eq!(rating.formatted_average(), "0.00");

        let response: RatingsResponse = serde_json::from_str(
            r#"{"summary": {"average": 4.187, "count": 16, "sortable": 3.9}}"#,
        )
        .unwrap();
        assert_eq!(RatingSummary::from(response).formatted_average(), "4.19");
    }

    #[test]
    fn test_work_subjects() {
        let response: WorkResponse = serde_json::from_str(
            r#"{"key": "/works/OL893415W", "subjects": ["Science fiction", "Dune (Imaginary place)", "Fiction"]}"#,
        )
        .unwrap();
        let work = WorkDetail::from(response);
        assert_eq!(work.subjects.len(), 3);
        assert_eq!(work.leading_subjects().len(), 2);

        let response: WorkResponse = serde_json::from_str(r#"{"key": "/works/OL1W"}"#).unwrap();
        assert!(WorkDetail::from(response).subjects.is_empty());
    }

    #[test]
    fn test_author_search_first_hit() {
        let response: AuthorSearchResponse = serde_json::from_str(
            r#"{
                "numFound": 2,
                "start": 0,
                "docs": [
                    {"key": "OL79034A", "name": "Frank Herbert", "birth_date": "8 October 1920", "top_work": "Dune", "work_count": 210},
                    {"key": "OL1A", "name": "Frank Herbert Jr."}
                ]
            }"#,
        )
        .unwrap();
        let author = AuthorInfo::from(response);
        assert_eq!(author.birth_date.as_deref(), Some("8 October 1920"));
        assert_eq!(author.top_work.as_deref(), Some("Dune"));
    }

    #[test]
    fn test_author_search_no_hits() {
        let response: AuthorSearchResponse =
            serde_json::from_str(r#"{"numFound": 0, "docs": []}"#).unwrap();
        assert_eq!(AuthorInfo::from(response), AuthorInfo::default());
    }

    #[test]
    fn test_sparse_documents_decode() {
        let response: AuthorSearchResponse =
            serde_json::from_str(r#"{"docs": [{"key": "OL1A", "birth_date": "1900"}]}"#).unwrap();
        assert_eq!(AuthorInfo::from(response).birth_date.as_deref(), Some("1900"));

        let response: AuthorSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(AuthorInfo::from(response), AuthorInfo::default());

        let response: WorkResponse =
            serde_json::from_str(r#"{"subjects": ["Poetry", "Fiction", "Drama"]}"#).unwrap();
        assert_eq!(WorkDetail::from(response).leading_subjects(), vec!["Poetry", "Fiction"]);

        let response: ReadingLogResponse = serde_json::from_str(
            r#"{"reading_log_entries": [{"work": {"key": "/works/OL7W", "author_names": ["Anon"]}}]}"#,
        )
        .unwrap();
        let entry = ListEntry::from(response.reading_log_entries.into_iter().next().unwrap());
        assert_eq!(entry.work_key, "/works/OL7W");
        assert_eq!(entry.title, "");
    }
}
