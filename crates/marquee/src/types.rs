use serde::{Deserialize, Serialize};

/// One loosely-structured listing entry pulled from a page.
///
/// Any field may be empty; deciding what to do with empty records is left to
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(skip)]
    pub raw_markup: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<MovieDetails>,
}

impl MovieRecord {
    pub fn new(title: String, link: String, snippet: String, raw_markup: String) -> Self {
        Self {
            title,
            link,
            snippet,
            rating: None,
            raw_markup,
            details: None,
        }
    }

    /// Title when present, link otherwise. Used to name a record in logs.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.link
        } else {
            &self.title
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.snippet.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub summary: Option<String>,
    pub year: Option<String>,
    pub duration: Option<String>,
}

impl MovieDetails {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.year.is_none() && self.duration.is_none()
    }
}
