use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::extract::{elem_text, spaced_text};
use crate::types::MovieDetails;

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("invalid regex: year"));

static RE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,3}\s?(?:minutes|min)\b").expect("invalid regex: duration")
});

static PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("invalid selector: paragraphs"));

const MIN_SUMMARY_LEN: usize = 20;

fn page_text(document: &Html) -> String {
    spaced_text(document.root_element())
}

fn find_year(text: &str) -> Option<String> {
    RE_YEAR.find(text).map(|m| m.as_str().to_string())
}

fn find_duration(text: &str) -> Option<String> {
    RE_DURATION.find(text).map(|m| m.as_str().to_string())
}

/// Reads a movie's own page: the first paragraph long enough to be a summary,
/// plus the first year and running time mentioned anywhere on it.
pub fn parse_movie_details(html: &str) -> MovieDetails {
    let document = Html::parse_document(html);
    let text = page_text(&document);

    let summary = document
        .select(&PARAGRAPHS)
        .map(elem_text)
        .find(|t| t.chars().count() > MIN_SUMMARY_LEN);

    MovieDetails {
        summary,
        year: find_year(&text),
        duration: find_duration(&text),
    }
}

/// Same as [`parse_movie_details`] over a listing fragment, except any
/// non-empty first paragraph counts as the summary.
pub fn extract_details_from_markup(raw_markup: &str) -> MovieDetails {
    let fragment = Html::parse_fragment(raw_markup);
    let text = page_text(&fragment);

    let summary = fragment
        .select(&PARAGRAPHS)
        .next()
        .map(elem_text)
        .filter(|t| !t.is_empty());

    MovieDetails {
        summary,
        year: find_year(&text),
        duration: find_duration(&text),
    }
}
