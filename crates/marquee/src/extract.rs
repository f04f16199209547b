use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::MovieRecord;

/// An ordered list of selectors evaluated first-match-wins inside a scope.
pub(crate) struct SelectorCascade(Vec<Selector>);

impl SelectorCascade {
    fn new(patterns: &[&str]) -> Self {
        Self(
            patterns
                .iter()
                .map(|p| Selector::parse(p).expect("invalid selector in cascade"))
                .collect(),
        )
    }

    pub(crate) fn first_match<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.0.iter().find_map(|selector| scope.select(selector).next())
    }

    /// Like [`Self::first_match`], but blank elements fall through to the
    /// next rule.
    pub(crate) fn first_text(&self, scope: ElementRef) -> Option<String> {
        self.0
            .iter()
            .flat_map(|selector| scope.select(selector))
            .map(elem_text)
            .find(|text| !text.is_empty())
    }
}

static CONTAINERS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.main-content-row, div.content-row")
        .expect("invalid selector: containers")
});

static LIST_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("invalid selector: list items"));

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: anchors"));

static LINKED_ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector: linked anchors"));

static TITLE_CASCADE: LazyLock<SelectorCascade> =
    LazyLock::new(|| SelectorCascade::new(&[".movie-title", "h3", "h2", "a"]));

// The trailing `p` doubles as the "first paragraph anywhere" fallback.
static SNIPPET_CASCADE: LazyLock<SelectorCascade> =
    LazyLock::new(|| SelectorCascade::new(&[".field-content", ".summary", "p"]));

static RATING_CASCADE: LazyLock<SelectorCascade> = LazyLock::new(|| {
    SelectorCascade::new(&[
        ".movie-rating",
        ".rating",
        ".score",
        "span[class*='rating']",
        "div[class*='rating']",
    ])
});

static RE_RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:/10| out of 10)\b").expect("invalid regex: rating")
});

pub(crate) fn elem_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Text with a space between neighbouring text nodes, so `<td>Year</td><td>1945</td>`
/// reads as `Year 1945`.
pub(crate) fn spaced_text(element: ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves `href` against `base_url`, keeping the href untouched when either
/// side cannot be parsed as a URL.
pub fn resolve_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::debug!("Keeping unresolved link '{}': {}", href, e);
            href.to_string()
        }
    }
}

fn first_href<'a>(scope: ElementRef<'a>) -> Option<&'a str> {
    scope
        .select(&LINKED_ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
}

/// A marked-up rating, else the first `7.5/10` or `8 out of 10` in the text.
fn find_rating(scope: ElementRef) -> Option<String> {
    RATING_CASCADE.first_text(scope).or_else(|| {
        RE_RATING
            .find(&spaced_text(scope))
            .map(|m| m.as_str().to_string())
    })
}

fn cascade_text(cascade: &SelectorCascade, container: ElementRef) -> String {
    cascade
        .first_match(container)
        .map(elem_text)
        .unwrap_or_default()
}

/// Emits one record per structural container, whether or not anything could
/// be pulled out of it.
pub fn primary_pass(document: &Html, base_url: &str) -> Vec<MovieRecord> {
    document
        .select(&CONTAINERS)
        .map(|container| {
            let link = first_href(container)
                .map(|href| resolve_link(base_url, href))
                .unwrap_or_default();

            let mut record = MovieRecord::new(
                cascade_text(&TITLE_CASCADE, container),
                link,
                cascade_text(&SNIPPET_CASCADE, container),
                container.html(),
            );
            record.rating = find_rating(container);
            record
        })
        .collect()
}

/// Emits a record for each list item holding an anchor with visible text.
/// List items without one are skipped.
pub fn fallback_pass(document: &Html, base_url: &str) -> Vec<MovieRecord> {
    document
        .select(&LIST_ITEMS)
        .filter_map(|item| {
            let (anchor, title) = item
                .select(&ANCHORS)
                .map(|a| (a, elem_text(a)))
                .find(|(_, text)| !text.is_empty())?;

            let link = anchor
                .value()
                .attr("href")
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(|href| resolve_link(base_url, href))
                .unwrap_or_default();

            let mut record = MovieRecord::new(title, link, String::new(), item.html());
            record.rating = find_rating(item);
            Some(record)
        })
        .collect()
}

pub fn extract_movies(document: &Html, base_url: &str) -> Vec<MovieRecord> {
    let records = primary_pass(document, base_url);
    if !records.is_empty() {
        log::debug!("Primary pass matched {} container(s)", records.len());
        return records;
    }

    let records = fallback_pass(document, base_url);
    log::debug!(
        "Primary pass matched nothing, list item fallback produced {} record(s)",
        records.len()
    );
    records
}
