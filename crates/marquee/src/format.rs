use std::io::{self, Write};

use crate::types::{MovieDetails, MovieRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `Title: Description`, one line per record.
    SingleLine,
    /// Labelled `Title:` and `Description:` lines.
    #[default]
    MultiLine,
}

/// Writes every printable record in `layout`. Records with neither a title
/// nor a snippet are skipped without leaving a separator behind.
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[MovieRecord],
    layout: Layout,
) -> io::Result<()> {
    for record in records.iter().filter(|r| !r.is_blank()) {
        match layout {
            Layout::SingleLine => write_single_line(out, record)?,
            Layout::MultiLine => write_multi_line(out, record)?,
        }
    }
    Ok(())
}

fn write_single_line<W: Write>(out: &mut W, record: &MovieRecord) -> io::Result<()> {
    match (record.title.as_str(), record.snippet.as_str()) {
        ("", snippet) => writeln!(out, "{}", snippet)?,
        (title, "") => writeln!(out, "{}", title)?,
        (title, snippet) => writeln!(out, "{}: {}", title, snippet)?,
    }
    writeln!(out)
}

fn write_multi_line<W: Write>(out: &mut W, record: &MovieRecord) -> io::Result<()> {
    if !record.title.is_empty() {
        writeln!(out, "Title: {}", record.title)?;
    }
    if !record.snippet.is_empty() {
        writeln!(out, "Description: {}", record.snippet)?;
    }
    if let Some(rating) = &record.rating {
        writeln!(out, "Rating: {}", rating)?;
    }
    if let Some(details) = &record.details {
        write_details(out, details)?;
    }
    writeln!(out)
}

fn write_details<W: Write>(out: &mut W, details: &MovieDetails) -> io::Result<()> {
    if let Some(year) = &details.year {
        writeln!(out, "Year: {}", year)?;
    }
    if let Some(duration) = &details.duration {
        writeln!(out, "Duration: {}", duration)?;
    }
    if let Some(summary) = &details.summary {
        writeln!(out, "Summary: {}", summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, snippet: &str) -> MovieRecord {
        MovieRecord::new(
            title.to_string(),
            "https://example.com/movie".to_string(),
            snippet.to_string(),
            "<div></div>".to_string(),
        )
    }

    fn render(records: &[MovieRecord], layout: Layout) -> String {
        let mut out = Vec::new();
        write_records(&mut out, records, layout).expect("writing to a Vec never fails");
        String::from_utf8(out).expect("output is utf-8")
    }

    #[test]
    fn test_single_line_title_and_snippet() {
        let out = render(
            &[record("Nosferatu", "A silent horror classic")],
            Layout::SingleLine,
        );
        assert_eq!(out, "Nosferatu: A silent horror classic\n\n");
    }

    #[test]
    fn test_single_line_partial_records() {
        let out = render(
            &[record("Metropolis", ""), record("", "Only a description")],
            Layout::SingleLine,
        );
        assert_eq!(out, "Metropolis\n\nOnly a description\n\n");
    }

    #[test]
    fn test_single_line_skips_blank_records() {
        assert_eq!(render(&[record("", "")], Layout::SingleLine), "");
    }

    #[test]
    fn test_multi_line_title_only() {
        let out = render(&[record("Metropolis", "")], Layout::MultiLine);
        assert_eq!(out, "Title: Metropolis\n\n");
    }

    #[test]
    fn test_multi_line_full_and_blank_records() {
        let out = render(
            &[
                record("", ""),
                record("Nosferatu", "A silent horror classic"),
                record("", ""),
                record("", "Snippet only"),
            ],
            Layout::MultiLine,
        );
        assert_eq!(
            out,
            "Title: Nosferatu\nDescription: A silent horror classic\n\nDescription: Snippet only\n\n"
        );
    }

    #[test]
    fn test_multi_line_prints_details() {
        let mut rec = record("Detour", "");
        rec.details = Some(MovieDetails {
            summary: None,
            year: Some("1945".into()),
            duration: Some("68 minutes".into()),
        });

        let out = render(&[rec.clone()], Layout::MultiLine);
        assert_eq!(out, "Title: Detour\nYear: 1945\nDuration: 68 minutes\n\n");

        let out = render(&[rec], Layout::SingleLine);
        assert_eq!(out, "Detour\n\n");
    }

    #[test]
    fn test_multi_line_prints_rating() {
        let mut rated = record("Nosferatu", "A silent horror classic");
        rated.rating = Some("8.5/10".into());
        let mut blank = record("", "");
        blank.rating = Some("3/10".into());

        let out = render(&[rated.clone(), blank], Layout::MultiLine);
        assert_eq!(
            out,
            "Title: Nosferatu\nDescription: A silent horror classic\nRating: 8.5/10\n\n"
        );

        let out = render(&[rated], Layout::SingleLine);
        assert_eq!(out, "Nosferatu: A silent horror classic\n\n");
    }

    #[test]
    fn test_link_and_markup_are_never_printed() {
        let out = render(&[record("Nosferatu", "Classic")], Layout::MultiLine);
        assert!(!out.contains("example.com"));
        assert!(!out.contains("<div>"));
    }
}
