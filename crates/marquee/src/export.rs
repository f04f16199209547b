use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::MovieRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write JSON file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pretty-prints `records` as a JSON array. Raw markup is left out.
pub fn write_json<W: Write>(mut writer: W, records: &[MovieRecord]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_json_file(path: &Path, records: &[MovieRecord]) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, records)?;
    writer.flush()?;
    log::info!("Results written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MovieDetails;
    use serde_json::Value;

    #[test]
    fn test_json_omits_raw_markup() {
        let records = vec![MovieRecord::new(
            "Nosferatu".into(),
            "https://example.com/movie/nosferatu".into(),
            "A silent horror classic".into(),
            "<div class=\"content-row\"></div>".into(),
        )];

        let mut out = Vec::new();
        write_json(&mut out, &records).expect("Failed to write JSON");

        let value: Value = serde_json::from_slice(&out).expect("valid JSON");
        let first = &value[0];
        assert_eq!(first["title"], "Nosferatu");
        assert_eq!(first["link"], "https://example.com/movie/nosferatu");
        assert_eq!(first["snippet"], "A silent horror classic");
        assert_eq!(first["rating"], Value::Null);
        assert!(first.get("raw_markup").is_none());
        assert!(first.get("details").is_none());
    }

    #[test]
    fn test_json_includes_details_when_present() {
        let mut record =
            MovieRecord::new("Detour".into(), String::new(), String::new(), String::new());
        record.rating = Some("7 out of 10".into());
        record.details = Some(MovieDetails {
            summary: None,
            year: Some("1945".into()),
            duration: None,
        });

        let mut out = Vec::new();
        write_json(&mut out, &[record]).expect("Failed to write JSON");

        let value: Value = serde_json::from_slice(&out).expect("valid JSON");
        assert_eq!(value[0]["rating"], "7 out of 10");
        assert_eq!(value[0]["details"]["year"], "1945");
        assert_eq!(value[0]["details"]["summary"], Value::Null);
    }

    #[test]
    fn test_empty_list_is_an_empty_array() {
        let mut out = Vec::new();
        write_json(&mut out, &[]).expect("Failed to write JSON");
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_json_file_reports_missing_directory() {
        let path = Path::new("does-not-exist/records.json");
        let result = write_json_file(path, &[]);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
