use std::io::Write;
use std::path::Path;

use crate::model::Document;

use super::validate::{repair_orphans, validate};
use super::IoError;

/// Save a document to a pretty-printed JSON file.
///
/// The JSON goes to a temporary file next to `path` that is then renamed over
/// it, so an interrupted write never leaves a truncated document behind.
pub fn save_document(doc: &Document, path: &Path) -> Result<(), IoError> {
    let json = serde_json::to_string_pretty(doc)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    log::info!("saved document `{}` to {}", doc.title, path.display());
    Ok(())
}

/// Load, validate and repair a document from a JSON file.
pub fn load_document(path: &Path) -> Result<Document, IoError> {
    let json = std::fs::read_to_string(path)?;
    let doc = parse_document(&json)?;
    log::info!(
        "loaded document `{}` from {} ({} rows, {} tasks)",
        doc.title,
        path.display(),
        doc.rows.len(),
        doc.tasks.len()
    );
    Ok(doc)
}

/// Parse JSON text into a board-ready document.
pub fn parse_document(json: &str) -> Result<Document, IoError> {
    let mut doc: Document = serde_json::from_str(json)?;
    validate(&doc)?;
    repair_orphans(&mut doc);
    Ok(doc)
}

/// `<title>_<YYYY-MM-DD>.gantt.json`, with the title lowercased and anything
/// outside `[a-z0-9]` replaced by `_`.
pub fn export_file_name(doc: &Document) -> String {
    let safe_title: String = doc
        .title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "{}_{}.gantt.json",
        safe_title,
        doc.updated_at.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn export_name_is_filesystem_safe() {
        let mut doc = Document::default();
        doc.title = "Q3 Plan: Web & App".into();
        doc.updated_at = chrono::Utc.with_ymd_and_hms(2024, 7, 9, 12, 0, 0).unwrap();
        assert_eq!(export_file_name(&doc), "q3_plan__web___app_2024-07-09.gantt.json");
    }

    #[test]
    fn malformed_dates_fail_to_parse() {
        let json = r#"{"version":1,"title":"x","rows":[],"tasks":[
            {"id":"t","rowId":"r","name":"n","start":"2024/01/01","end":"2024-01-02"}
        ],"timeboxes":[],"view":{"zoom":"day","showTimeboxes":true,"collapsedRowIds":[]}}"#;
        assert!(matches!(parse_document(json), Err(IoError::Json(_))));
    }

    #[test]
    fn parse_repairs_orphans_after_validation() {
        let json = r#"{"version":1,"title":"x","rows":[{"id":"r1","name":"Only","order":0}],"tasks":[
            {"id":"t","rowId":"missing","name":"n","start":"2024-01-01","end":"2024-01-02"}
        ],"timeboxes":[],"view":{"zoom":"week","showTimeboxes":false,"collapsedRowIds":[]}}"#;
        let doc = parse_document(json).unwrap();
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.tasks[0].row_id, doc.rows[1].id);
        assert_eq!(doc.view.zoom, crate::model::Zoom::Week);
    }

    #[test]
    fn save_replaces_the_file_without_leaving_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.gantt.json");
        std::fs::write(&path, "stale and much longer than anything else written here ".repeat(200)).unwrap();

        let mut doc = Document::default();
        doc.title = "Fresh".into();
        save_document(&doc, &path).unwrap();

        assert_eq!(load_document(&path).unwrap(), doc);
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
