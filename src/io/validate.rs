//! Structural checks and repair applied to documents coming from disk, before
//! the board ever sees them.

use std::collections::HashSet;

use crate::model::{Document, Row, RowId, DOCUMENT_VERSION};

const UNASSIGNED_ROW_NAME: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("version: expected 1, found {0}")]
    UnsupportedVersion(u32),
    #[error("title: must not be empty")]
    EmptyTitle,
    #[error("{path}: id must not be empty")]
    EmptyId { path: String },
    #[error("{path}: duplicate id `{id}`")]
    DuplicateId { path: String, id: String },
    #[error("{path}.end: start date must be before or equal to end date")]
    InvertedRange { path: String },
    #[error("{path}.progress: must be between 0 and 100, found {value}")]
    ProgressOutOfRange { path: String, value: f32 },
}

/// Check everything the board relies on except row references, which
/// [`repair_orphans`] fixes instead of rejecting.
pub fn validate(doc: &Document) -> Result<(), ValidationError> {
    if doc.version != DOCUMENT_VERSION {
        return Err(ValidationError::UnsupportedVersion(doc.version));
    }
    if doc.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let mut seen = HashSet::new();
    for (i, row) in doc.rows.iter().enumerate() {
        check_id(&mut seen, &format!("rows.{i}"), row.id.as_str())?;
    }

    let mut seen = HashSet::new();
    for (i, task) in doc.tasks.iter().enumerate() {
        let path = format!("tasks.{i}");
        check_id(&mut seen, &path, task.id.as_str())?;
        if task.row_id.as_str().is_empty() {
            return Err(ValidationError::EmptyId {
                path: format!("{path}.rowId"),
            });
        }
        if task.start > task.end {
            return Err(ValidationError::InvertedRange { path });
        }
        if let Some(value) = task.progress {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::ProgressOutOfRange { path, value });
            }
        }
    }

    let mut seen = HashSet::new();
    for (i, timebox) in doc.timeboxes.iter().enumerate() {
        let path = format!("timeboxes.{i}");
        check_id(&mut seen, &path, timebox.id.as_str())?;
        if timebox.start > timebox.end {
            return Err(ValidationError::InvertedRange { path });
        }
    }
    Ok(())
}

fn check_id<'a>(seen: &mut HashSet<&'a str>, path: &str, id: &'a str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId {
            path: path.to_string(),
        });
    }
    if !seen.insert(id) {
        return Err(ValidationError::DuplicateId {
            path: path.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Move tasks that point at a missing row into a new "Unassigned" row at the
/// bottom. Returns how many tasks were moved.
pub fn repair_orphans(doc: &mut Document) -> usize {
    let known: HashSet<RowId> = doc.rows.iter().map(|r| r.id.clone()).collect();
    let orphans = doc.tasks.iter().filter(|t| !known.contains(&t.row_id)).count();
    if orphans == 0 {
        return 0;
    }

    let unassigned = Row::new(UNASSIGNED_ROW_NAME, doc.rows.len() as u32);
    for task in doc.tasks.iter_mut().filter(|t| !known.contains(&t.row_id)) {
        task.row_id = unassigned.id.clone();
    }
    doc.rows.push(unassigned);
    log::warn!("repaired {orphans} orphan task(s) into an Unassigned row");
    orphans
}
