use serde::{Deserialize, Serialize};

use super::id::RowId;

/// A swimlane. Tasks point at rows through `Task::row_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub name: String,
    /// Display position; kept equal to the row's index in `Document::rows`.
    pub order: u32,
}

impl Row {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: RowId::generate(),
            name: name.into(),
            order,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub name: Option<String>,
}
