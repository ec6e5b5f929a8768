use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::TimeboxId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeboxKind {
    Sprint,
    /// Planning interval.
    Pi,
}

impl TimeboxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimeboxKind::Sprint => "Sprint",
            TimeboxKind::Pi => "PI",
        }
    }
}

/// A dated annotation band drawn above the rows. Owns no tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timebox {
    pub id: TimeboxId,
    #[serde(rename = "type")]
    pub kind: TimeboxKind,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Timebox {
    pub fn new(kind: TimeboxKind, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: TimeboxId::generate(),
            kind,
            name: name.into(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeboxPatch {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
