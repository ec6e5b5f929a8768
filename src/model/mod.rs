pub mod date;
pub mod document;
pub mod id;
pub mod mutation;
pub mod row;
pub mod task;
pub mod timebox;

pub use document::{Document, ViewSettings, Zoom, DOCUMENT_VERSION};
pub use id::{RowId, TaskId, TimeboxId};
pub use mutation::TaskMutations;
pub use row::{Row, RowPatch};
pub use task::{Task, TaskPatch, TaskStatus};
pub use timebox::{Timebox, TimeboxKind, TimeboxPatch};
