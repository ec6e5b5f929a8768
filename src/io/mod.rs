pub mod autosave;
pub mod csv_export;
pub mod file;
pub mod validate;

pub use autosave::Autosave;
pub use file::{export_file_name, load_document, save_document};
pub use validate::{repair_orphans, validate, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
