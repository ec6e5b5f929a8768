use std::path::Path;

use crate::model::date::format_date;
use crate::model::Document;

use super::IoError;

/// Export every task to a semicolon-delimited CSV file, grouped by row in
/// board order.
///
/// Columns: Row ; Task ; Start ; End ; Owner ; Status ; Progress ; Link
/// Returns the number of tasks written.
pub fn export_csv(doc: &Document, path: &Path) -> Result<usize, IoError> {
    let file = std::fs::File::create(path)?;
    let count = write_csv(doc, file)?;
    log::info!("exported {count} tasks to {}", path.display());
    Ok(count)
}

pub fn write_csv<W: std::io::Write>(doc: &Document, out: W) -> Result<usize, IoError> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    wtr.write_record(["Row", "Task", "Start", "End", "Owner", "Status", "Progress", "Link"])?;

    let groups = doc.group_by_row();
    let mut count = 0;
    for row in &doc.rows {
        for task in groups.get(&row.id).into_iter().flatten() {
            wtr.write_record([
                row.name.as_str(),
                task.name.as_str(),
                &format_date(task.start),
                &format_date(task.end),
                task.owner.as_deref().unwrap_or(""),
                task.status.map(|s| s.label()).unwrap_or(""),
                &task.progress.map(|p| format!("{p:.0}")).unwrap_or_default(),
                task.link.as_deref().unwrap_or(""),
            ])?;
            count += 1;
        }
    }

    wtr.flush()?;
    Ok(count)
}
