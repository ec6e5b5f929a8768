//! The timeline interaction engine: geometry plus the drag state machine.

pub mod drag;
pub mod layout;
pub mod metrics;

pub use drag::{ActiveDrag, DragInterpreter, DragMode, DragOutcome, DragState};
pub use layout::{BoardLayout, RowBand, Span, TaskSlot};
pub use metrics::LayoutMetrics;
