pub mod board;
pub mod side_panel;
pub mod task_editor;
pub mod theme;
pub mod toolbar;
