//! Swimlane planning board: rows of dated tasks on a day-granular timeline,
//! edited by dragging task glyphs directly on the canvas.
//!
//! The core (`model`, `timeline`, `io`, `config`) has no UI state of its own;
//! `ui` and `app` put it on screen with egui.

pub mod app;
pub mod config;
pub mod io;
pub mod logging;
pub mod model;
pub mod timeline;
pub mod ui;
