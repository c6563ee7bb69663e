//! Terminal UI layer for the Zoom attendance analyzer.
//!
//! Provides themes, the header and attendance-bar components, the overview
//! and participant views, and the interactive application loop built on top
//! of [`ratatui`].

pub mod app;
pub mod components;
pub mod overview_view;
pub mod table_view;
pub mod themes;

pub use attendance_core as core;
