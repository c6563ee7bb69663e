//! Domain layer for the Zoom attendance analyzer.
//!
//! Holds the participant and meeting types, the attendance classifier,
//! statistics and formatting helpers, Zoom timestamp parsing, CLI settings
//! and the shared error type.

pub mod classification;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;
pub mod time_utils;
