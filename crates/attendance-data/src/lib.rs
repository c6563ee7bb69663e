//! Report ingestion layer for the Zoom attendance analyzer.
//!
//! Reads a participant report from disk, splits the composite file into its
//! meeting block and participant table, loads and classifies participants,
//! aggregates per-identity statistics and writes the cleaned export.

pub mod aggregator;
pub mod analysis;
pub mod composite;
pub mod export;
pub mod metadata;
pub mod reader;
pub mod table;

pub use attendance_core as core;
