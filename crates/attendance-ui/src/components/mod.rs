//! Reusable line-level widgets shared by the views.

pub mod header;
pub mod status_bar;
