//! Plain data model shared by the ROI engine and its front ends.

pub mod action;
pub mod file_formats;
pub mod settings;
pub mod variable;

pub const SCHEMA_VERSION: &str = "1.0";
