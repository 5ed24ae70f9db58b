//! Vellum Export
//!
//! Standalone snapshots of the active page: a JSON bundle for
//! interchange and a self-contained HTML file that approximates the
//! design with absolutely positioned elements.

pub mod html;
pub mod json;

pub use html::export_html;
pub use json::{export_json, ExportMetadata};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
