//! Snapshot export of a rendered view
//!
//! Writes one [`ViewModel`] to disk so a particular filter combination can be
//! shared without running the server:
//!
//! - **HTML**: the dashboard page with the view baked in (charts still drawn
//!   by vega-embed in the browser)
//! - **JSON**: the raw view model
//!
//! # Usage
//!
//! ```ignore
//! use trackboard::{report, view};
//!
//! let vm = view::render(&dataset, &selection);
//! report::generate("snapshot.html", &vm)?;  // HTML
//! report::generate("snapshot.json", &vm)?;  // JSON
//! ```

pub mod html;
pub mod json;

use crate::view::ViewModel;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unsupported snapshot format '{0}' (use .html or .json)")]
    UnsupportedFormat(String),

    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize view: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            _ => Err(ReportError::UnsupportedFormat(ext)),
        }
    }
}

/// Write a snapshot in the format implied by the file extension
pub fn generate<P: AsRef<Path>>(path: P, view: &ViewModel) -> Result<(), ReportError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    let mut file = std::fs::File::create(path)?;

    match format {
        Format::Html => html::write(&mut file, view),
        Format::Json => json::write(&mut file, view),
    }
}
