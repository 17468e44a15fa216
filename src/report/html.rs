//! HTML snapshot: the dashboard page with a fixed view baked in

use super::ReportError;
use crate::page;
use crate::view::ViewModel;
use std::io::Write;

pub fn write<W: Write>(writer: &mut W, view: &ViewModel) -> Result<(), ReportError> {
    let json = serde_json::to_string(view)?;
    writer.write_all(page::snapshot_html(&json).as_bytes())?;
    Ok(())
}
