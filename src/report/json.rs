//! JSON snapshot

use super::ReportError;
use crate::view::ViewModel;
use std::io::Write;

pub fn write<W: Write>(writer: &mut W, view: &ViewModel) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *writer, view)?;
    writeln!(writer)?;
    Ok(())
}
