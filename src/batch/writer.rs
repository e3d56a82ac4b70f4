//! Write batch results as CSV or JSON

use std::io::Write;

use super::BatchRow;
use crate::error::BatchResult;

/// CSV with a header row; a missing result is an empty field
pub fn write_csv<W: Write>(writer: W, rows: &[BatchRow]) -> BatchResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON array; a missing result is `null`
pub fn write_json<W: Write>(mut writer: W, rows: &[BatchRow]) -> BatchResult<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
