use std::borrow::Cow;
use std::io::Write;

use crate::error::{Result, SheetError};
use crate::extract::FlatRecord;

/// Column layout of the output sheet. The unnamed leading column holds the
/// 0-based record index.
pub const COLUMNS: [&str; 7] = [
    "",
    "traceID",
    "Rcv_Duration",
    "Print_Duration",
    "Partition",
    "Key",
    "StartTimeDiff",
];

/// Writes a header row and one row per record. Unset partition/key fields
/// become empty cells.
pub fn write_csv<W: Write>(records: &[FlatRecord], out: &mut W) -> Result<()> {
    write_row(out, &COLUMNS.map(Cow::Borrowed))?;
    for (index, record) in records.iter().enumerate() {
        write_row(
            out,
            &[
                Cow::Owned(index.to_string()),
                Cow::Borrowed(record.trace_id.as_str()),
                Cow::Owned(record.recv_duration.to_string()),
                Cow::Owned(record.print_duration.to_string()),
                Cow::Borrowed(record.partition.as_deref().unwrap_or("")),
                Cow::Borrowed(record.key.as_deref().unwrap_or("")),
                Cow::Owned(record.start_time_diff.to_string()),
            ],
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, fields: &[Cow<'_, str>]) -> Result<()> {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&escape(field));
    }
    line.push('\n');
    out.write_all(line.as_bytes())
        .map_err(|e| SheetError::Csv(e.to_string()))
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
