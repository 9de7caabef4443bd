//! CSV export for resampled profile tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::resample::ProfileTable;

/// Exports a profile table to a CSV file at the given path.
///
/// Writes a header row (`slot_min` plus the table's column names)
/// followed by one data row per output slot. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns a `csv::Error` if file creation or writing fails.
pub fn export_csv(table: &ProfileTable, path: &Path) -> Result<(), csv::Error> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(table, buf)
}

/// Writes a profile table as CSV to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if writing fails.
pub fn write_csv(table: &ProfileTable, writer: impl Write) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header: slot timestamp in minutes, then the profile columns.
    let mut header = vec!["slot_min".to_string()];
    header.extend(table.column_names().iter().map(ToString::to_string));
    wtr.write_record(&header)?;

    let columns: Vec<&[f64]> = table.columns().map(|(_, v)| v).collect();
    for row in 0..table.num_rows() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push((row as u64 * u64::from(table.step_min())).to_string());
        for column in &columns {
            record.push(format!("{:.4}", column[row]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ProfileTable {
        let mut t = ProfileTable::new(60);
        t.push_column("Load", vec![120.0, 80.5, 0.0]).ok();
        t.push_column("AppHeatGain", vec![96.0, 64.4, 0.0]).ok();
        t
    }

    #[test]
    fn header_carries_slot_and_column_names() {
        let mut buf = Vec::new();
        write_csv(&table(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(first_line, "slot_min,Load,AppHeatGain");
    }

    #[test]
    fn row_count_matches_table_rows() {
        let mut buf = Vec::new();
        write_csv(&table(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 3 data rows
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("0,120.0000"));
        assert!(lines[2].starts_with("60,80.5000"));
        assert!(lines[3].starts_with("120,0.0000"));
    }

    #[test]
    fn deterministic_output() {
        let t = table();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&t, &mut buf1).ok();
        write_csv(&t, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&table(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(3));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            for i in 1..3 {
                let val: Option<Result<f64, _>> = rec.as_ref().map(|r| r[i].parse());
                assert!(val.is_some_and(|v| v.is_ok()), "column {i} should parse");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }
}
