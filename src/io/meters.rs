//! CSV import for per-room meter readings.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::calc::meters::MeterReading;

/// Column header expected in meter CSV files.
const HEADER: &str = "label,start,end";

/// Loads meter readings from a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if the file cannot be opened or a row is malformed.
pub fn load_meters_csv(path: &Path) -> io::Result<Vec<MeterReading>> {
    let file = File::open(path)?;
    let readings = read_meters_csv(io::BufReader::new(file))?;
    tracing::debug!(path = %path.display(), meters = readings.len(), "loaded meter readings");
    Ok(readings)
}

/// Reads meter readings as CSV from any reader.
///
/// Expects exactly a `label,start,end` header. Empty `start`/`end` cells are
/// readings not yet entered and become `None`.
///
/// # Errors
///
/// Returns an `io::Error` of kind `InvalidData` for a different header, or
/// naming the 1-based data row that failed to parse.
pub fn read_meters_csv(reader: impl Read) -> io::Result<Vec<MeterReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("meter header: {e}"))
    })?;
    if !headers.iter().eq(HEADER.split(',')) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "meter header: expected `{HEADER}`, got `{}`",
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    let mut readings = Vec::new();
    for (i, record) in rdr.deserialize::<MeterReading>().enumerate() {
        let reading = record.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("meter row {}: {e}", i + 1),
            )
        })?;
        readings.push(reading);
    }
    Ok(readings)
}
