//! CSV export for cost results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::types::CalculationResult;

/// Column header for cost result export.
const HEADER: &str = "total_consumption_kwh,blended_rate_net_ct_per_kwh,\
                       blended_rate_per_kwh,fixed_charge_for_period,\
                       energy_cost,total_cost,period,include_vat";

/// Exports cost results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per result. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[CalculationResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes cost results as CSV to any writer.
///
/// Numbers use the display precision of [`CalculationResult`]: four places
/// for the per-kWh rate, two for everything else.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[CalculationResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            format!("{:.2}", r.total_consumption_kwh),
            format!("{:.2}", r.blended_rate_net_ct_per_kwh),
            format!("{:.4}", r.blended_rate_per_kwh),
            format!("{:.2}", r.fixed_charge_for_period),
            format!("{:.2}", r.energy_cost),
            format!("{:.2}", r.total_cost),
            r.period.to_string(),
            r.include_vat.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
