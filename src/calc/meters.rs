//! Per-room meter readings and their reduction to one consumption total.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Start and end reading of one physical meter.
///
/// Either value may be `None` while still awaiting entry; a missing value
/// counts as zero during aggregation. Labels are free text and need not be
/// unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeterReading {
    pub label: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

impl MeterReading {
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            label: label.into(),
            start: Some(start),
            end: Some(end),
        }
    }

    /// A meter with no readings entered yet.
    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: None,
            end: None,
        }
    }

    /// Consumption contributed by this meter, clamped at zero.
    pub fn consumption(&self) -> f64 {
        let diff = self.end.unwrap_or(0.0) - self.start.unwrap_or(0.0);
        if diff > 0.0 { diff } else { 0.0 }
    }

    /// Advisory warning when both readings are present and end < start.
    pub fn warning(&self) -> Option<MeterWarning> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end < start => {
                Some(MeterWarning::EndBeforeStart { start, end })
            }
            _ => None,
        }
    }
}

/// Starting set of meters for a fresh calculation: two empty rooms.
pub fn default_meters() -> Vec<MeterReading> {
    vec![MeterReading::blank("Room 1"), MeterReading::blank("Room 2")]
}

/// Sums the clamped per-meter differences. An empty slice yields zero.
pub fn aggregate(readings: &[MeterReading]) -> f64 {
    readings.iter().map(MeterReading::consumption).sum()
}

/// Non-blocking problems spotted in a single meter reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeterWarning {
    /// The end reading is below the start reading; the meter contributes nothing.
    EndBeforeStart { start: f64, end: f64 },
}

impl fmt::Display for MeterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndBeforeStart { start, end } => {
                write!(f, "end reading {end} is below start reading {start}")
            }
        }
    }
}

/// A warning tied to the meter it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedWarning {
    pub index: usize,
    pub label: String,
    pub warning: MeterWarning,
}

/// Collects advisory warnings for every meter, in input order.
pub fn meter_warnings(readings: &[MeterReading]) -> Vec<IndexedWarning> {
    readings
        .iter()
        .enumerate()
        .filter_map(|(index, r)| {
            r.warning().map(|warning| IndexedWarning {
                index,
                label: r.label.clone(),
                warning,
            })
        })
        .collect()
}
