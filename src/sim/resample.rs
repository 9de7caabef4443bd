//! Time-axis re-indexing between source and output granularities.

use crate::config::ConfigError;

/// Policy used to re-index a series onto a new time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplePolicy {
    /// Each output slot repeats the most recent source sample at or
    /// before its timestamp. Point-in-time semantics.
    HoldLast,
    /// Each output bucket averages the source samples falling inside
    /// it. Energy/rate semantics.
    Mean,
}

/// Parses an output frequency string such as `"60min"`, `"2h"`, or
/// `"1d"` into whole minutes.
///
/// # Errors
///
/// Returns a `ConfigError` for malformed strings, unsupported units,
/// or a zero duration.
pub fn parse_freq(freq: &str) -> Result<u32, ConfigError> {
    let s = freq.trim();
    let err = |message: String| ConfigError {
        field: "output.freq".to_string(),
        message,
    };

    let (digits, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
    let value: u32 = digits
        .parse()
        .map_err(|_| err(format!("missing duration value in \"{s}\"")))?;
    let minutes = match unit.trim() {
        "min" | "m" => value,
        "h" | "hr" => value.saturating_mul(60),
        "d" => value.saturating_mul(1440),
        other => {
            return Err(err(format!(
                "unsupported unit \"{other}\" in \"{s}\" (expected min, h, or d)"
            )));
        }
    };
    if minutes == 0 {
        return Err(err(format!("duration must be positive, got \"{s}\"")));
    }
    Ok(minutes)
}

/// Re-indexes `values`, sampled every `source_step_min` minutes, onto a
/// `target_step_min` axis under the given policy.
///
/// The mechanism is shared between the 1-minute consumption series and
/// the 10-minute occupancy series. When upsampling, a bucket without a
/// source sample falls back to hold-last so the output has no holes.
pub fn resample(
    values: &[f64],
    source_step_min: u32,
    target_step_min: u32,
    policy: ResamplePolicy,
) -> Vec<f64> {
    if values.is_empty() || source_step_min == target_step_min {
        return values.to_vec();
    }
    let source = u64::from(source_step_min);
    let target = u64::from(target_step_min);
    let total_min = values.len() as u64 * source;
    let n_out = total_min.div_ceil(target) as usize;

    let mut out = Vec::with_capacity(n_out);
    for k in 0..n_out as u64 {
        let start = k * target;
        let end = start + target;
        // Most recent sample at or before the bucket start.
        let held = values[((start / source) as usize).min(values.len() - 1)];
        match policy {
            ResamplePolicy::HoldLast => out.push(held),
            ResamplePolicy::Mean => {
                let first = (start.div_ceil(source) as usize).min(values.len());
                let last = (end.div_ceil(source) as usize).min(values.len());
                if first < last {
                    let sum: f64 = values[first..last].iter().sum();
                    out.push(sum / (last - first) as f64);
                } else {
                    out.push(held);
                }
            }
        }
    }
    out
}

/// A set of named series aligned to one uniform output time axis.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    step_min: u32,
    columns: Vec<(String, Vec<f64>)>,
}

impl ProfileTable {
    /// Creates an empty table with the given output step.
    pub fn new(step_min: u32) -> Self {
        Self {
            step_min,
            columns: Vec::new(),
        }
    }

    /// Appends a named column. All columns must share one length; a
    /// mismatched column is rejected.
    pub fn push_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), ConfigError> {
        if let Some((_, existing)) = self.columns.first()
            && existing.len() != values.len()
        {
            return Err(ConfigError {
                field: format!("table.{name}"),
                message: format!(
                    "column length {} does not match table length {}",
                    values.len(),
                    existing.len()
                ),
            });
        }
        self.columns.push((name.to_string(), values));
        Ok(())
    }

    /// Output step in minutes.
    pub fn step_min(&self) -> u32 {
        self.step_min
    }

    /// Number of rows (0 for an empty table).
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterates over `(name, values)` pairs in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}
