//! Plain-text measurement reports.
//!
//! One line per measurement, `"<name> : <value>"`, lexicographically sorted
//! by name. Values render through their `Display` impls; no precision
//! control is applied. The handling of null-valued measurements is an
//! explicit policy, the same for every caller in this crate.

use crate::types::MeasurementSet;
use std::fs;
use std::path::Path;

/// How the writer treats measurements that carry no value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullValuePolicy {
    /// Omit the line silently.
    Skip,
    /// Fail the write, naming the measurement.
    Fail,
}

/// Renders the report body.
pub fn format_report(set: &MeasurementSet, policy: NullValuePolicy) -> Result<String, String> {
    let mut out = String::new();
    for measurement in set.iter() {
        match (&measurement.value, policy) {
            (Some(value), _) => {
                out.push_str(&measurement.name);
                out.push_str(" : ");
                out.push_str(&value.to_string());
                out.push('\n');
            }
            (None, NullValuePolicy::Skip) => {}
            (None, NullValuePolicy::Fail) => {
                return Err(format!(
                    "Measurement '{}' has no value",
                    measurement.name
                ));
            }
        }
    }
    Ok(out)
}

/// Writes the report to `path` (overwriting), creating parent directories.
pub fn write_report(
    set: &MeasurementSet,
    path: &Path,
    policy: NullValuePolicy,
) -> Result<(), String> {
    let body = format_report(set, policy)?;
    ensure_parent_dir(path)?;
    fs::write(path, body).map_err(|e| format!("Failed to write report {}: {e}", path.display()))
}

/// Prints every measurement to stdout, sorted; null values print as `--`.
pub fn print_measurements(set: &MeasurementSet) {
    for measurement in set.iter() {
        match &measurement.value {
            Some(value) => println!("{} : {value}", measurement.name),
            None => println!("{} : --", measurement.name),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
