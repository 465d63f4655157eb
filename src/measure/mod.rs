//! Measurement engines for loaded geometric fields.
//!
//! Overview
//! - [`femur::FemurMeasurements`] and [`pelvis::PelvisMeasurements`] populate
//!   a fixed, named [`crate::types::MeasurementSet`] from a loaded model.
//! - [`geomfit`] holds the fitting primitives (spheres, axes, widths).
//! - [`acs`] builds the ISB pelvic anatomical frame.
//! - [`hjc`] holds the hip-joint-centre regression models; the literature
//!   compilation backing them is an explicit argument of
//!   [`pelvis::PelvisMeasurements::calc_hjc_predictions`].
//!
//! Some named outputs are not independent computations but declared
//! projections of another measurement's centre point (`head_centre`,
//! `hip_joint_centre_l`, `hip_joint_centre_r`). Each engine owns a
//! [`DerivedCentre`] table and materialises those entries after the primary
//! computations, so the alias relationship is part of the engine contract.

pub mod acs;
pub mod femur;
pub mod geomfit;
pub mod hjc;
pub mod pelvis;

use crate::field::FieldError;
use crate::types::{Measurement, MeasurementSet};
use geomfit::FitError;

/// Failures of the measurement engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeasurementError {
    /// The reference topology lacks a region the engine requires.
    MissingRegion(String),
    /// The reference topology lacks a landmark the engine requires.
    MissingLandmark(String),
    /// A fitting step failed on this model's geometry.
    DegenerateGeometry { context: String, detail: String },
    /// An operation was invoked before the one it depends on.
    MissingPrerequisite(&'static str),
}

impl std::fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementError::MissingRegion(name) => {
                write!(f, "reference model has no region '{name}'")
            }
            MeasurementError::MissingLandmark(name) => {
                write!(f, "reference model has no landmark '{name}'")
            }
            MeasurementError::DegenerateGeometry { context, detail } => {
                write!(f, "{context}: {detail}")
            }
            MeasurementError::MissingPrerequisite(what) => f.write_str(what),
        }
    }
}

impl std::error::Error for MeasurementError {}

impl MeasurementError {
    fn from_field(err: FieldError) -> Self {
        match err {
            FieldError::UnknownRegion(name) => MeasurementError::MissingRegion(name),
            FieldError::UnknownLandmark(name) => MeasurementError::MissingLandmark(name),
            FieldError::EmptyRegion(name) => MeasurementError::MissingRegion(name),
        }
    }

    fn from_fit(context: &str, err: FitError) -> Self {
        MeasurementError::DegenerateGeometry {
            context: context.to_string(),
            detail: err.to_string(),
        }
    }
}

/// Declares a measurement that is a pure projection of another measurement's
/// centre point rather than an independent computation.
#[derive(Clone, Copy, Debug)]
pub struct DerivedCentre {
    pub name: &'static str,
    pub source: &'static str,
}

/// Materialises every declared projection. The source measurements must
/// already be present and carry a centre.
pub(crate) fn apply_derived_centres(
    set: &mut MeasurementSet,
    table: &[DerivedCentre],
) -> Result<(), MeasurementError> {
    for derived in table {
        let source = set.get(derived.source).ok_or_else(|| {
            MeasurementError::DegenerateGeometry {
                context: derived.name.to_string(),
                detail: format!("source measurement '{}' is missing", derived.source),
            }
        })?;
        let centre = source.centre.ok_or_else(|| MeasurementError::DegenerateGeometry {
            context: derived.name.to_string(),
            detail: format!("source measurement '{}' carries no centre", derived.source),
        })?;
        set.insert(Measurement::point(derived.name, centre));
    }
    Ok(())
}
