//! Femur measurement engine.
//!
//! Populates the fixed femoral measurement set from a loaded field:
//! - `head_diameter` — sphere fit over the `head` region (carries the
//!   fitted centre),
//! - `neck_width`, `midshaft_diameter` — mean radial widths about the neck
//!   and shaft principal axes,
//! - `neck_shaft_angle` — angle between the neck axis (directed into the
//!   head) and the distally-directed shaft axis,
//! - `femoral_axis_length` — head centre to the intercondylar midpoint,
//! - `epicondylar_width` — distance between the epicondyle landmarks,
//! - `anteversion_angle` — neck vs. epicondylar axis in the transverse
//!   plane,
//! - `head_centre` — declared projection of `head_diameter`'s centre.

use log::debug;
use nalgebra::{Point3, Unit, Vector3};

use super::geomfit::{
    angle_between_deg, fit_sphere, mean_radial_distance, principal_axis,
    projected_axis_angle_deg,
};
use super::{apply_derived_centres, DerivedCentre, MeasurementError};
use crate::field::GeometricField;
use crate::types::{Measurement, MeasurementSet};

/// Per-element discretisation used when sampling regions.
const REGION_DISC: [usize; 2] = [6, 6];

/// Measurements that are projections of another measurement's centre.
pub const DERIVED: &[DerivedCentre] = &[DerivedCentre {
    name: "head_centre",
    source: "head_diameter",
}];

/// Measurement engine for a femur field.
pub struct FemurMeasurements {
    field: GeometricField,
    pub measurements: MeasurementSet,
}

impl FemurMeasurements {
    pub fn new(field: GeometricField) -> Self {
        Self {
            field,
            measurements: MeasurementSet::new(),
        }
    }

    pub fn field(&self) -> &GeometricField {
        &self.field
    }

    /// Computes the full femoral measurement set, then materialises the
    /// declared derived measurements.
    pub fn calc_measurements(&mut self) -> Result<(), MeasurementError> {
        let head = self.region("head")?;
        let neck = self.region("neck")?;
        let shaft = self.region("shaft")?;

        let head_sphere =
            fit_sphere(&head).map_err(|e| MeasurementError::from_fit("head sphere fit", e))?;
        debug!(
            "head sphere: centre [{:.1}, {:.1}, {:.1}], radius {:.1}",
            head_sphere.centre.x, head_sphere.centre.y, head_sphere.centre.z, head_sphere.radius
        );
        self.measurements.insert(Measurement::scalar_with_centre(
            "head_diameter",
            head_sphere.diameter(),
            head_sphere.centre,
        ));

        let neck_axis =
            principal_axis(&neck).map_err(|e| MeasurementError::from_fit("neck axis", e))?;
        let shaft_axis =
            principal_axis(&shaft).map_err(|e| MeasurementError::from_fit("shaft axis", e))?;

        self.measurements.insert(Measurement::scalar(
            "neck_width",
            2.0 * mean_radial_distance(&neck, &neck_axis),
        ));
        self.measurements.insert(Measurement::scalar(
            "midshaft_diameter",
            2.0 * mean_radial_distance(&shaft, &shaft_axis),
        ));

        // Orient the axes before taking the clinical angle: the neck axis
        // points from the neck into the head, the shaft axis distally.
        let neck_dir = orient(
            neck_axis.direction,
            &(head_sphere.centre - neck_axis.point),
        );
        let shaft_dir = orient(
            shaft_axis.direction,
            &(shaft_axis.point - neck_axis.point),
        );
        self.measurements.insert(Measurement::scalar(
            "neck_shaft_angle",
            angle_between_deg(&neck_dir, &shaft_dir),
        ));

        let medial = self.landmark("medial_epicondyle")?;
        let lateral = self.landmark("lateral_epicondyle")?;
        let condylar_axis = medial - lateral;
        self.measurements.insert(Measurement::scalar(
            "epicondylar_width",
            condylar_axis.norm(),
        ));

        let intercondylar = nalgebra::center(&medial, &lateral);
        self.measurements.insert(Measurement::scalar(
            "femoral_axis_length",
            (head_sphere.centre - intercondylar).norm(),
        ));

        self.measurements.insert(Measurement::scalar(
            "anteversion_angle",
            projected_axis_angle_deg(&neck_dir, &condylar_axis, &shaft_axis.direction),
        ));

        apply_derived_centres(&mut self.measurements, DERIVED)?;
        debug!("femur measurements: {} entries", self.measurements.len());
        Ok(())
    }

    fn region(&self, name: &str) -> Result<Vec<Point3<f64>>, MeasurementError> {
        self.field
            .region_points(name, REGION_DISC)
            .map_err(MeasurementError::from_field)
    }

    fn landmark(&self, name: &str) -> Result<Point3<f64>, MeasurementError> {
        self.field.landmark(name).map_err(MeasurementError::from_field)
    }
}

/// Flips `axis` if needed so it points along `towards`.
fn orient(axis: Unit<Vector3<f64>>, towards: &Vector3<f64>) -> Vector3<f64> {
    if axis.dot(towards) < 0.0 {
        -axis.into_inner()
    } else {
        axis.into_inner()
    }
}

// The engine is exercised end-to-end against synthetic models in
// tests/e2e.rs; the fitting primitives have their own unit tests.
