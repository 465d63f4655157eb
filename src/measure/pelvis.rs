//! Pelvis measurement engine.
//!
//! Works in two stages mirroring the tool's call sequence:
//! [`PelvisMeasurements::calc_measurements`] establishes the ISB anatomical
//! frame, the pelvic dimensions and the acetabulum sphere fits, then
//! [`PelvisMeasurements::calc_hjc_predictions`] adds hip-joint-centre
//! estimates from the named regression models plus the mesh-derived ones.
//!
//! Landmarks are reported in the anatomical frame (`landmark_acs_*`). The
//! `sacral_promontory_height` measurement is recorded without a value when
//! the optional `sacral_promontory` landmark is absent from the reference
//! topology; the report writer decides how null values are handled.

use log::{debug, warn};
use nalgebra::Point3;

use super::acs::{AcsConvention, AnatomicalCoordinateSystem};
use super::geomfit::fit_sphere;
use super::hjc::{predict_hjc, LiteratureSource, PelvicDims, RegressionModel};
use super::{apply_derived_centres, DerivedCentre, MeasurementError};
use crate::field::GeometricField;
use crate::types::{Measurement, MeasurementSet, PopulationClass, Side};

/// Per-element discretisation used when sampling the acetabula.
const REGION_DISC: [usize; 2] = [6, 6];

/// Measurements that are projections of another measurement's centre.
pub const DERIVED: &[DerivedCentre] = &[
    DerivedCentre {
        name: "hip_joint_centre_l",
        source: "left_acetabulum_diameter",
    },
    DerivedCentre {
        name: "hip_joint_centre_r",
        source: "right_acetabulum_diameter",
    },
];

/// Measurement engine for the combined bilateral pelvis field.
pub struct PelvisMeasurements {
    field: GeometricField,
    convention: AcsConvention,
    acs: Option<AnatomicalCoordinateSystem>,
    dims: Option<PelvicDims>,
    pub measurements: MeasurementSet,
}

impl PelvisMeasurements {
    pub fn new(field: GeometricField, convention: AcsConvention) -> Self {
        Self {
            field,
            convention,
            acs: None,
            dims: None,
            measurements: MeasurementSet::new(),
        }
    }

    pub fn field(&self) -> &GeometricField {
        &self.field
    }

    /// The anatomical frame, available after [`Self::calc_measurements`].
    pub fn acs(&self) -> Option<&AnatomicalCoordinateSystem> {
        self.acs.as_ref()
    }

    /// A copy of the model expressed in the anatomical frame, available
    /// after [`Self::calc_measurements`]. Used by the viewer.
    pub fn aligned_field(&self) -> Option<GeometricField> {
        self.acs
            .as_ref()
            .map(|acs| self.field.map_nodes(|p| acs.to_local(p)))
    }

    /// Computes the geometric measurement set and the anatomical frame,
    /// then materialises the declared derived measurements.
    pub fn calc_measurements(&mut self) -> Result<(), MeasurementError> {
        let lasis = self.landmark("lasis")?;
        let rasis = self.landmark("rasis")?;
        let lpsis = self.landmark("lpsis")?;
        let rpsis = self.landmark("rpsis")?;
        let pubic_symphysis = self.landmark("pubic_symphysis")?;

        let acs = match self.convention {
            AcsConvention::Isb => {
                AnatomicalCoordinateSystem::isb_pelvis(lasis, rasis, lpsis, rpsis)?
            }
        };

        let mid_asis = nalgebra::center(&lasis, &rasis);
        let mid_psis = nalgebra::center(&lpsis, &rpsis);
        let dims = PelvicDims {
            width: (rasis - lasis).norm(),
            depth: (mid_asis - mid_psis).norm(),
            height: (mid_asis - pubic_symphysis).norm(),
        };
        debug!(
            "pelvic dimensions: width {:.1}, depth {:.1}, height {:.1}",
            dims.width, dims.depth, dims.height
        );

        self.measurements
            .insert(Measurement::scalar("inter_asis_distance", dims.width));
        self.measurements.insert(Measurement::scalar(
            "inter_psis_distance",
            (rpsis - lpsis).norm(),
        ));
        self.measurements
            .insert(Measurement::scalar("pelvis_depth", dims.depth));
        self.measurements
            .insert(Measurement::scalar("pelvis_height", dims.height));

        for (side, region, name) in [
            (Side::Left, "left_acetabulum", "left_acetabulum_diameter"),
            (Side::Right, "right_acetabulum", "right_acetabulum_diameter"),
        ] {
            let points = self
                .field
                .region_points(region, REGION_DISC)
                .map_err(MeasurementError::from_field)?;
            let sphere = fit_sphere(&points)
                .map_err(|e| MeasurementError::from_fit(&format!("{side} acetabulum fit"), e))?;
            debug!(
                "{side} acetabulum: centre [{:.1}, {:.1}, {:.1}], radius {:.1}",
                sphere.centre.x, sphere.centre.y, sphere.centre.z, sphere.radius
            );
            self.measurements.insert(Measurement::scalar_with_centre(
                name,
                sphere.diameter(),
                sphere.centre,
            ));
        }

        for (name, &node) in &self.field.topology.landmarks {
            let local = acs.to_local(&self.field.nodes[node]);
            self.measurements
                .insert(Measurement::point(format!("landmark_acs_{name}"), local));
        }

        match self.field.landmark("sacral_promontory") {
            Ok(p) => {
                self.measurements.insert(Measurement::scalar(
                    "sacral_promontory_height",
                    acs.to_local(&p).y,
                ));
            }
            Err(_) => {
                warn!("reference model has no sacral_promontory landmark");
                self.measurements
                    .insert(Measurement::absent("sacral_promontory_height"));
            }
        }

        self.acs = Some(acs);
        self.dims = Some(dims);

        apply_derived_centres(&mut self.measurements, DERIVED)?;
        debug!("pelvis measurements: {} entries", self.measurements.len());
        Ok(())
    }

    /// Adds hip-joint-centre estimates for every regression model, plus the
    /// mesh-derived estimates taken from the acetabulum sphere centres.
    ///
    /// The literature compilation is an explicit input; there is no
    /// process-wide default to configure.
    pub fn calc_hjc_predictions(
        &mut self,
        class: PopulationClass,
        source: LiteratureSource,
    ) -> Result<(), MeasurementError> {
        let acs = self.acs.ok_or(MeasurementError::MissingPrerequisite(
            "calc_measurements must run before HJC prediction",
        ))?;
        let dims = self.dims.ok_or(MeasurementError::MissingPrerequisite(
            "calc_measurements must run before HJC prediction",
        ))?;

        for model in RegressionModel::ALL {
            for side in [Side::Left, Side::Right] {
                let local = predict_hjc(&dims, side, model, class, source);
                let name = format!("{side}_hjc_{}", model.name());
                self.measurements
                    .insert(Measurement::point(name, acs.to_global(&local)));
            }
        }

        for (name, source_name) in [
            ("left_hjc_mesh", "left_acetabulum_diameter"),
            ("right_hjc_mesh", "right_acetabulum_diameter"),
        ] {
            let centre = self
                .measurements
                .get(source_name)
                .and_then(|m| m.centre)
                .ok_or(MeasurementError::MissingPrerequisite(
                    "calc_measurements must run before HJC prediction",
                ))?;
            self.measurements.insert(Measurement::point(name, centre));
        }

        debug!(
            "HJC predictions added for class '{class}': {} entries total",
            self.measurements.len()
        );
        Ok(())
    }

    fn landmark(&self, name: &str) -> Result<Point3<f64>, MeasurementError> {
        self.field.landmark(name).map_err(MeasurementError::from_field)
    }
}

// Exercised end-to-end against a synthetic pelvis model in tests/e2e.rs.
