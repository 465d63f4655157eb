//! Anatomical coordinate systems.
//!
//! Only the ISB pelvic convention is implemented: origin at the midpoint of
//! the anterior superior iliac spines, Z from the left to the right ASIS,
//! X anterior in the plane spanned by the two ASISs and the PSIS midpoint,
//! Y superior completing the right-handed frame.

use nalgebra::{Point3, Unit, Vector3};

use super::MeasurementError;

/// Convention used to construct an anatomical coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcsConvention {
    Isb,
}

/// An orthonormal anatomical frame embedded in model coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AnatomicalCoordinateSystem {
    pub origin: Point3<f64>,
    /// Anterior.
    pub x: Unit<Vector3<f64>>,
    /// Superior.
    pub y: Unit<Vector3<f64>>,
    /// Left-to-right.
    pub z: Unit<Vector3<f64>>,
}

impl AnatomicalCoordinateSystem {
    /// ISB pelvic frame from the four iliac spine landmarks.
    pub fn isb_pelvis(
        lasis: Point3<f64>,
        rasis: Point3<f64>,
        lpsis: Point3<f64>,
        rpsis: Point3<f64>,
    ) -> Result<Self, MeasurementError> {
        let origin = nalgebra::center(&lasis, &rasis);
        let mid_psis = nalgebra::center(&lpsis, &rpsis);

        let z = Unit::try_new(rasis - lasis, 1e-9).ok_or_else(|| {
            MeasurementError::DegenerateGeometry {
                context: "pelvis anatomical frame".to_string(),
                detail: "ASIS landmarks coincide".to_string(),
            }
        })?;

        let anterior = origin - mid_psis;
        let x = Unit::try_new(anterior - z.into_inner() * anterior.dot(&z), 1e-9).ok_or_else(
            || MeasurementError::DegenerateGeometry {
                context: "pelvis anatomical frame".to_string(),
                detail: "PSIS midpoint is collinear with the ASIS axis".to_string(),
            },
        )?;

        let y = Unit::new_normalize(z.cross(&x));
        Ok(Self { origin, x, y, z })
    }

    /// Expresses a model-frame point in this frame.
    pub fn to_local(&self, p: &Point3<f64>) -> Point3<f64> {
        let d = p - self.origin;
        Point3::new(d.dot(&self.x), d.dot(&self.y), d.dot(&self.z))
    }

    /// Maps a point of this frame back to model coordinates.
    pub fn to_global(&self, p: &Point3<f64>) -> Point3<f64> {
        self.origin + self.x.into_inner() * p.x + self.y.into_inner() * p.y
            + self.z.into_inner() * p.z
    }
}
