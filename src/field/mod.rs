//! Geometric fields: parametric anatomical surfaces.
//!
//! A field combines three pieces:
//! - a basis description (`.ens` reference file, [`basis::BasisSpec`]),
//! - a mesh topology with named regions and landmarks (`.mesh` reference
//!   file, [`topology::FieldTopology`]),
//! - instance node coordinates (`.geof` model file).
//!
//! The reference pair is fixed per anatomical structure and side and ships
//! with the tools (see [`crate::refdata`]); the instance file carries the
//! subject-specific shape. [`io::load_geometric_field`] combines the three.
//!
//! Evaluation is plain basis interpolation: [`GeometricField::evaluate`]
//! maps an element's local `(xi, eta)` to model coordinates, and
//! [`evaluate::discretise_field`] samples the whole surface for rendering
//! and region point clouds.

pub mod basis;
pub mod evaluate;
pub mod io;
pub mod topology;

use basis::BasisSpec;
use nalgebra::Point3;
use topology::FieldTopology;

use crate::types::{AnatomicStructure, Side};

/// Lookup failures against a field's named regions and landmarks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    UnknownRegion(String),
    UnknownLandmark(String),
    EmptyRegion(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::UnknownRegion(name) => write!(f, "unknown region '{name}'"),
            FieldError::UnknownLandmark(name) => write!(f, "unknown landmark '{name}'"),
            FieldError::EmptyRegion(name) => write!(f, "region '{name}' has no elements"),
        }
    }
}

impl std::error::Error for FieldError {}

/// A loaded anatomical surface model. Immutable for the duration of a run.
#[derive(Clone, Debug)]
pub struct GeometricField {
    pub name: String,
    pub structure: AnatomicStructure,
    pub side: Option<Side>,
    pub nodes: Vec<Point3<f64>>,
    pub topology: FieldTopology,
    pub basis: BasisSpec,
}

impl GeometricField {
    /// Evaluates one element at local coordinates `(xi, eta)` in `[0, 1]^2`.
    pub fn evaluate(&self, element: usize, xi: f64, eta: f64) -> Point3<f64> {
        let weights = self.basis.weights(xi, eta);
        let element = &self.topology.elements[element];
        let mut acc = nalgebra::Vector3::zeros();
        for (&node, &w) in element.nodes.iter().zip(weights.iter()) {
            acc += self.nodes[node].coords * w;
        }
        Point3::from(acc)
    }

    /// Position of a named landmark node.
    pub fn landmark(&self, name: &str) -> Result<Point3<f64>, FieldError> {
        self.topology
            .landmarks
            .get(name)
            .map(|&node| self.nodes[node])
            .ok_or_else(|| FieldError::UnknownLandmark(name.to_string()))
    }

    /// Sample points over a named element region at the given per-element
    /// discretisation.
    pub fn region_points(
        &self,
        name: &str,
        divisions: [usize; 2],
    ) -> Result<Vec<Point3<f64>>, FieldError> {
        let elements = self
            .topology
            .regions
            .get(name)
            .ok_or_else(|| FieldError::UnknownRegion(name.to_string()))?;
        if elements.is_empty() {
            return Err(FieldError::EmptyRegion(name.to_string()));
        }
        let mut points = Vec::new();
        for &element in elements {
            evaluate::element_samples(self, element, divisions, &mut points);
        }
        Ok(points)
    }

    /// A copy of the field with every node mapped through `f`. Used to
    /// express a model in an anatomical coordinate system.
    pub fn map_nodes(&self, f: impl Fn(&Point3<f64>) -> Point3<f64>) -> GeometricField {
        GeometricField {
            name: self.name.clone(),
            structure: self.structure,
            side: self.side,
            nodes: self.nodes.iter().map(f).collect(),
            topology: self.topology.clone(),
            basis: self.basis.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::basis::BasisFamily;
    use crate::field::topology::Element;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    /// One linear quad element spanning the unit square in the XY plane.
    fn unit_quad_field() -> GeometricField {
        let mut regions = BTreeMap::new();
        regions.insert("all".to_string(), vec![0]);
        let mut landmarks = BTreeMap::new();
        landmarks.insert("corner".to_string(), 3);
        GeometricField {
            name: "quad".to_string(),
            structure: AnatomicStructure::Femur,
            side: Some(Side::Left),
            nodes: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            topology: FieldTopology {
                name: "quad".to_string(),
                structure: AnatomicStructure::Femur,
                side: Some(Side::Left),
                node_count: 4,
                elements: vec![Element {
                    nodes: vec![0, 1, 2, 3],
                }],
                regions,
                landmarks,
            },
            basis: BasisSpec {
                name: "linear".to_string(),
                family: BasisFamily::LagrangeTensor,
                degree: 1,
            },
        }
    }

    #[test]
    fn evaluate_interpolates_linearly() {
        let field = unit_quad_field();
        let p = field.evaluate(0, 0.5, 0.5);
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn landmark_lookup() {
        let field = unit_quad_field();
        assert_eq!(field.landmark("corner").unwrap(), Point3::new(1.0, 1.0, 0.0));
        assert_eq!(
            field.landmark("nope").unwrap_err(),
            FieldError::UnknownLandmark("nope".to_string())
        );
    }

    #[test]
    fn region_points_cover_the_element() {
        let field = unit_quad_field();
        let points = field.region_points("all", [2, 2]).unwrap();
        assert_eq!(points.len(), 9);
        assert_eq!(
            field.region_points("head", [2, 2]).unwrap_err(),
            FieldError::UnknownRegion("head".to_string())
        );
    }

    #[test]
    fn map_nodes_translates() {
        let field = unit_quad_field();
        let moved = field.map_nodes(|p| Point3::new(p.x + 10.0, p.y, p.z));
        assert_relative_eq!(moved.nodes[0].x, 10.0, epsilon = 1e-12);
        assert_eq!(moved.topology.elements.len(), 1);
    }
}
