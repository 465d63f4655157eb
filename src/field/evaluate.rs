//! Surface discretisation of a geometric field.
//!
//! Each element is sampled on a regular `(d0 + 1) x (d1 + 1)` grid of local
//! coordinates and triangulated per grid cell. Elements do not share
//! vertices in the output; that is fine for rendering and point sampling.

use super::GeometricField;
use nalgebra::Point3;

/// Triangulated surface samples of a field.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[u32; 3]>,
}

/// Samples every element of `field` at `divisions` steps per local axis.
pub fn discretise_field(field: &GeometricField, divisions: [usize; 2]) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::default();
    let (d0, d1) = (divisions[0].max(1), divisions[1].max(1));
    for element in 0..field.topology.elements.len() {
        let base = mesh.vertices.len() as u32;
        element_samples(field, element, [d0, d1], &mut mesh.vertices);
        let stride = (d0 + 1) as u32;
        for row in 0..d1 as u32 {
            for col in 0..d0 as u32 {
                let v00 = base + row * stride + col;
                let v01 = v00 + 1;
                let v10 = v00 + stride;
                let v11 = v10 + 1;
                mesh.triangles.push([v00, v01, v11]);
                mesh.triangles.push([v00, v11, v10]);
            }
        }
    }
    mesh
}

/// Appends the sample grid of one element to `out`, row-major over `eta`.
pub(crate) fn element_samples(
    field: &GeometricField,
    element: usize,
    divisions: [usize; 2],
    out: &mut Vec<Point3<f64>>,
) {
    let (d0, d1) = (divisions[0].max(1), divisions[1].max(1));
    for row in 0..=d1 {
        let eta = row as f64 / d1 as f64;
        for col in 0..=d0 {
            let xi = col as f64 / d0 as f64;
            out.push(field.evaluate(element, xi, eta));
        }
    }
}
