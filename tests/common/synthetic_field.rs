//! Procedural synthetic bone models for the end-to-end tests.
//!
//! Geometry is deliberately coarse (disconnected linear quad patches): the
//! tests verify the orchestration contracts, not anatomical accuracy. The
//! builder writes the same `.geof`/`.ens`/`.mesh` JSON files the tools
//! consume.

use serde_json::json;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

pub const FEMUR_HEAD_RADIUS: f64 = 24.0;
pub const ACETABULUM_RADIUS: f64 = 27.0;
pub const INTER_ASIS: f64 = 240.0;

/// Paths of one written model: instance plus its reference pair.
pub struct ModelFiles {
    pub geof: PathBuf,
    pub ens: PathBuf,
    pub mesh: PathBuf,
}

pub struct ModelBuilder {
    structure: &'static str,
    side: Option<&'static str>,
    nodes: Vec<[f64; 3]>,
    elements: Vec<Vec<usize>>,
    regions: BTreeMap<String, Vec<usize>>,
    landmarks: BTreeMap<String, usize>,
}

impl ModelBuilder {
    pub fn new(structure: &'static str, side: Option<&'static str>) -> Self {
        Self {
            structure,
            side,
            nodes: Vec::new(),
            elements: Vec::new(),
            regions: BTreeMap::new(),
            landmarks: BTreeMap::new(),
        }
    }

    fn push_quad(&mut self, region: &str, corners: [[f64; 3]; 4]) {
        let base = self.nodes.len();
        self.nodes.extend_from_slice(&corners);
        self.elements
            .push(vec![base, base + 1, base + 2, base + 3]);
        self.regions
            .entry(region.to_string())
            .or_default()
            .push(self.elements.len() - 1);
    }

    /// A patch of quads on a sphere, corners exactly on the surface.
    pub fn sphere_patch(&mut self, region: &str, centre: [f64; 3], radius: f64) {
        let on_sphere = |theta: f64, phi: f64| {
            [
                centre[0] + radius * phi.sin() * theta.cos(),
                centre[1] + radius * phi.cos(),
                centre[2] + radius * phi.sin() * theta.sin(),
            ]
        };
        let (nu, nv) = (8, 4);
        for j in 0..nv {
            let phi0 = PI * (0.25 + 0.5 * j as f64 / nv as f64);
            let phi1 = PI * (0.25 + 0.5 * (j + 1) as f64 / nv as f64);
            for i in 0..nu {
                let theta0 = 2.0 * PI * i as f64 / nu as f64;
                let theta1 = 2.0 * PI * (i + 1) as f64 / nu as f64;
                self.push_quad(
                    region,
                    [
                        on_sphere(theta0, phi0),
                        on_sphere(theta1, phi0),
                        on_sphere(theta0, phi1),
                        on_sphere(theta1, phi1),
                    ],
                );
            }
        }
    }

    /// A tube of quads around the segment `p0 -> p1`.
    pub fn tube_patch(&mut self, region: &str, p0: [f64; 3], p1: [f64; 3], radius: f64) {
        let axis = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        let a = [axis[0] / len, axis[1] / len, axis[2] / len];
        // Any unit vector not parallel to the axis seeds the cross frame.
        let seed = if a[0].abs() < 0.9 {
            [1.0, 0.0, 0.0]
        } else {
            [0.0, 1.0, 0.0]
        };
        let u = normalise(cross(a, seed));
        let v = cross(a, u);

        let ring = |t: f64, ang: f64| {
            [
                p0[0] + axis[0] * t + radius * (u[0] * ang.cos() + v[0] * ang.sin()),
                p0[1] + axis[1] * t + radius * (u[1] * ang.cos() + v[1] * ang.sin()),
                p0[2] + axis[2] * t + radius * (u[2] * ang.cos() + v[2] * ang.sin()),
            ]
        };
        let (around, along) = (8, 6);
        for j in 0..along {
            let t0 = j as f64 / along as f64;
            let t1 = (j + 1) as f64 / along as f64;
            for i in 0..around {
                let ang0 = 2.0 * PI * i as f64 / around as f64;
                let ang1 = 2.0 * PI * (i + 1) as f64 / around as f64;
                self.push_quad(
                    region,
                    [
                        ring(t0, ang0),
                        ring(t0, ang1),
                        ring(t1, ang0),
                        ring(t1, ang1),
                    ],
                );
            }
        }
    }

    /// A named node that belongs to no element.
    pub fn landmark(&mut self, name: &str, position: [f64; 3]) {
        self.nodes.push(position);
        self.landmarks
            .insert(name.to_string(), self.nodes.len() - 1);
    }

    /// Writes the instance and reference files with a linear basis.
    pub fn write(&self, dir: &Path, stem: &str) -> ModelFiles {
        let files = ModelFiles {
            geof: dir.join(format!("{stem}.geof")),
            ens: dir.join(format!("{stem}.ens")),
            mesh: dir.join(format!("{stem}.mesh")),
        };

        let instance = json!({
            "name": stem,
            "structure": self.structure,
            "side": self.side,
            "nodes": self.nodes,
        });
        let basis = json!({
            "name": format!("{stem}_basis"),
            "family": "lagrange_tensor",
            "degree": 1,
        });
        let elements: Vec<_> = self
            .elements
            .iter()
            .map(|nodes| json!({ "nodes": nodes }))
            .collect();
        let mesh = json!({
            "name": format!("{stem}_topology"),
            "structure": self.structure,
            "side": self.side,
            "node_count": self.nodes.len(),
            "elements": elements,
            "regions": self.regions,
            "landmarks": self.landmarks,
        });

        fs::write(&files.geof, instance.to_string()).unwrap();
        fs::write(&files.ens, basis.to_string()).unwrap();
        fs::write(&files.mesh, mesh.to_string()).unwrap();
        files
    }
}

/// A left femur: spherical head, oblique neck, long shaft, epicondyle
/// landmarks. Shaft runs along +Y with the distal end at y = 0.
pub fn synthetic_femur(dir: &Path, side: &'static str) -> ModelFiles {
    let mut builder = ModelBuilder::new("femur", Some(full_side(side)));
    builder.sphere_patch("head", [45.0, 340.0, 0.0], FEMUR_HEAD_RADIUS);
    builder.tube_patch("neck", [0.0, 300.0, 0.0], [35.0, 330.0, 0.0], 16.0);
    builder.tube_patch("shaft", [0.0, 0.0, 0.0], [0.0, 300.0, 0.0], 14.0);
    builder.landmark("medial_epicondyle", [40.0, -5.0, 5.0]);
    builder.landmark("lateral_epicondyle", [-40.0, -5.0, -5.0]);
    builder.write(dir, &format!("femur_{side}"))
}

/// A combined bilateral pelvis with iliac spine and pubic landmarks and two
/// acetabular sphere patches. No `sacral_promontory` landmark, so the
/// corresponding measurement stays null-valued.
pub fn synthetic_pelvis(dir: &Path) -> ModelFiles {
    let half = INTER_ASIS / 2.0;
    let mut builder = ModelBuilder::new("pelvis", None);
    builder.sphere_patch("left_acetabulum", [-85.0, -60.0, 10.0], ACETABULUM_RADIUS);
    builder.sphere_patch("right_acetabulum", [85.0, -60.0, 10.0], ACETABULUM_RADIUS);
    builder.landmark("lasis", [-half, 10.0, 80.0]);
    builder.landmark("rasis", [half, 10.0, 80.0]);
    builder.landmark("lpsis", [-45.0, 25.0, -60.0]);
    builder.landmark("rpsis", [45.0, 25.0, -60.0]);
    builder.landmark("pubic_symphysis", [0.0, -60.0, 60.0]);
    builder.write(dir, "pelvis_combined")
}

fn full_side(side: &str) -> &'static str {
    match side {
        "left" | "l" => "left",
        _ => "right",
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalise(v: [f64; 3]) -> [f64; 3] {
    let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}
