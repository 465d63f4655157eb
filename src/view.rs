//! Interactive 3D viewing of models and derived landmark points.
//!
//! Builds a kiss3d scene with the discretised field surface(s) and labelled
//! sphere markers, then runs a blocking render loop until the window is
//! closed. A 2D legend names each marker set in its colour.

use kiss3d::camera::ArcBall;
use kiss3d::light::Light;
use kiss3d::resource::Mesh;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, Vector3};
use std::cell::RefCell;
use std::rc::Rc;

use crate::field::evaluate::{discretise_field, SurfaceMesh};
use crate::measure::femur::FemurMeasurements;
use crate::measure::pelvis::PelvisMeasurements;
use crate::types::MeasurementValue;

/// Surface discretisation used for rendering.
const VIEW_DISC: [usize; 2] = [6, 6];
const MARKER_RADIUS: f32 = 3.0;
const BONE_COLOR: (f32, f32, f32) = (0.85, 0.82, 0.72);
const ALIGNED_COLOR: (f32, f32, f32) = (0.55, 0.65, 0.85);

/// Marker colours per HJC source, in [`HJC_SOURCES`] order.
const HJC_COLORS: [(f32, f32, f32); 6] = [
    (0.90, 0.20, 0.20),
    (0.20, 0.70, 0.20),
    (0.20, 0.35, 0.90),
    (0.85, 0.70, 0.15),
    (0.70, 0.25, 0.75),
    (0.15, 0.75, 0.75),
];
const HJC_SOURCES: [&str; 6] = [
    "bell",
    "tylkowski",
    "andriacchi",
    "seidel",
    "harrington",
    "mesh",
];

struct LegendEntry {
    label: String,
    color: (f32, f32, f32),
}

/// A window with surfaces and labelled markers; [`ViewerScene::run`] blocks.
pub struct ViewerScene {
    window: Window,
    nodes: Vec<SceneNode>,
    legend: Vec<LegendEntry>,
    focus: Point3<f32>,
    extent: f32,
}

impl ViewerScene {
    pub fn new(title: &str) -> Self {
        let mut window = Window::new(title);
        window.set_light(Light::StickToCamera);
        Self {
            window,
            nodes: Vec::new(),
            legend: Vec::new(),
            focus: Point3::origin(),
            extent: 100.0,
        }
    }

    /// Adds a triangulated surface. Surfaces also set the camera focus.
    pub fn add_surface(
        &mut self,
        surface: &SurfaceMesh,
        color: (f32, f32, f32),
    ) -> Result<(), String> {
        if surface.vertices.len() > u16::MAX as usize {
            return Err(format!(
                "Surface too dense to render ({} vertices)",
                surface.vertices.len()
            ));
        }
        let coords: Vec<Point3<f32>> = surface.vertices.iter().map(to_render_point).collect();
        let faces: Vec<Point3<u16>> = surface
            .triangles
            .iter()
            .map(|t| Point3::new(t[0] as u16, t[1] as u16, t[2] as u16))
            .collect();

        self.update_focus(&coords);

        let mesh = Mesh::new(coords, faces, None, None, false);
        let mut node = self
            .window
            .add_mesh(Rc::new(RefCell::new(mesh)), Vector3::new(1.0, 1.0, 1.0));
        node.set_color(color.0, color.1, color.2);
        node.enable_backface_culling(false);
        self.nodes.push(node);
        Ok(())
    }

    /// Adds one sphere per point and a legend entry for the set.
    pub fn add_markers(&mut self, label: &str, points: &[Point3<f64>], color: (f32, f32, f32)) {
        for point in points {
            let mut node = self.window.add_sphere(MARKER_RADIUS);
            node.set_color(color.0, color.1, color.2);
            let p = to_render_point(point);
            node.set_local_translation(Translation3::new(p.x, p.y, p.z));
            self.nodes.push(node);
        }
        self.legend.push(LegendEntry {
            label: label.to_string(),
            color,
        });
    }

    /// Blocking interactive session; returns when the window is closed.
    pub fn run(mut self) {
        let eye = Point3::new(
            self.focus.x,
            self.focus.y,
            self.focus.z + 2.5 * self.extent,
        );
        let mut camera = ArcBall::new(eye, self.focus);
        let font = Font::default();

        while self.window.render_with_camera(&mut camera) {
            for (i, entry) in self.legend.iter().enumerate() {
                self.window.draw_text(
                    &entry.label,
                    &Point2::new(10.0, 10.0 + 30.0 * i as f32),
                    40.0,
                    &font,
                    &Point3::new(entry.color.0, entry.color.1, entry.color.2),
                );
            }
        }
    }

    fn update_focus(&mut self, coords: &[Point3<f32>]) {
        if coords.is_empty() {
            return;
        }
        let mut acc = Vector3::zeros();
        for p in coords {
            acc += p.coords;
        }
        self.focus = Point3::from(acc / coords.len() as f32);
        self.extent = coords
            .iter()
            .map(|p| (p - self.focus).norm())
            .fold(1.0_f32, f32::max);
    }
}

/// Femur scene: the model surface and the derived head centre.
pub fn view_femur(engine: &FemurMeasurements) -> Result<(), String> {
    let mut scene = ViewerScene::new("bone-measure: femur");
    scene.add_surface(&discretise_field(engine.field(), VIEW_DISC), BONE_COLOR)?;
    if let Some(point) = measurement_point(engine.measurements.get("head_centre")) {
        scene.add_markers("head_centre", &[point], HJC_COLORS[0]);
    }
    scene.run();
    Ok(())
}

/// Pelvis scene: the model, its ACS-aligned copy and the labelled HJC
/// estimates of every source model.
pub fn view_pelvis(engine: &PelvisMeasurements) -> Result<(), String> {
    let mut scene = ViewerScene::new("bone-measure: pelvis");
    if let Some(aligned) = engine.aligned_field() {
        scene.add_surface(&discretise_field(&aligned, VIEW_DISC), ALIGNED_COLOR)?;
    }
    scene.add_surface(&discretise_field(engine.field(), VIEW_DISC), BONE_COLOR)?;

    for (source, &color) in HJC_SOURCES.iter().zip(HJC_COLORS.iter()) {
        let mut points = Vec::new();
        for side in ["left", "right"] {
            let name = format!("{side}_hjc_{source}");
            if let Some(point) = measurement_point(engine.measurements.get(&name)) {
                points.push(point);
            }
        }
        if !points.is_empty() {
            scene.add_markers(&format!("hjc_{source}"), &points, color);
        }
    }
    scene.run();
    Ok(())
}

fn measurement_point(
    measurement: Option<&crate::types::Measurement>,
) -> Option<Point3<f64>> {
    match measurement?.value.as_ref()? {
        MeasurementValue::Point(p) => Some(*p),
        _ => None,
    }
}

fn to_render_point(p: &Point3<f64>) -> Point3<f32> {
    Point3::new(p.x as f32, p.y as f32, p.z as f32)
}
