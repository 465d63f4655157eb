//! Geometry fitting primitives shared by the measurement engines: least
//! squares sphere fits, principal axes, radial widths and axis angles.

use nalgebra::{DMatrix, DVector, Matrix3, Point3, Unit, Vector3};

const SVD_EPS: f64 = 1e-10;
const MIN_SPHERE_POINTS: usize = 6;
const MIN_AXIS_POINTS: usize = 3;

/// Failures of the fitting primitives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FitError {
    TooFewPoints { found: usize, minimum: usize },
    Degenerate(String),
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::TooFewPoints { found, minimum } => {
                write!(f, "too few points ({found} < {minimum})")
            }
            FitError::Degenerate(what) => write!(f, "degenerate geometry: {what}"),
        }
    }
}

impl std::error::Error for FitError {}

/// A fitted sphere.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub centre: Point3<f64>,
    pub radius: f64,
}

impl Sphere {
    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }
}

/// A line through `point` along `direction`.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub point: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

/// Algebraic least squares sphere fit.
///
/// Solves `|p|^2 = 2 c·p + (r^2 - |c|^2)` for the centre `c` and radius `r`
/// over all sample points via SVD.
pub fn fit_sphere(points: &[Point3<f64>]) -> Result<Sphere, FitError> {
    if points.len() < MIN_SPHERE_POINTS {
        return Err(FitError::TooFewPoints {
            found: points.len(),
            minimum: MIN_SPHERE_POINTS,
        });
    }

    let rows = points.len();
    let mut a = DMatrix::zeros(rows, 4);
    let mut b = DVector::zeros(rows);
    for (i, p) in points.iter().enumerate() {
        a[(i, 0)] = 2.0 * p.x;
        a[(i, 1)] = 2.0 * p.y;
        a[(i, 2)] = 2.0 * p.z;
        a[(i, 3)] = 1.0;
        b[i] = p.coords.norm_squared();
    }

    let svd = a.svd(true, true);
    let x = svd
        .solve(&b, SVD_EPS)
        .map_err(|e| FitError::Degenerate(format!("sphere fit failed: {e}")))?;

    let centre = Point3::new(x[0], x[1], x[2]);
    let radius_sq = x[3] + centre.coords.norm_squared();
    if radius_sq <= 0.0 {
        return Err(FitError::Degenerate(
            "sphere fit produced a non-positive radius".to_string(),
        ));
    }
    Ok(Sphere {
        centre,
        radius: radius_sq.sqrt(),
    })
}

/// Dominant axis of a point cloud: centroid plus the covariance
/// eigenvector with the largest eigenvalue.
pub fn principal_axis(points: &[Point3<f64>]) -> Result<Line, FitError> {
    if points.len() < MIN_AXIS_POINTS {
        return Err(FitError::TooFewPoints {
            found: points.len(),
            minimum: MIN_AXIS_POINTS,
        });
    }

    let centroid = centroid(points);
    let mut cov = Matrix3::zeros();
    for p in points {
        let d = p - centroid;
        cov += d * d.transpose();
    }
    cov /= points.len() as f64;

    let eigen = cov.symmetric_eigen();
    let mut largest = 0;
    for i in 1..3 {
        if eigen.eigenvalues[i] > eigen.eigenvalues[largest] {
            largest = i;
        }
    }
    if eigen.eigenvalues[largest] <= SVD_EPS {
        return Err(FitError::Degenerate(
            "point cloud has no spatial extent".to_string(),
        ));
    }

    let direction = Unit::new_normalize(eigen.eigenvectors.column(largest).into_owned());
    Ok(Line {
        point: centroid,
        direction,
    })
}

/// Centroid of a non-empty point set.
pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    let mut acc = Vector3::zeros();
    for p in points {
        acc += p.coords;
    }
    Point3::from(acc / points.len() as f64)
}

/// Mean distance of the points from the line, i.e. the mean radius of a
/// roughly cylindrical cloud about its axis.
pub fn mean_radial_distance(points: &[Point3<f64>], axis: &Line) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points
        .iter()
        .map(|p| {
            let d = p - axis.point;
            let along = d.dot(&axis.direction);
            (d - axis.direction.into_inner() * along).norm()
        })
        .sum();
    sum / points.len() as f64
}

/// Angle between two directions in degrees, in `[0, 90]` (directions are
/// treated as unsigned axes).
pub fn axis_angle_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let cos = (a.dot(b) / (a.norm() * b.norm())).abs().clamp(0.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle between two directed vectors in degrees, in `[0, 180]`.
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let cos = (a.dot(b) / (a.norm() * b.norm())).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle between two directions after projecting both onto the plane with
/// the given normal, in degrees.
pub fn projected_axis_angle_deg(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    normal: &Unit<Vector3<f64>>,
) -> f64 {
    let pa = a - normal.into_inner() * a.dot(normal);
    let pb = b - normal.into_inner() * b.dot(normal);
    axis_angle_deg(&pa, &pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere_samples(centre: Point3<f64>, radius: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for i in 0..8 {
            for j in 1..8 {
                let theta = i as f64 * std::f64::consts::FRAC_PI_4;
                let phi = j as f64 * std::f64::consts::PI / 8.0;
                points.push(Point3::new(
                    centre.x + radius * phi.sin() * theta.cos(),
                    centre.y + radius * phi.sin() * theta.sin(),
                    centre.z + radius * phi.cos(),
                ));
            }
        }
        points
    }

    #[test]
    fn sphere_fit_recovers_exact_sphere() {
        let centre = Point3::new(12.0, -4.0, 33.0);
        let sphere = fit_sphere(&sphere_samples(centre, 26.0)).unwrap();
        assert_relative_eq!(sphere.radius, 26.0, epsilon = 1e-8);
        assert_relative_eq!((sphere.centre - centre).norm(), 0.0, epsilon = 1e-8);
    }

    #[test]
    fn sphere_fit_rejects_small_input() {
        let points = vec![Point3::origin(); 3];
        assert!(matches!(
            fit_sphere(&points),
            Err(FitError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn principal_axis_of_a_rod() {
        let points: Vec<_> = (0..20)
            .map(|i| Point3::new(0.5 + i as f64, 2.0 + 0.01 * (i % 3) as f64, -1.0))
            .collect();
        let line = principal_axis(&points).unwrap();
        assert!(line.direction.x.abs() > 0.999);
    }

    #[test]
    fn radial_distance_of_a_cylinder() {
        let axis = Line {
            point: Point3::origin(),
            direction: Unit::new_normalize(Vector3::z()),
        };
        let points: Vec<_> = (0..16)
            .map(|i| {
                let t = i as f64 * std::f64::consts::FRAC_PI_8;
                Point3::new(3.0 * t.cos(), 3.0 * t.sin(), i as f64)
            })
            .collect();
        assert_relative_eq!(mean_radial_distance(&points, &axis), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn projected_angle_ignores_normal_components() {
        let normal = Unit::new_normalize(Vector3::z());
        let a = Vector3::new(1.0, 0.0, 5.0);
        let b = Vector3::new(0.0, 1.0, -2.0);
        assert_relative_eq!(
            projected_axis_angle_deg(&a, &b, &normal),
            90.0,
            epsilon = 1e-9
        );
    }
}
