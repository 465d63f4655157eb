//! Hip-joint-centre regression models.
//!
//! Each model predicts the HJC from overall pelvic dimensions measured in
//! the ISB pelvic frame (width between the ASISs, depth from the ASIS to
//! the PSIS midpoints, height from the ASIS midpoint to the pubic
//! symphysis). Predictions are per side; the frames are symmetric so the
//! left prediction mirrors the right across the sagittal plane.
//!
//! Coefficients come from a named literature compilation, selected
//! explicitly per call. Population-class variants exist where the
//! literature reports them (the Bell model); the remaining models are
//! class-independent.

use crate::types::{PopulationClass, Side};
use nalgebra::Point3;

/// Named regression models. `Mesh` estimates are not produced here; the
/// pelvis engine derives them from the acetabulum sphere fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegressionModel {
    Bell,
    Tylkowski,
    Andriacchi,
    Seidel,
    Harrington,
}

impl RegressionModel {
    pub const ALL: [RegressionModel; 5] = [
        RegressionModel::Bell,
        RegressionModel::Tylkowski,
        RegressionModel::Andriacchi,
        RegressionModel::Seidel,
        RegressionModel::Harrington,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RegressionModel::Bell => "bell",
            RegressionModel::Tylkowski => "tylkowski",
            RegressionModel::Andriacchi => "andriacchi",
            RegressionModel::Seidel => "seidel",
            RegressionModel::Harrington => "harrington",
        }
    }
}

/// Literature compilation supplying the regression coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteratureSource {
    /// Bell et al.'s comparative study, the compilation the tools use.
    Bell,
    /// Leardini et al.'s later re-evaluation of the same models.
    Leardini,
}

/// Pelvic dimensions feeding the regressions, millimetres, ISB frame.
#[derive(Clone, Copy, Debug)]
pub struct PelvicDims {
    /// Inter-ASIS distance.
    pub width: f64,
    /// ASIS midpoint to PSIS midpoint.
    pub depth: f64,
    /// ASIS midpoint to pubic symphysis.
    pub height: f64,
}

/// One predicted coordinate: linear in the pelvic dimensions plus a fixed
/// millimetre offset.
#[derive(Clone, Copy, Debug)]
struct AxisTerm {
    width: f64,
    depth: f64,
    height: f64,
    offset_mm: f64,
}

impl AxisTerm {
    const fn w(c: f64) -> Self {
        Self { width: c, depth: 0.0, height: 0.0, offset_mm: 0.0 }
    }

    const fn d(c: f64) -> Self {
        Self { width: 0.0, depth: c, height: 0.0, offset_mm: 0.0 }
    }

    const fn h(c: f64) -> Self {
        Self { width: 0.0, depth: 0.0, height: c, offset_mm: 0.0 }
    }

    const fn w_off(c: f64, offset_mm: f64) -> Self {
        Self { width: c, depth: 0.0, height: 0.0, offset_mm }
    }

    const fn d_off(c: f64, offset_mm: f64) -> Self {
        Self { width: 0.0, depth: c, height: 0.0, offset_mm }
    }

    fn eval(&self, dims: &PelvicDims) -> f64 {
        self.width * dims.width + self.depth * dims.depth + self.height * dims.height
            + self.offset_mm
    }
}

/// Right-side coefficients in the ISB frame (X anterior, Y superior,
/// Z left-to-right); the left side mirrors Z.
#[derive(Clone, Copy, Debug)]
struct ModelCoefficients {
    x: AxisTerm,
    y: AxisTerm,
    z: AxisTerm,
}

fn coefficients(
    model: RegressionModel,
    class: PopulationClass,
    source: LiteratureSource,
) -> ModelCoefficients {
    use AxisTerm as T;
    match (source, model) {
        (LiteratureSource::Bell, RegressionModel::Bell) => match class {
            PopulationClass::Adults => ModelCoefficients {
                x: T::w(-0.19),
                y: T::w(-0.30),
                z: T::w(0.36),
            },
            PopulationClass::Men => ModelCoefficients {
                x: T::w(-0.20),
                y: T::w(-0.30),
                z: T::w(0.37),
            },
            PopulationClass::Women => ModelCoefficients {
                x: T::w(-0.19),
                y: T::w(-0.29),
                z: T::w(0.36),
            },
        },
        (LiteratureSource::Leardini, RegressionModel::Bell) => match class {
            PopulationClass::Adults => ModelCoefficients {
                x: T::w(-0.20),
                y: T::w(-0.31),
                z: T::w(0.36),
            },
            PopulationClass::Men => ModelCoefficients {
                x: T::w(-0.21),
                y: T::w(-0.31),
                z: T::w(0.37),
            },
            PopulationClass::Women => ModelCoefficients {
                x: T::w(-0.20),
                y: T::w(-0.30),
                z: T::w(0.36),
            },
        },
        (_, RegressionModel::Tylkowski) => ModelCoefficients {
            x: T::w(-0.11),
            y: T::w(-0.12),
            z: T::w(0.36),
        },
        (_, RegressionModel::Andriacchi) => ModelCoefficients {
            x: T::w(-0.09),
            y: T::h(-0.49),
            z: T::w(0.32),
        },
        (_, RegressionModel::Seidel) => ModelCoefficients {
            x: T::d(-0.34),
            y: T::h(-0.79),
            z: T::w(0.36),
        },
        (LiteratureSource::Bell, RegressionModel::Harrington) => ModelCoefficients {
            x: T::d_off(-0.24, -9.9),
            y: T::w_off(-0.30, -10.9),
            z: T::w_off(0.33, 7.3),
        },
        (LiteratureSource::Leardini, RegressionModel::Harrington) => ModelCoefficients {
            x: T::d_off(-0.24, -9.3),
            y: T::w_off(-0.30, -10.4),
            z: T::w_off(0.33, 7.1),
        },
    }
}

/// Predicts one hip-joint centre in the ISB pelvic frame.
pub fn predict_hjc(
    dims: &PelvicDims,
    side: Side,
    model: RegressionModel,
    class: PopulationClass,
    source: LiteratureSource,
) -> Point3<f64> {
    let coeffs = coefficients(model, class, source);
    let z = coeffs.z.eval(dims);
    Point3::new(
        coeffs.x.eval(dims),
        coeffs.y.eval(dims),
        match side {
            Side::Right => z,
            Side::Left => -z,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims() -> PelvicDims {
        PelvicDims {
            width: 240.0,
            depth: 150.0,
            height: 90.0,
        }
    }

    #[test]
    fn predictions_mirror_across_sides() {
        for model in RegressionModel::ALL {
            let left = predict_hjc(
                &dims(),
                Side::Left,
                model,
                PopulationClass::Adults,
                LiteratureSource::Bell,
            );
            let right = predict_hjc(
                &dims(),
                Side::Right,
                model,
                PopulationClass::Adults,
                LiteratureSource::Bell,
            );
            assert_relative_eq!(left.x, right.x);
            assert_relative_eq!(left.y, right.y);
            assert_relative_eq!(left.z, -right.z);
        }
    }

    #[test]
    fn bell_model_varies_with_population_class() {
        let adults = predict_hjc(
            &dims(),
            Side::Right,
            RegressionModel::Bell,
            PopulationClass::Adults,
            LiteratureSource::Bell,
        );
        let men = predict_hjc(
            &dims(),
            Side::Right,
            RegressionModel::Bell,
            PopulationClass::Men,
            LiteratureSource::Bell,
        );
        assert!((adults.x - men.x).abs() > 1.0);
    }

    #[test]
    fn literature_source_is_an_explicit_input() {
        let bell = predict_hjc(
            &dims(),
            Side::Right,
            RegressionModel::Bell,
            PopulationClass::Adults,
            LiteratureSource::Bell,
        );
        let leardini = predict_hjc(
            &dims(),
            Side::Right,
            RegressionModel::Bell,
            PopulationClass::Adults,
            LiteratureSource::Leardini,
        );
        assert!((bell.x - leardini.x).abs() > 1.0);
    }

    #[test]
    fn harrington_applies_millimetre_offsets() {
        let zero = PelvicDims {
            width: 0.0,
            depth: 0.0,
            height: 0.0,
        };
        let p = predict_hjc(
            &zero,
            Side::Right,
            RegressionModel::Harrington,
            PopulationClass::Adults,
            LiteratureSource::Bell,
        );
        assert_relative_eq!(p.x, -9.9);
        assert_relative_eq!(p.y, -10.9);
        assert_relative_eq!(p.z, 7.3);
    }

    #[test]
    fn bell_adult_prediction_scales_with_width() {
        let p = predict_hjc(
            &dims(),
            Side::Right,
            RegressionModel::Bell,
            PopulationClass::Adults,
            LiteratureSource::Bell,
        );
        assert_relative_eq!(p.x, -0.19 * 240.0);
        assert_relative_eq!(p.y, -0.30 * 240.0);
        assert_relative_eq!(p.z, 0.36 * 240.0);
    }
}
