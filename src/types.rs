//! Shared value types: anatomical selectors and the measurement set.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Anatomical side of a bilateral structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anatomical structure a model represents. Reference basis/topology pairs
/// are keyed by this together with [`Side`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnatomicStructure {
    Femur,
    Pelvis,
}

impl fmt::Display for AnatomicStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnatomicStructure::Femur => f.write_str("femur"),
            AnatomicStructure::Pelvis => f.write_str("pelvis"),
        }
    }
}

/// Population class selecting a regression-model variant for hip-joint-centre
/// prediction. Derived from the optional sex flag of the pelvis tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationClass {
    Adults,
    Men,
    Women,
}

impl PopulationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationClass::Adults => "adults",
            PopulationClass::Men => "men",
            PopulationClass::Women => "women",
        }
    }
}

impl fmt::Display for PopulationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by a measurement: a scalar (millimetres or degrees), a 3D
/// point, or a 3D vector, all in model coordinates unless stated otherwise.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Scalar(f64),
    Point(Point3<f64>),
    Vector(Vector3<f64>),
}

impl fmt::Display for MeasurementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementValue::Scalar(v) => write!(f, "{v}"),
            MeasurementValue::Point(p) => write!(f, "[{}, {}, {}]", p.x, p.y, p.z),
            MeasurementValue::Vector(v) => write!(f, "[{}, {}, {}]", v.x, v.y, v.z),
        }
    }
}

/// A single named measurement. `centre` carries the incidental centre point
/// of diameter-style measurements; derived measurements project it into a
/// value of their own (see the engines' derivation tables).
#[derive(Clone, Debug, Serialize)]
pub struct Measurement {
    pub name: String,
    pub value: Option<MeasurementValue>,
    pub centre: Option<Point3<f64>>,
}

impl Measurement {
    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(MeasurementValue::Scalar(value)),
            centre: None,
        }
    }

    /// A scalar measurement that also records the centre point it was
    /// computed about (e.g. a fitted sphere's centre for a diameter).
    pub fn scalar_with_centre(name: impl Into<String>, value: f64, centre: Point3<f64>) -> Self {
        Self {
            name: name.into(),
            value: Some(MeasurementValue::Scalar(value)),
            centre: Some(centre),
        }
    }

    pub fn point(name: impl Into<String>, point: Point3<f64>) -> Self {
        Self {
            name: name.into(),
            value: Some(MeasurementValue::Point(point)),
            centre: None,
        }
    }

    /// A measurement that is known by name but has no value for this model.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            centre: None,
        }
    }
}

/// Named measurements with deterministic lexicographic iteration order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MeasurementSet {
    items: BTreeMap<String, Measurement>,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a measurement under its own name, replacing any previous one.
    pub fn insert(&mut self, measurement: Measurement) {
        self.items.insert(measurement.name.clone(), measurement);
    }

    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Measurements in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.items.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_sorted_regardless_of_insertion_order() {
        let mut set = MeasurementSet::new();
        set.insert(Measurement::scalar("neck_width", 33.0));
        set.insert(Measurement::scalar("head_diameter", 46.0));
        set.insert(Measurement::scalar("anteversion_angle", 12.0));

        let names: Vec<_> = set.names().collect();
        assert_eq!(
            names,
            vec!["anteversion_angle", "head_diameter", "neck_width"]
        );
    }

    #[test]
    fn scalar_value_renders_without_padding() {
        let m = Measurement::scalar("head_diameter", 46.5);
        assert_eq!(m.value.unwrap().to_string(), "46.5");
    }

    #[test]
    fn point_value_renders_as_triplet() {
        let m = Measurement::point("head_centre", Point3::new(1.0, 2.5, -3.0));
        assert_eq!(m.value.unwrap().to_string(), "[1, 2.5, -3]");
    }
}
