#![doc = include_str!("../README.md")]

pub mod config;
pub mod field;
pub mod measure;
pub mod refdata;
pub mod report;
pub mod types;
pub mod view;

// Main entry points: the loader and the two measurement engines.
pub use crate::field::io::load_geometric_field;
pub use crate::field::GeometricField;
pub use crate::measure::femur::FemurMeasurements;
pub use crate::measure::pelvis::PelvisMeasurements;
pub use crate::measure::MeasurementError;

// Shared value types.
pub use crate::report::NullValuePolicy;
pub use crate::types::{Measurement, MeasurementSet, MeasurementValue, PopulationClass, Side};
