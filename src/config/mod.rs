//! Tool configuration: CLI parsing for the two measurement drivers.
//!
//! Selector validation happens here, before any filesystem access, so an
//! invalid side or sex fails fast with a message naming the bad value.

pub mod femur;
pub mod pelvis;

use crate::types::{PopulationClass, Side};

pub(crate) fn parse_side(raw: &str) -> Result<Side, String> {
    match raw {
        "l" => Ok(Side::Left),
        "r" => Ok(Side::Right),
        other => Err(format!("Invalid side '{other}', expected 'l' or 'r'")),
    }
}

pub(crate) fn parse_sex(raw: &str) -> Result<PopulationClass, String> {
    match raw {
        "m" => Ok(PopulationClass::Men),
        "f" => Ok(PopulationClass::Women),
        other => Err(format!("Invalid sex '{other}', expected 'm' or 'f'")),
    }
}
