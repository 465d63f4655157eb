//! Location of the bundled reference basis/topology pairs.
//!
//! Three pairs ship with the tools: `femur_left_quartic_flat`,
//! `femur_right_quartic_flat` and `pelvis_combined_cubic_flat`, each as an
//! `.ens` basis file plus a `.mesh` topology file. They are installed in a
//! `data/` directory next to the executables; `BONE_MEASURE_DATA` overrides
//! the location, and a checkout's own `data/` directory is the fallback
//! during development.

use crate::types::Side;
use std::env;
use std::path::PathBuf;

/// Override for the reference data directory.
pub const DATA_DIR_ENV: &str = "BONE_MEASURE_DATA";

/// An `.ens`/`.mesh` reference file pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferencePair {
    pub ens: PathBuf,
    pub mesh: PathBuf,
}

impl ReferencePair {
    fn bundled(stem: &str) -> Result<ReferencePair, String> {
        let dir = data_dir()?;
        Ok(ReferencePair {
            ens: dir.join(format!("{stem}.ens")),
            mesh: dir.join(format!("{stem}.mesh")),
        })
    }
}

/// Reference pair for a femur model of the given side.
pub fn femur_reference(side: Side) -> Result<ReferencePair, String> {
    match side {
        Side::Left => ReferencePair::bundled("femur_left_quartic_flat"),
        Side::Right => ReferencePair::bundled("femur_right_quartic_flat"),
    }
}

/// Reference pair for the combined bilateral pelvis model.
pub fn pelvis_reference() -> Result<ReferencePair, String> {
    ReferencePair::bundled("pelvis_combined_cubic_flat")
}

fn data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("data");
            if candidate.is_dir() {
                return Ok(candidate);
            }
        }
    }
    let dev = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    if dev.is_dir() {
        return Ok(dev);
    }
    Err(format!(
        "Reference data directory not found; install the data/ directory \
         next to the executable or set {DATA_DIR_ENV}"
    ))
}
