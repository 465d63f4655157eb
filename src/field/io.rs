//! Loading of geometric fields from disk.
//!
//! - `.geof` — instance file: structure, side, node coordinates.
//! - `.ens` — reference basis description ([`BasisSpec`]).
//! - `.mesh` — reference topology ([`FieldTopology`]).
//!
//! [`load_geometric_field`] combines the three and cross-checks that the
//! reference pair matches the instance's structure and side. All errors are
//! strings with file-path context; there is no recovery at this layer.

use super::basis::BasisSpec;
use super::topology::FieldTopology;
use super::GeometricField;
use crate::types::{AnatomicStructure, Side};
use log::debug;
use nalgebra::Point3;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Content of a `.geof` model instance file.
#[derive(Debug, Deserialize)]
struct InstanceFile {
    name: String,
    structure: AnatomicStructure,
    #[serde(default)]
    side: Option<Side>,
    nodes: Vec<[f64; 3]>,
}

/// Loads an instance file together with its reference basis/topology pair.
pub fn load_geometric_field(
    geof: &Path,
    ens: &Path,
    mesh: &Path,
) -> Result<GeometricField, String> {
    let instance: InstanceFile = read_json(geof)?;
    let basis: BasisSpec = read_json(ens)?;
    let topology: FieldTopology = read_json(mesh)?;

    if topology.structure != instance.structure {
        return Err(format!(
            "Reference mesh {} describes a {} but instance {} is a {}",
            mesh.display(),
            topology.structure,
            geof.display(),
            instance.structure
        ));
    }
    if topology.side != instance.side {
        return Err(format!(
            "Reference mesh {} is {} but instance {} is {}",
            mesh.display(),
            side_label(&topology.side),
            geof.display(),
            side_label(&instance.side)
        ));
    }
    if topology.node_count != instance.nodes.len() {
        return Err(format!(
            "Reference mesh {} expects {} nodes but instance {} provides {}",
            mesh.display(),
            topology.node_count,
            geof.display(),
            instance.nodes.len()
        ));
    }
    topology.validate(&basis)?;

    debug!(
        "loaded {} ({}, {}): {} nodes, {} elements, {} regions, {} landmarks",
        instance.name,
        instance.structure,
        side_label(&instance.side),
        instance.nodes.len(),
        topology.elements.len(),
        topology.regions.len(),
        topology.landmarks.len()
    );

    Ok(GeometricField {
        name: instance.name,
        structure: instance.structure,
        side: instance.side,
        nodes: instance
            .nodes
            .into_iter()
            .map(|[x, y, z]| Point3::new(x, y, z))
            .collect(),
        topology,
        basis,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

fn side_label(side: &Option<Side>) -> &'static str {
    match side {
        Some(side) => side.as_str(),
        None => "unsided",
    }
}
