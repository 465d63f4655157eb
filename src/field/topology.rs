//! Reference mesh topology: element connectivity plus the named regions and
//! landmarks the measurement engines rely on.

use super::basis::BasisSpec;
use crate::types::{AnatomicStructure, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single element: ordered node indices into the instance node table.
///
/// Ordering is row-major in local coordinates, `row * (degree + 1) + col`
/// with `col` along `xi` and `row` along `eta`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub nodes: Vec<usize>,
}

/// Topology of a reference model, the content of a `.mesh` reference file.
///
/// `regions` name groups of elements ("head", "left_acetabulum", ...);
/// `landmarks` name single nodes ("lasis", "medial_epicondyle", ...).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldTopology {
    pub name: String,
    pub structure: AnatomicStructure,
    #[serde(default)]
    pub side: Option<Side>,
    pub node_count: usize,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub regions: BTreeMap<String, Vec<usize>>,
    #[serde(default)]
    pub landmarks: BTreeMap<String, usize>,
}

impl FieldTopology {
    /// Structural validation against the basis the topology is paired with:
    /// per-element node counts, node index ranges, region element indices
    /// and landmark node indices.
    pub fn validate(&self, basis: &BasisSpec) -> Result<(), String> {
        let expected = basis.nodes_per_element();
        for (i, element) in self.elements.iter().enumerate() {
            if element.nodes.len() != expected {
                return Err(format!(
                    "Element {i} of {} has {} nodes but basis {} expects {expected}",
                    self.name,
                    element.nodes.len(),
                    basis.name
                ));
            }
            if let Some(&bad) = element.nodes.iter().find(|&&n| n >= self.node_count) {
                return Err(format!(
                    "Element {i} of {} references node {bad}, out of range for {} nodes",
                    self.name, self.node_count
                ));
            }
        }
        for (region, elements) in &self.regions {
            if let Some(&bad) = elements.iter().find(|&&e| e >= self.elements.len()) {
                return Err(format!(
                    "Region '{region}' of {} references element {bad}, out of range for {} elements",
                    self.name,
                    self.elements.len()
                ));
            }
        }
        for (landmark, &node) in &self.landmarks {
            if node >= self.node_count {
                return Err(format!(
                    "Landmark '{landmark}' of {} references node {node}, out of range for {} nodes",
                    self.name, self.node_count
                ));
            }
        }
        Ok(())
    }
}
