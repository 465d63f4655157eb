//! Basis function descriptions for geometric-field elements.
//!
//! A reference model fixes one basis for all of its elements: tensor-product
//! Lagrange polynomials of a given degree on quadrilateral elements with
//! equispaced nodes. The femur references are quartic, the pelvis reference
//! cubic; nothing here depends on a particular degree.

use serde::{Deserialize, Serialize};

/// Supported basis families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisFamily {
    LagrangeTensor,
}

/// Ensemble basis description, the content of an `.ens` reference file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BasisSpec {
    pub name: String,
    pub family: BasisFamily,
    pub degree: usize,
}

impl BasisSpec {
    /// Nodes each element must carry: `(degree + 1)^2` for a tensor basis.
    pub fn nodes_per_element(&self) -> usize {
        (self.degree + 1) * (self.degree + 1)
    }

    /// Evaluates all element basis functions at local coordinates
    /// `(xi, eta)` in `[0, 1]^2`.
    ///
    /// Weights are ordered to match the element node ordering: node
    /// `row * (degree + 1) + col`, where `col` runs along `xi` and `row`
    /// along `eta`.
    pub fn weights(&self, xi: f64, eta: f64) -> Vec<f64> {
        let wx = lagrange_weights_1d(self.degree, xi);
        let we = lagrange_weights_1d(self.degree, eta);
        let n = self.degree + 1;
        let mut out = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                out.push(we[row] * wx[col]);
            }
        }
        out
    }
}

/// 1D Lagrange weights at equispaced nodes `i / degree` on `[0, 1]`.
fn lagrange_weights_1d(degree: usize, t: f64) -> Vec<f64> {
    let n = degree + 1;
    if n == 1 {
        return vec![1.0];
    }
    let nodes: Vec<f64> = (0..n).map(|i| i as f64 / degree as f64).collect();
    let mut weights = Vec::with_capacity(n);
    for i in 0..n {
        let mut w = 1.0;
        for j in 0..n {
            if j != i {
                w *= (t - nodes[j]) / (nodes[i] - nodes[j]);
            }
        }
        weights.push(w);
    }
    weights
}
