//! DC operating-point analysis.

use nalgebra::DVector;

use galvani_core::{Circuit, GROUND};

use crate::error::{Error, Result};
use crate::linear::solve_dense;

/// Result of a DC operating-point analysis.
///
/// Node voltages are paired with the circuit's node labels in the stable
/// order assembly used; branch currents carry one entry per voltage source
/// in sub-list order.
#[derive(Debug, Clone)]
pub struct DcSolution {
    node_labels: Vec<String>,
    node_voltages: DVector<f64>,
    branch_currents: DVector<f64>,
}

impl DcSolution {
    /// Get the voltage at a node by label. Ground is always 0 V; an
    /// unknown label yields `None`.
    pub fn voltage(&self, label: &str) -> Option<f64> {
        if label == GROUND {
            return Some(0.0);
        }
        self.node_labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.node_voltages[i])
    }

    /// Get the branch current through the `index`-th voltage source.
    pub fn current(&self, index: usize) -> Option<f64> {
        self.branch_currents.get(index).copied()
    }

    /// Node labels in solution order.
    pub fn node_labels(&self) -> &[String] {
        &self.node_labels
    }

    /// Node voltages in label order.
    pub fn node_voltages(&self) -> &DVector<f64> {
        &self.node_voltages
    }

    /// Branch currents in voltage-source order.
    pub fn branch_currents(&self) -> &DVector<f64> {
        &self.branch_currents
    }

    /// Number of solved node voltages.
    pub fn num_nodes(&self) -> usize {
        self.node_labels.len()
    }
}

/// Solve the DC operating point of a circuit.
///
/// The whole pipeline is all-or-nothing: validate the topology, assemble
/// the MNA system, solve it, and split the solution vector into node
/// voltages and trailing branch currents. Any failure at any step yields
/// an error and no partial result.
pub fn solve_dc(circuit: &Circuit) -> Result<DcSolution> {
    if !circuit.is_valid() {
        log::warn!(
            "invalid circuit: {} elements, {} nodes, {} sources",
            circuit.num_elements(),
            circuit.num_nodes(),
            circuit.num_vsources() + circuit.num_csources()
        );
        return Err(Error::InvalidCircuit(
            "need at least two elements, two non-ground nodes, and one source".into(),
        ));
    }

    let mna = circuit.assemble()?;
    log::debug!(
        "assembled {size}x{size} MNA system ({} nodes, {} voltage sources)",
        mna.num_nodes(),
        mna.num_vsources(),
        size = mna.size()
    );

    let solution = solve_dense(mna.matrix(), mna.rhs())?;

    let num_nodes = mna.num_nodes();
    let num_vsources = mna.num_vsources();
    let node_voltages =
        DVector::from_iterator(num_nodes, solution.iter().take(num_nodes).copied());
    let branch_currents =
        DVector::from_iterator(num_vsources, solution.iter().skip(num_nodes).copied());

    Ok(DcSolution {
        node_labels: circuit.node_labels().map(str::to_owned).collect(),
        node_voltages,
        branch_currents,
    })
}
