//! Modified Nodal Analysis (MNA) matrix structures.

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};

/// MNA system: Ax = b
/// Where A is the conductance/coefficient matrix,
/// x is the solution vector (node voltages + branch currents),
/// and b is the RHS vector (current injections + voltage-source values).
///
/// The system is square by construction, so a non-square matrix or an
/// A/b length mismatch cannot be represented here. Stamp operations are
/// checked: they validate their inputs up front and leave the system
/// untouched on failure. A grounded terminal is `None`; it contributes
/// no row or column.
#[derive(Debug, Clone, PartialEq)]
pub struct MnaSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    /// Number of nodes (excluding ground).
    num_nodes: usize,
    /// Number of voltage-source branch-current unknowns.
    num_vsources: usize,
}

impl MnaSystem {
    /// Create a zero-filled MNA system with the given dimensions.
    pub fn new(num_nodes: usize, num_vsources: usize) -> Self {
        let size = num_nodes + num_vsources;
        Self {
            matrix: DMatrix::zeros(size, size),
            rhs: DVector::zeros(size),
            num_nodes,
            num_vsources,
        }
    }

    /// Total size of the system (nodes + branch currents).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_vsources
    }

    /// Number of nodes (excluding ground).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of voltage-source branch currents.
    pub fn num_vsources(&self) -> usize {
        self.num_vsources
    }

    /// Reset the matrix and RHS to zeros.
    pub fn clear(&mut self) {
        self.matrix.fill(0.0);
        self.rhs.fill(0.0);
    }

    fn check_node(&self, index: Option<usize>) -> Result<()> {
        match index {
            Some(i) if i >= self.size() => Err(Error::IndexOutOfRange {
                index: i,
                dim: self.size(),
            }),
            _ => Ok(()),
        }
    }

    /// Stamp a resistance between two nodes.
    ///
    /// For a conductance g = 1/resistance between nodes p and n:
    ///
    /// ```text
    ///      p      n
    ///  p   g     -g
    ///  n  -g      g
    /// ```
    ///
    /// A grounded terminal drops its entire row and column, leaving only
    /// the other terminal's diagonal entry.
    ///
    /// Fails, without mutating, when the resistance is NaN, the system
    /// dimension is below 2, or a non-grounded index is out of range.
    pub fn stamp_conductance(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        resistance: f64,
    ) -> Result<()> {
        if resistance.is_nan() {
            return Err(Error::NanValue);
        }
        if self.size() < 2 {
            return Err(Error::SystemTooSmall(self.size()));
        }
        self.check_node(node_pos)?;
        self.check_node(node_neg)?;

        let g = 1.0 / resistance;
        if let Some(p) = node_pos {
            self.matrix[(p, p)] += g;
        }
        if let Some(n) = node_neg {
            self.matrix[(n, n)] += g;
        }
        if let (Some(p), Some(n)) = (node_pos, node_neg) {
            self.matrix[(p, n)] -= g;
            self.matrix[(n, p)] -= g;
        }
        Ok(())
    }

    /// Stamp an independent voltage source between two nodes.
    ///
    /// The source's branch current is unknown k = num_nodes + vsource_idx:
    ///
    /// ```text
    ///      p      n      k     RHS
    ///  p   .      .      1      .
    ///  n   .      .     -1      .
    ///  k   1     -1      .      V
    /// ```
    ///
    /// A grounded terminal drops its coupling entries; the branch equation
    /// `b[k] = V` is always written, even with both terminals grounded.
    ///
    /// Fails, without mutating, when the voltage is NaN, the system
    /// dimension is below 2, or the branch row or a non-grounded index is
    /// out of range.
    pub fn stamp_voltage_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        vsource_idx: usize,
        voltage: f64,
    ) -> Result<()> {
        if voltage.is_nan() {
            return Err(Error::NanValue);
        }
        if self.size() < 2 {
            return Err(Error::SystemTooSmall(self.size()));
        }
        let k = self.num_nodes + vsource_idx;
        if vsource_idx >= self.num_vsources {
            return Err(Error::IndexOutOfRange {
                index: k,
                dim: self.size(),
            });
        }
        self.check_node(node_pos)?;
        self.check_node(node_neg)?;

        if let Some(p) = node_pos {
            self.matrix[(p, k)] += 1.0;
            self.matrix[(k, p)] += 1.0;
        }
        if let Some(n) = node_neg {
            self.matrix[(n, k)] -= 1.0;
            self.matrix[(k, n)] -= 1.0;
        }
        self.rhs[k] = voltage;
        Ok(())
    }

    /// Stamp an independent current source between two nodes.
    ///
    /// Only the RHS is touched: `b[p] -= I`, `b[n] += I`, with a grounded
    /// terminal skipped.
    ///
    /// Fails, without mutating, when the current is NaN, the system is
    /// empty, or a non-grounded index is out of range.
    pub fn stamp_current_source(
        &mut self,
        node_pos: Option<usize>,
        node_neg: Option<usize>,
        current: f64,
    ) -> Result<()> {
        if current.is_nan() {
            return Err(Error::NanValue);
        }
        if self.size() == 0 {
            return Err(Error::SystemTooSmall(0));
        }
        self.check_node(node_pos)?;
        self.check_node(node_neg)?;

        if let Some(p) = node_pos {
            self.rhs[p] -= current;
        }
        if let Some(n) = node_neg {
            self.rhs[n] += current;
        }
        Ok(())
    }

    /// Get a reference to the coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Get a reference to the RHS vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_system() {
        let sys = MnaSystem::new(3, 1);
        assert_eq!(sys.size(), 4);
        assert_eq!(sys.num_nodes(), 3);
        assert_eq!(sys.num_vsources(), 1);
        assert!(sys.matrix().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_stamp_conductance() {
        let mut sys = MnaSystem::new(2, 0);

        // 1 ohm resistor between nodes 0 and 1
        sys.stamp_conductance(Some(0), Some(1), 1.0).unwrap();

        assert_eq!(sys.matrix()[(0, 0)], 1.0);
        assert_eq!(sys.matrix()[(1, 1)], 1.0);
        assert_eq!(sys.matrix()[(0, 1)], -1.0);
        assert_eq!(sys.matrix()[(1, 0)], -1.0);
    }

    #[test]
    fn test_stamp_conductance_symmetry() {
        let mut sys = MnaSystem::new(3, 0);
        sys.stamp_conductance(Some(2), Some(0), 50.0).unwrap();

        let g = 1.0 / 50.0;
        assert_eq!(sys.matrix()[(2, 0)], sys.matrix()[(0, 2)]);
        assert_eq!(sys.matrix()[(2, 0)], -g);
        assert_eq!(sys.matrix()[(0, 0)], g);
        assert_eq!(sys.matrix()[(2, 2)], g);
    }

    #[test]
    fn test_stamp_conductance_to_ground_touches_one_entry() {
        let mut sys = MnaSystem::new(2, 0);

        sys.stamp_conductance(Some(0), None, 100.0).unwrap();

        assert_eq!(sys.matrix()[(0, 0)], 0.01);
        let touched: usize = sys
            .matrix()
            .iter()
            .map(|&v| usize::from(v != 0.0))
            .sum();
        assert_eq!(touched, 1);
        assert!(sys.rhs().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_stamp_conductance_failures_leave_system_untouched() {
        let mut sys = MnaSystem::new(2, 0);
        let before = sys.clone();

        assert_eq!(
            sys.stamp_conductance(Some(0), Some(1), f64::NAN),
            Err(Error::NanValue)
        );
        assert_eq!(
            sys.stamp_conductance(Some(0), Some(2), 100.0),
            Err(Error::IndexOutOfRange { index: 2, dim: 2 })
        );
        assert_eq!(sys, before);

        let mut tiny = MnaSystem::new(1, 0);
        assert_eq!(
            tiny.stamp_conductance(Some(0), None, 100.0),
            Err(Error::SystemTooSmall(1))
        );
    }

    #[test]
    fn test_unstamp_restores_exactly() {
        // Stamping -R negates every contribution of stamping R, so the
        // pre-stamp state comes back bit-exact.
        let mut sys = MnaSystem::new(3, 0);
        sys.stamp_conductance(Some(0), Some(1), 330.0).unwrap();
        let before = sys.clone();

        sys.stamp_conductance(Some(1), Some(2), 470.0).unwrap();
        sys.stamp_conductance(Some(1), Some(2), -470.0).unwrap();

        assert_eq!(sys, before);
    }

    #[test]
    fn test_stamp_voltage_source() {
        let mut sys = MnaSystem::new(2, 1);

        // 5V source between node 0 (+) and ground (-)
        sys.stamp_voltage_source(Some(0), None, 0, 5.0).unwrap();

        assert_eq!(sys.matrix()[(0, 2)], 1.0);
        assert_eq!(sys.matrix()[(2, 0)], 1.0);
        assert_eq!(sys.rhs()[2], 5.0);
    }

    #[test]
    fn test_stamp_voltage_source_both_grounded_writes_rhs_only() {
        let mut sys = MnaSystem::new(1, 1);

        sys.stamp_voltage_source(None, None, 0, 3.3).unwrap();

        assert!(sys.matrix().iter().all(|&v| v == 0.0));
        assert_eq!(sys.rhs()[1], 3.3);
    }

    #[test]
    fn test_stamp_voltage_source_bad_branch() {
        let mut sys = MnaSystem::new(2, 1);
        let before = sys.clone();

        assert_eq!(
            sys.stamp_voltage_source(Some(0), None, 1, 5.0),
            Err(Error::IndexOutOfRange { index: 3, dim: 3 })
        );
        assert_eq!(sys, before);
    }

    #[test]
    fn test_stamp_current_source() {
        let mut sys = MnaSystem::new(2, 0);

        // 1A from ground into node 0
        sys.stamp_current_source(None, Some(0), 1.0).unwrap();
        assert_eq!(sys.rhs()[0], 1.0);
        assert_eq!(sys.rhs()[1], 0.0);

        // Between two non-grounded nodes both entries move
        sys.stamp_current_source(Some(0), Some(1), 0.5).unwrap();
        assert_eq!(sys.rhs()[0], 0.5);
        assert_eq!(sys.rhs()[1], 0.5);
    }

    #[test]
    fn test_stamp_current_source_empty_system() {
        let mut sys = MnaSystem::new(0, 0);
        assert_eq!(
            sys.stamp_current_source(None, None, 1.0),
            Err(Error::SystemTooSmall(0))
        );
    }

    #[test]
    fn test_clear() {
        let mut sys = MnaSystem::new(2, 0);
        sys.stamp_conductance(Some(0), Some(1), 10.0).unwrap();
        sys.stamp_current_source(None, Some(0), 1.0).unwrap();

        sys.clear();
        assert!(sys.matrix().iter().all(|&v| v == 0.0));
        assert!(sys.rhs().iter().all(|&v| v == 0.0));
    }
}
