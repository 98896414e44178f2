//! Assembly: stamping a circuit into an MNA system.

use crate::circuit::Circuit;
use crate::element::ElementKind;
use crate::error::{Error, Result};
use crate::mna::MnaSystem;

/// Stamps a circuit's elements into a freshly allocated [`MnaSystem`].
///
/// The assembler owns the system it stamps into, so a failed assembly is
/// simply dropped — the solver never sees a partially stamped matrix. It
/// also tracks which elements it has stamped; elements themselves are
/// immutable and carry no stamping state, and a repeated stamp of the same
/// element is rejected rather than silently ignored.
#[derive(Debug)]
pub struct Assembler<'a> {
    circuit: &'a Circuit,
    system: MnaSystem,
    stamped: Vec<bool>,
}

impl<'a> Assembler<'a> {
    /// Create an assembler with a zero-filled system sized for `circuit`
    /// (non-ground nodes + voltage sources).
    pub fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            system: MnaSystem::new(circuit.num_nodes(), circuit.num_vsources()),
            stamped: vec![false; circuit.num_elements()],
        }
    }

    /// Stamp the element at `index` into the system.
    ///
    /// Terminal labels resolve to matrix indices through the circuit's
    /// stable node order; ground resolves to `None`. Fails, leaving the
    /// system untouched, if the index is bad, the element was already
    /// stamped by this assembler, or the stamp contract itself rejects.
    pub fn stamp_element(&mut self, index: usize) -> Result<()> {
        let element = self
            .circuit
            .element(index)
            .ok_or(Error::BadElementIndex {
                index,
                len: self.circuit.num_elements(),
            })?;
        if self.stamped[index] {
            log::warn!("element {} is already stamped", element.name());
            return Err(Error::AlreadyStamped(element.name().to_owned()));
        }

        let pos = self.circuit.node_index(element.node_pos());
        let neg = self.circuit.node_index(element.node_neg());
        match element.kind() {
            ElementKind::Resistor => {
                self.system.stamp_conductance(pos, neg, element.value())?;
            }
            ElementKind::VoltageSource => {
                let slot = self
                    .circuit
                    .vsource_position(index)
                    .ok_or_else(|| Error::SourceListMismatch(element.name().to_owned()))?;
                self.system
                    .stamp_voltage_source(pos, neg, slot, element.value())?;
            }
            ElementKind::CurrentSource => {
                self.system
                    .stamp_current_source(pos, neg, element.value())?;
            }
        }
        self.stamped[index] = true;
        Ok(())
    }

    /// Stamp every element in insertion order. The first failure aborts
    /// the whole assembly.
    pub fn stamp_all(&mut self) -> Result<()> {
        for index in 0..self.circuit.num_elements() {
            self.stamp_element(index)?;
        }
        Ok(())
    }

    /// The system assembled so far.
    pub fn system(&self) -> &MnaSystem {
        &self.system
    }

    /// Consume the assembler, yielding the assembled system.
    pub fn finish(self) -> MnaSystem {
        self.system
    }
}

impl Circuit {
    /// Assemble the full MNA system for this circuit: allocate, stamp every
    /// element in insertion order, and hand back the system. All-or-nothing;
    /// a stamp failure discards the partial system.
    pub fn assemble(&self) -> Result<MnaSystem> {
        let mut assembler = Assembler::new(self);
        assembler.stamp_all()?;
        Ok(assembler.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn scenario_circuit() -> Circuit {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source("v1", "3", "0", 12.0))
            .unwrap();
        c.add_element(Element::resistor("r2", "3", "1", 100.0))
            .unwrap();
        c.add_element(Element::resistor("r3", "1", "0", 1000.0))
            .unwrap();
        c.add_element(Element::resistor("r4", "1", "0", 500.0))
            .unwrap();
        c
    }

    #[test]
    fn test_assemble_dimensions_and_entries() {
        let c = scenario_circuit();
        let sys = c.assemble().unwrap();

        // 2 non-ground nodes + 1 voltage source
        assert_eq!(sys.size(), 3);

        // Node order: "3" then "1"; branch row is 2.
        let a = sys.matrix();
        assert_eq!(a[(0, 2)], 1.0);
        assert_eq!(a[(2, 0)], 1.0);
        assert_eq!(sys.rhs()[2], 12.0);

        let g2 = 1.0 / 100.0;
        assert!((a[(0, 0)] - g2).abs() < 1e-15);
        assert!((a[(0, 1)] + g2).abs() < 1e-15);
        assert!((a[(1, 0)] + g2).abs() < 1e-15);
        // Node "1" diagonal: 1/100 + 1/1000 + 1/500
        assert!((a[(1, 1)] - (g2 + 1.0 / 1000.0 + 1.0 / 500.0)).abs() < 1e-15);
    }

    #[test]
    fn test_restamp_rejected_without_mutation() {
        let c = scenario_circuit();
        let mut assembler = Assembler::new(&c);
        assembler.stamp_element(1).unwrap();
        let before = assembler.system().clone();

        let err = assembler.stamp_element(1).unwrap_err();
        assert_eq!(err, Error::AlreadyStamped("r2".into()));
        assert_eq!(assembler.system(), &before);

        // The other elements still stamp fine afterwards.
        assembler.stamp_element(0).unwrap();
        assembler.stamp_element(2).unwrap();
        assembler.stamp_element(3).unwrap();
    }

    #[test]
    fn test_stamp_bad_index() {
        let c = scenario_circuit();
        let mut assembler = Assembler::new(&c);
        let err = assembler.stamp_element(9).unwrap_err();
        assert_eq!(err, Error::BadElementIndex { index: 9, len: 4 });
    }

    #[test]
    fn test_branch_slot_follows_vsource_order() {
        let mut c = Circuit::new();
        c.add_element(Element::voltage_source("v1", "1", "0", 5.0))
            .unwrap();
        c.add_element(Element::resistor("r1", "1", "2", 100.0))
            .unwrap();
        c.add_element(Element::voltage_source("v2", "2", "0", 3.0))
            .unwrap();

        let sys = c.assemble().unwrap();
        // 2 nodes + 2 sources; v1 owns row 2, v2 owns row 3.
        assert_eq!(sys.size(), 4);
        assert_eq!(sys.rhs()[2], 5.0);
        assert_eq!(sys.rhs()[3], 3.0);
        assert_eq!(sys.matrix()[(2, 0)], 1.0);
        assert_eq!(sys.matrix()[(3, 1)], 1.0);
    }

    #[test]
    fn test_stamp_all_marks_everything_stamped() {
        let c = scenario_circuit();
        let mut assembler = Assembler::new(&c);
        assembler.stamp_all().unwrap();
        let err = assembler.stamp_element(0).unwrap_err();
        assert_eq!(err, Error::AlreadyStamped("v1".into()));
    }
}
