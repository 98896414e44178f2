//! Circuit element taxonomy.
//!
//! Elements are immutable two-terminal descriptions; they carry no stamping
//! state of their own. Which elements have been stamped into a given matrix
//! is tracked by the [`Assembler`](crate::assemble::Assembler).

use crate::units::parse_value;

/// The reserved ground node label. Ground is never assigned a matrix row.
pub const GROUND: &str = "0";

/// The closed set of supported element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Resistor,
    /// Independent voltage source.
    VoltageSource,
    /// Independent current source.
    CurrentSource,
}

impl ElementKind {
    /// Number of auxiliary branch-current unknowns this kind introduces.
    pub fn num_branch_vars(self) -> usize {
        match self {
            ElementKind::VoltageSource => 1,
            _ => 0,
        }
    }
}

/// A two-terminal circuit element connecting two named nodes.
///
/// Element identity is the name alone: the circuit aggregator treats two
/// elements with equal names as the same element regardless of their nodes
/// or value.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    node_pos: String,
    node_neg: String,
    value: f64,
    kind: ElementKind,
}

impl Element {
    fn new(
        kind: ElementKind,
        name: impl Into<String>,
        node_pos: impl Into<String>,
        node_neg: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node_pos: node_pos.into(),
            node_neg: node_neg.into(),
            value,
            kind,
        }
    }

    /// Create a resistor with a resistance in ohms.
    pub fn resistor(
        name: impl Into<String>,
        node_pos: impl Into<String>,
        node_neg: impl Into<String>,
        resistance: f64,
    ) -> Self {
        Self::new(ElementKind::Resistor, name, node_pos, node_neg, resistance)
    }

    /// Create an independent voltage source with a DC voltage in volts.
    pub fn voltage_source(
        name: impl Into<String>,
        node_pos: impl Into<String>,
        node_neg: impl Into<String>,
        voltage: f64,
    ) -> Self {
        Self::new(
            ElementKind::VoltageSource,
            name,
            node_pos,
            node_neg,
            voltage,
        )
    }

    /// Create an independent current source with a DC current in amperes.
    pub fn current_source(
        name: impl Into<String>,
        node_pos: impl Into<String>,
        node_neg: impl Into<String>,
        current: f64,
    ) -> Self {
        Self::new(
            ElementKind::CurrentSource,
            name,
            node_pos,
            node_neg,
            current,
        )
    }

    /// Create an element from a textual value with an optional SI suffix
    /// (see [`crate::units::parse_value`]).
    ///
    /// Construction never fails: an unparsable value yields a NaN sentinel,
    /// which [`Circuit::add_element`](crate::Circuit::add_element) rejects.
    pub fn with_text_value(
        kind: ElementKind,
        name: impl Into<String>,
        node_pos: impl Into<String>,
        node_neg: impl Into<String>,
        value: &str,
    ) -> Self {
        Self::new(
            kind,
            name,
            node_pos,
            node_neg,
            parse_value(value).unwrap_or(f64::NAN),
        )
    }

    /// Get the element's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the positive terminal's node label.
    pub fn node_pos(&self) -> &str {
        &self.node_pos
    }

    /// Get the negative terminal's node label.
    pub fn node_neg(&self) -> &str {
        &self.node_neg
    }

    /// Get the element's value (ohms, volts, or amperes depending on kind).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the element's kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}
