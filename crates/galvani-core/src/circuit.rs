//! Circuit aggregator: the authoritative element list plus derived views.

use indexmap::IndexMap;

use crate::element::{Element, ElementKind, GROUND};
use crate::error::{Error, Result};

/// A circuit: an insertion-ordered list of uniquely named elements.
///
/// Everything else the circuit knows is derived from that list and kept in
/// lock-step as elements are added and removed:
///
/// - the voltage-source sub-list (an insertion-order subsequence; a source's
///   position in it determines its branch-current index),
/// - the current-source sub-list,
/// - a reference-counted table of non-ground node labels, in first-insertion
///   order. That order is the stable node order matrix indices are computed
///   from on every assembly; a node leaves the table exactly when its last
///   referencing element is removed.
#[derive(Debug, Default)]
pub struct Circuit {
    elements: Vec<Element>,
    /// Indices into `elements`, in insertion order.
    vsources: Vec<usize>,
    csources: Vec<usize>,
    /// Non-ground node label -> number of element terminals touching it.
    nodes: IndexMap<String, usize>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element to the circuit.
    ///
    /// Rejects, without mutating, an element whose value is not finite
    /// (e.g. the NaN sentinel from a failed value parse) or whose name is
    /// already taken.
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        if !element.value().is_finite() {
            log::warn!(
                "rejecting element {} with non-finite value {}",
                element.name(),
                element.value()
            );
            return Err(Error::NonFiniteValue {
                name: element.name().to_owned(),
                value: element.value(),
            });
        }
        if self.elements.iter().any(|e| e.name() == element.name()) {
            log::warn!("rejecting duplicate element name {}", element.name());
            return Err(Error::DuplicateName(element.name().to_owned()));
        }

        let index = self.elements.len();
        match element.kind() {
            ElementKind::VoltageSource => self.vsources.push(index),
            ElementKind::CurrentSource => self.csources.push(index),
            ElementKind::Resistor => {}
        }
        for label in [element.node_pos(), element.node_neg()] {
            if label != GROUND {
                *self.nodes.entry(label.to_owned()).or_insert(0) += 1;
            }
        }
        self.elements.push(element);
        Ok(())
    }

    /// Remove the element at `index`, returning it.
    ///
    /// Node reference counts are decremented for both terminals; a node
    /// whose count reaches zero leaves the node table (later nodes keep
    /// their relative order).
    pub fn remove_element(&mut self, index: usize) -> Result<Element> {
        if index >= self.elements.len() {
            log::debug!(
                "remove_element index {index} out of range ({} elements)",
                self.elements.len()
            );
            return Err(Error::BadElementIndex {
                index,
                len: self.elements.len(),
            });
        }

        let element = self.elements.remove(index);
        for list in [&mut self.vsources, &mut self.csources] {
            list.retain(|&i| i != index);
            for i in list.iter_mut() {
                if *i > index {
                    *i -= 1;
                }
            }
        }
        for label in [element.node_pos(), element.node_neg()] {
            if label == GROUND {
                continue;
            }
            if let Some(count) = self.nodes.get_mut(label) {
                *count -= 1;
                if *count == 0 {
                    self.nodes.shift_remove(label);
                }
            }
        }
        Ok(element)
    }

    /// Whether the circuit is solvable at all: at least two elements, at
    /// least two distinct non-ground nodes, and at least one source. A
    /// purely resistive network has no excitation and no meaningful unique
    /// DC solution.
    pub fn is_valid(&self) -> bool {
        self.elements.len() >= 2
            && self.nodes.len() >= 2
            && (!self.vsources.is_empty() || !self.csources.is_empty())
    }

    /// Get an element by index.
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// The elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of distinct non-ground nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of voltage sources.
    pub fn num_vsources(&self) -> usize {
        self.vsources.len()
    }

    /// Number of current sources.
    pub fn num_csources(&self) -> usize {
        self.csources.len()
    }

    /// Non-ground node labels in their stable first-insertion order.
    pub fn node_labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Resolve a node label to its matrix index. Ground resolves to `None`,
    /// as does a label no element currently references.
    pub fn node_index(&self, label: &str) -> Option<usize> {
        if label == GROUND {
            None
        } else {
            self.nodes.get_index_of(label)
        }
    }

    /// Reference count for a non-ground node label, if present.
    pub fn node_refcount(&self, label: &str) -> Option<usize> {
        self.nodes.get(label).copied()
    }

    /// Position of the element at `index` within the voltage-source
    /// sub-list, which is also its branch-current slot.
    pub(crate) fn vsource_position(&self, index: usize) -> Option<usize> {
        self.vsources.iter().position(|&i| i == index)
    }
}
