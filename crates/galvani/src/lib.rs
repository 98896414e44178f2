//! # Galvani
//!
//! A solver for linear resistive DC circuits using Modified Nodal Analysis
//! (MNA): describe a network of resistors, independent voltage sources, and
//! independent current sources between named nodes, and solve for every node
//! voltage and voltage-source branch current.
//!
//! ## Quick Start
//!
//! ```rust
//! use galvani::{Circuit, Element, solve_dc};
//!
//! // A 10V source across a 1k/1k voltage divider.
//! let mut circuit = Circuit::new();
//! circuit.add_element(Element::voltage_source("v1", "1", "0", 10.0))?;
//! circuit.add_element(Element::resistor("r1", "1", "2", 1000.0))?;
//! circuit.add_element(Element::resistor("r2", "2", "0", 1000.0))?;
//!
//! let solution = solve_dc(&circuit)?;
//! assert!((solution.voltage("2").unwrap() - 5.0).abs() < 1e-10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Component values can also be given as text with SI metric suffixes
//! (`"4.7k"`, `"10m"`, `"100n"`); an unparsable value is rejected when the
//! element is added to a circuit.

// Re-export the component crates
pub use galvani_core as core;
pub use galvani_solver as solver;

// Common types at the crate root
pub use galvani_core::{Assembler, Circuit, Element, ElementKind, GROUND, MnaSystem};
pub use galvani_solver::{DcSolution, solve_dc, solve_dense};
