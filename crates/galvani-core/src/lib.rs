//! Core circuit representation and MNA assembly for Galvani.
//!
//! This crate provides the fundamental data structures for describing linear
//! resistive DC circuits — elements, the circuit aggregator with its node
//! bookkeeping — and the Modified Nodal Analysis (MNA) matrix system those
//! circuits are stamped into.

pub mod assemble;
pub mod circuit;
pub mod element;
pub mod error;
pub mod mna;
pub mod units;

pub use assemble::Assembler;
pub use circuit::Circuit;
pub use element::{Element, ElementKind, GROUND};
pub use error::{Error, Result};
pub use mna::MnaSystem;
