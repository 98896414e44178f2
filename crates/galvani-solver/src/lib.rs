//! Solvers for Galvani.
//!
//! This crate provides:
//! - Dense linear system solving via LU decomposition
//! - DC operating-point analysis over a [`galvani_core::Circuit`]

pub mod dc;
pub mod error;
pub mod linear;

pub use dc::{DcSolution, solve_dc};
pub use error::{Error, Result};
pub use linear::solve_dense;
