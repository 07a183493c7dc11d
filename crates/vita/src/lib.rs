//! A Rust library for evolutionary program synthesis: Multi-Expression
//! Programming (MEP) genetic programming, classical GA and differential
//! evolution, sharing one ALPS-aware evolutionary engine.
//!
//! This crate re-exports the whole workspace: genome/objective
//! primitives (`vita-core`), the MEP genome and interpreter
//! (`vita-gp`), recombination operators (`vita-alters`), selection
//! strategies (`vita-selectors`), and the evolution driver
//! (`vita-engines`).

pub use vita_alters::*;
pub use vita_core::*;
pub use vita_engines::*;
pub use vita_error::{VitaError, ensure, vita_err};
pub use vita_gp::*;
pub use vita_selectors::*;
