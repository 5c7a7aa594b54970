//! Conic problem assembly and result back-substitution.
//!
//! This crate sits between the constraint-construction layer
//! (`sosopt-constraints`) and the two solver adapters: it flattens a cost
//! and a list of cone primitives into the dense-array contract both
//! adapters speak, and turns a raw solver primal vector back into
//! per-symbol values.

pub mod adapter;
pub mod problem;
pub mod result;

pub use adapter::SolverAdapter;
pub use problem::{assemble, ConeBlock, LinearCost, SolverArgs};
pub use result::{back_substitute, find_by_name, to_named_map, SolverResult, SymbolValue};
