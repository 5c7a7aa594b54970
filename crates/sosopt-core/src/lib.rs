//! # sosopt-core: symbol registry
//!
//! The foundation layer of the sosopt lowering pipeline: the `Symbol`/`State`
//! registry that assigns every declared decision variable a
//! contiguous range in the flat primal vector, and the workspace-wide
//! error type.
//!
//! ## Design philosophy
//!
//! `State` is threaded explicitly through every construction operation —
//! there is no global, implicitly-shared registry. Two independent
//! optimization problems simply use two independent `State` values.
//!
//! ## Quick start
//!
//! ```
//! use sosopt_core::{State, Symbol, SymbolKind, GramMode};
//!
//! let mut state = State::new(GramMode::Dense);
//! let x = Symbol::new("x", SymbolKind::Decision);
//! let (start, stop) = state.allocate(x, 3).unwrap();
//! assert_eq!((start, stop), (0, 3));
//! assert_eq!(state.n_indices(), 3);
//! ```

pub mod error;
pub mod state;

pub use error::{SosOptError, SosOptResult};
pub use state::{GramMode, State, Symbol, SymbolKind};
