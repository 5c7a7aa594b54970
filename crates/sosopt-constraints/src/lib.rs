//! Polynomial constraint lowering.
//!
//! Turns user-facing polynomial constraints (SOS, zero-equality, Putinar)
//! into the [`cone::ConePrimitive`] normal form a conic solver consumes,
//! via the square matricial representation in [`smr`].

pub mod cone;
pub mod constraints;
pub mod smr;

pub use cone::{ConeKind, ConePrimitive};
pub use constraints::{putinar_constraint, sos_constraint, zero_equality_constraint};
pub use smr::{gram_factorize, gram_to_primitives, square_matricial_representation, to_gram_polynomial, GramFactorization};
