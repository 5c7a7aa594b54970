//! Sparse SDP adapter.
//!
//! Pairs naturally with `State::gram_mode() == GramMode::Sparse`: the
//! Newton-polytope-reduced Gram blocks `sosopt-constraints::smr` produces in
//! sparse mode are already smaller, so this adapter builds the Clarabel
//! constraint matrix through `sprs`'s triplet-matrix assembly — accumulate a
//! `TriMat`, then `to_csc()` — rather than the dense adapter's flat
//! triplet-sort. Each SDP block is reduced to its lower triangle (`tril`)
//! before being handed to Clarabel's native `PSDTriangleConeT`, the same
//! scaled-svec format both adapters ultimately speak.

mod adapter;

pub use adapter::SparseSdpAdapter;
