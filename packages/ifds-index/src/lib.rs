//! Per-procedure path-edge index for IFDS-style interprocedural
//! dataflow tabulation.
//!
//! A path edge `⟨s_p, d1⟩ → ⟨n, d2⟩` says: starting from a procedure's
//! entry point with dataflow fact `d1`, a same-level realizable path
//! reaches program point `n` with fact `d2`. [`path_edges::LocalPathEdges`]
//! is the triple-indexed store a tabulation solver accumulates these
//! edges into, one instance per procedure. [`relation::BinaryNaturalRelation`]
//! is the shared set-of-pairs substrate both it and
//! [`graph::SparseNumberedEdgeManager`] (the solver's supergraph
//! adjacency) are built from.
//!
//! This crate owns none of the tabulation algorithm, the control-flow
//! graph construction, or the dataflow domain itself — it is the
//! storage layer those pieces are built on.

pub mod config;
pub mod errors;
pub mod fact_set;
pub mod graph;
pub mod nat;
pub mod path_edges;
pub mod relation;

pub use config::{IndexConfig, Preset};
pub use errors::{IndexError, Result};
pub use fact_set::FactSet;
pub use graph::{duplicate, DenseNodeManager, EdgeManager, NumberedGraph, NumberedNodeManager, SlowSparseNumberedGraph, SparseNumberedEdgeManager};
pub use nat::{NatSet, RowEncoding};
pub use path_edges::LocalPathEdges;
pub use relation::BinaryNaturalRelation;
