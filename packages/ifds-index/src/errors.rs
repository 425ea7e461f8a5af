//! Error types for ifds-path-index
//!
//! Two kinds, matching the two fault classes the component design
//! distinguishes: a caller handed a node the node manager doesn't know
//! about (`NotInGraph`, recoverable — the operation simply has no
//! effect), and an internal invariant was found broken under audit mode
//! (`PoisonedInvariant`/`ContractViolation`, not recoverable — it means
//! this crate has a bug, not the caller).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// An edge manager operation was given a node that the
    /// `NumberedNodeManager` resolved to a negative number.
    #[error("node not in graph: {0}")]
    NotInGraph(String),

    /// A negative coordinate (`n`, `i`, or `j`) reached a public entry
    /// point that still has to check for it at a language boundary
    /// (e.g. a signed node number arriving from an external collaborator
    /// before it has been validated).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// An audit-mode cross-check found a mismatch: `succ`/`pred`
    /// symmetry broke, or `reachable` disagreed between its fast and
    /// slow implementations. Indicates a bug in this crate.
    #[error("internal invariant violated: {0}")]
    PoisonedInvariant(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
