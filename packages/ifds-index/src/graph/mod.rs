//! Sparse-numbered directed graph support, §4.3: node numbering, the
//! edge manager, and the `duplicate` utility that mirrors any numbered
//! graph into a concrete, dense representation.

mod edge_manager;
mod node_manager;

pub use edge_manager::{EdgeManager, SparseNumberedEdgeManager};
pub use node_manager::{DenseNodeManager, NumberedNodeManager};

use std::hash::Hash;

use crate::config::IndexConfig;
use crate::errors::Result;

/// The read side of a numbered graph, independent of how edges are
/// stored: enough to mirror one graph into another via [`duplicate`].
pub trait NumberedGraph {
    type Node;

    /// Every node number currently assigned. Implementations that
    /// number densely from `0` may implement this as `0..node_count()`.
    fn iter_node_numbers(&self) -> Vec<usize>;

    fn get_node(&self, number: usize) -> Option<&Self::Node>;

    /// Successor node numbers of `number`.
    fn succ_numbers(&self, number: usize) -> Vec<usize>;
}

impl<NM: NumberedNodeManager> NumberedGraph for SparseNumberedEdgeManager<NM> {
    type Node = NM::Node;

    fn iter_node_numbers(&self) -> Vec<usize> {
        (0..self.node_manager().node_count()).collect()
    }

    fn get_node(&self, number: usize) -> Option<&Self::Node> {
        self.node_manager().get_node(number)
    }

    fn succ_numbers(&self, number: usize) -> Vec<usize> {
        self.succ_numbers_of(number)
    }
}

/// A concrete, general-purpose numbered graph: a dense node manager
/// paired with its edge manager. What [`duplicate`] builds its copy
/// into.
pub type SlowSparseNumberedGraph<T> = SparseNumberedEdgeManager<DenseNodeManager<T>>;

impl<T: Eq + Hash + Clone> SlowSparseNumberedGraph<T> {
    pub fn new_dense(config: IndexConfig) -> Self {
        SparseNumberedEdgeManager::new(DenseNodeManager::new(), config)
    }
}

/// Mirror `g` into a fresh [`SlowSparseNumberedGraph`] with the same
/// nodes and edges. Nodes are fully mirrored before any edge is added,
/// per §4.3 — an edge-adding pass that ran concurrently with node
/// mirroring could resolve a destination that hadn't been registered
/// yet.
pub fn duplicate<G>(g: &G, config: IndexConfig) -> Result<SlowSparseNumberedGraph<G::Node>>
where
    G: NumberedGraph,
    G::Node: Eq + Hash + Clone,
{
    let mut out = SlowSparseNumberedGraph::new_dense(config);

    for number in g.iter_node_numbers() {
        if let Some(node) = g.get_node(number) {
            out.node_manager_mut().make_node(node.clone());
        }
    }

    for number in g.iter_node_numbers() {
        let Some(src) = g.get_node(number) else {
            continue;
        };
        for y in g.succ_numbers(number) {
            if let Some(dst) = g.get_node(y) {
                out.add_edge(src, dst)?;
            }
        }
    }

    Ok(out)
}
