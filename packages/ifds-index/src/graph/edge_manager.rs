//! `SparseNumberedEdgeManager`: a directed graph over numbered nodes
//! backed by two [`BinaryNaturalRelation`]s kept in lockstep, §4.3.

use crate::config::IndexConfig;
use crate::errors::{IndexError, Result};
use crate::nat::NatSet;
use crate::relation::BinaryNaturalRelation;

use super::node_manager::NumberedNodeManager;

/// The upward-facing contract graph clients program against, independent
/// of how nodes are numbered underneath.
pub trait EdgeManager {
    type Node;

    fn add_edge(&mut self, s: &Self::Node, d: &Self::Node) -> Result<()>;
    fn has_edge(&self, s: &Self::Node, d: &Self::Node) -> bool;
    fn remove_edge(&mut self, s: &Self::Node, d: &Self::Node) -> Result<()>;
    fn remove_outgoing_edges(&mut self, n: &Self::Node) -> Result<()>;
    fn remove_incoming_edges(&mut self, n: &Self::Node) -> Result<()>;
    fn remove_all_incident_edges(&mut self, n: &Self::Node) -> Result<()>;
    fn succ_node_count(&self, n: &Self::Node) -> usize;
    fn pred_node_count(&self, n: &Self::Node) -> usize;
    fn has_any_successor(&self, n: &Self::Node) -> bool;
}

/// Maintains `succ`/`pred` relations over node numbers plus the
/// `has_successor` cache, resolving node identities through a
/// [`NumberedNodeManager`].
#[derive(Debug, Clone)]
pub struct SparseNumberedEdgeManager<NM: NumberedNodeManager> {
    node_manager: NM,
    succ: BinaryNaturalRelation,
    pred: BinaryNaturalRelation,
    has_successor: NatSet,
    config: IndexConfig,
}

impl<NM: NumberedNodeManager> SparseNumberedEdgeManager<NM> {
    pub fn new(node_manager: NM, config: IndexConfig) -> Self {
        let normal_case = vec![crate::nat::RowEncoding::Simple; config.normal_case_rows];
        Self {
            node_manager,
            succ: BinaryNaturalRelation::with_row_hints(normal_case.clone(), config.simple_row_capacity),
            pred: BinaryNaturalRelation::with_row_hints(normal_case, config.simple_row_capacity),
            has_successor: NatSet::new(),
            config,
        }
    }

    pub fn node_manager(&self) -> &NM {
        &self.node_manager
    }

    pub fn node_manager_mut(&mut self) -> &mut NM {
        &mut self.node_manager
    }

    fn resolve(&self, node: &NM::Node) -> Result<usize> {
        let number = self.node_manager.get_number(node);
        if number < 0 {
            Err(IndexError::NotInGraph(
                "node not registered with the node manager".to_string(),
            ))
        } else {
            Ok(number as usize)
        }
    }

    fn clear_has_successor_if_empty(&mut self, x: usize) {
        if self.succ.related_count(x) == 0 {
            self.has_successor.remove(x);
        }
    }

    fn audit_symmetry(&self) {
        if !self.config.audit_mode {
            return;
        }
        for (x, y) in self.succ.iter() {
            if !self.pred.contains(y, x) {
                panic!(
                    "{}",
                    crate::errors::IndexError::PoisonedInvariant(format!(
                        "succ/pred asymmetry at ({x}, {y})"
                    ))
                );
            }
        }
        for (y, x) in self.pred.iter() {
            if !self.succ.contains(x, y) {
                panic!(
                    "{}",
                    crate::errors::IndexError::PoisonedInvariant(format!(
                        "succ/pred asymmetry at ({x}, {y})"
                    ))
                );
            }
        }
    }

    /// The live set of node numbers reachable as a successor of `n`, or
    /// `None` if `n` is unregistered or has no successors. Aliases
    /// interior storage and is invalidated by any subsequent mutation
    /// of `self`, mirroring [`BinaryNaturalRelation::related`](crate::relation::BinaryNaturalRelation::related).
    pub fn succ_node_numbers(&self, n: &NM::Node) -> Option<&NatSet> {
        let x = self.resolve(n).ok()?;
        self.succ.related(x)
    }

    /// The live set of node numbers with `n` as a successor, or `None`
    /// if `n` is unregistered or has no predecessors.
    pub fn pred_node_numbers(&self, n: &NM::Node) -> Option<&NatSet> {
        let y = self.resolve(n).ok()?;
        self.pred.related(y)
    }

    pub fn succ_nodes(&self, n: &NM::Node) -> Vec<&NM::Node> {
        self.succ_node_numbers(n)
            .into_iter()
            .flat_map(|s| s.iter())
            .filter_map(|y| self.node_manager.get_node(y))
            .collect()
    }

    pub fn pred_nodes(&self, n: &NM::Node) -> Vec<&NM::Node> {
        self.pred_node_numbers(n)
            .into_iter()
            .flat_map(|s| s.iter())
            .filter_map(|x| self.node_manager.get_node(x))
            .collect()
    }

    pub(crate) fn succ_numbers_of(&self, x: usize) -> Vec<usize> {
        self.succ.related(x).map(|s| s.iter().collect()).unwrap_or_default()
    }
}

impl<NM: NumberedNodeManager> EdgeManager for SparseNumberedEdgeManager<NM> {
    type Node = NM::Node;

    fn add_edge(&mut self, s: &Self::Node, d: &Self::Node) -> Result<()> {
        let x = self.resolve(s)?;
        let y = self.resolve(d)?;
        self.succ.add(x, y);
        self.pred.add(y, x);
        self.has_successor.insert(x, self.config.simple_row_capacity);
        #[cfg(feature = "trace")]
        tracing::trace!(x, y, "edge added");
        self.audit_symmetry();
        Ok(())
    }

    fn has_edge(&self, s: &Self::Node, d: &Self::Node) -> bool {
        let x = self.node_manager.get_number(s);
        let y = self.node_manager.get_number(d);
        if x < 0 || y < 0 {
            return false;
        }
        self.succ.contains(x as usize, y as usize)
    }

    fn remove_edge(&mut self, s: &Self::Node, d: &Self::Node) -> Result<()> {
        let x = self.resolve(s)?;
        let y = self.resolve(d)?;
        // Idempotent: removing an edge that does not exist is a no-op,
        // not an error.
        self.succ.remove(x, y);
        self.clear_has_successor_if_empty(x);
        self.pred.remove(y, x);
        self.audit_symmetry();
        Ok(())
    }

    fn remove_outgoing_edges(&mut self, n: &Self::Node) -> Result<()> {
        let x = self.resolve(n)?;
        for y in self.succ_numbers_of(x) {
            self.pred.remove(y, x);
        }
        self.succ.remove_all(x);
        self.has_successor.remove(x);
        #[cfg(feature = "trace")]
        tracing::trace!(node = x, "outgoing edges removed, has_successor cleared");
        self.audit_symmetry();
        Ok(())
    }

    fn remove_incoming_edges(&mut self, n: &Self::Node) -> Result<()> {
        let y = self.resolve(n)?;
        let preds: Vec<usize> = self.pred.related(y).map(|s| s.iter().collect()).unwrap_or_default();
        for x in preds {
            self.succ.remove(x, y);
            self.clear_has_successor_if_empty(x);
        }
        self.pred.remove_all(y);
        self.audit_symmetry();
        Ok(())
    }

    fn remove_all_incident_edges(&mut self, n: &Self::Node) -> Result<()> {
        let x = self.resolve(n)?;
        for y in self.succ_numbers_of(x) {
            self.pred.remove(y, x);
        }
        self.succ.remove_all(x);
        let preds: Vec<usize> = self.pred.related(x).map(|s| s.iter().collect()).unwrap_or_default();
        for p in preds {
            self.succ.remove(p, x);
            self.clear_has_successor_if_empty(p);
        }
        self.pred.remove_all(x);
        self.has_successor.remove(x);
        self.audit_symmetry();
        Ok(())
    }

    fn succ_node_count(&self, n: &Self::Node) -> usize {
        match self.resolve(n) {
            Ok(x) => self.succ.related_count(x),
            Err(_) => 0,
        }
    }

    fn pred_node_count(&self, n: &Self::Node) -> usize {
        match self.resolve(n) {
            Ok(y) => self.pred.related_count(y),
            Err(_) => 0,
        }
    }

    fn has_any_successor(&self, n: &Self::Node) -> bool {
        match self.resolve(n) {
            Ok(x) => self.has_successor.contains(x),
            Err(_) => false,
        }
    }
}
