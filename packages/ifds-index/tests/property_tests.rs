//! Property-based checks for the universal invariants of `LocalPathEdges`
//! and `SparseNumberedEdgeManager`, run over bounded-domain randomized
//! operation sequences.

use proptest::prelude::*;

use ifds_path_index::graph::{DenseNodeManager, EdgeManager, SparseNumberedEdgeManager};
use ifds_path_index::{IndexConfig, LocalPathEdges};

const DOMAIN: usize = 6;

fn small_usize() -> impl Strategy<Value = usize> {
    0..DOMAIN
}

fn triple() -> impl Strategy<Value = (usize, usize, usize)> {
    (small_usize(), small_usize(), small_usize())
}

proptest! {
    /// Invariant 1 & 2: add/contains agreement, and add is idempotent.
    #[test]
    fn add_then_contains_holds(ops in proptest::collection::vec(triple(), 0..200)) {
        let mut p = LocalPathEdges::new(false);
        for &(i, n, j) in &ops {
            p.add(i, n, j);
            p.add(i, n, j); // idempotence check inline
            prop_assert!(p.contains(i, n, j));
        }
    }

    /// Invariant 3: every added triple shows up in `inverse`, `reachable`,
    /// and `reachedNodes`.
    #[test]
    fn added_triples_are_observable(ops in proptest::collection::vec(triple(), 0..200)) {
        let mut p = LocalPathEdges::new(true);
        for &(i, n, j) in &ops {
            p.add(i, n, j);
        }
        for &(i, n, j) in &ops {
            prop_assert!(p.inverse(n, j).contains(i));
            prop_assert!(p.reachable(n, i).contains(j));
            let reached: Vec<usize> = p.reached_nodes().iter().collect();
            prop_assert!(reached.contains(&n));
        }
    }

    /// Invariant 4 / S6: `reachable` must agree regardless of `fastMerge`.
    #[test]
    fn fast_merge_does_not_change_reachable(ops in proptest::collection::vec(triple(), 0..300)) {
        let mut fast = LocalPathEdges::new(true);
        let mut slow = LocalPathEdges::new(false);
        for &(i, n, j) in &ops {
            fast.add(i, n, j);
            slow.add(i, n, j);
        }
        for n in 0..DOMAIN {
            for d1 in 0..DOMAIN {
                let a: Vec<usize> = {
                    let mut v: Vec<usize> = fast.reachable(n, d1).iter().collect();
                    v.sort_unstable();
                    v
                };
                let b: Vec<usize> = {
                    let mut v: Vec<usize> = slow.reachable(n, d1).iter().collect();
                    v.sort_unstable();
                    v
                };
                prop_assert_eq!(a, b);
            }
        }
    }

    /// Invariant 2, restated at the store level: replaying the same
    /// sequence twice (every op duplicated) must produce a store
    /// indistinguishable from playing it once.
    #[test]
    fn replaying_ops_twice_is_indistinguishable(ops in proptest::collection::vec(triple(), 0..150)) {
        let mut once = LocalPathEdges::new(false);
        for &(i, n, j) in &ops {
            once.add(i, n, j);
        }
        let mut twice = LocalPathEdges::new(false);
        for &(i, n, j) in &ops {
            twice.add(i, n, j);
            twice.add(i, n, j);
        }
        for n in 0..DOMAIN {
            for j in 0..DOMAIN {
                let mut a: Vec<usize> = once.inverse(n, j).iter().collect();
                let mut b: Vec<usize> = twice.inverse(n, j).iter().collect();
                a.sort_unstable();
                b.sort_unstable();
                prop_assert_eq!(a, b);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GraphOp {
    Add(usize, usize),
    Remove(usize, usize),
    RemoveOutgoing(usize),
    RemoveIncoming(usize),
    RemoveAllIncident(usize),
}

fn graph_op() -> impl Strategy<Value = GraphOp> {
    prop_oneof![
        (small_usize(), small_usize()).prop_map(|(a, b)| GraphOp::Add(a, b)),
        (small_usize(), small_usize()).prop_map(|(a, b)| GraphOp::Remove(a, b)),
        small_usize().prop_map(GraphOp::RemoveOutgoing),
        small_usize().prop_map(GraphOp::RemoveIncoming),
        small_usize().prop_map(GraphOp::RemoveAllIncident),
    ]
}

fn assert_symmetry(g: &SparseNumberedEdgeManager<DenseNodeManager<usize>>) {
    for x in 0..DOMAIN {
        for y in 0..DOMAIN {
            assert_eq!(
                g.has_edge(&x, &y),
                g.pred_nodes(&y).contains(&&x),
                "succ/pred asymmetry at ({x}, {y})"
            );
        }
    }
}

proptest! {
    /// Invariants 5 & 6: succ/pred symmetry and the hasAnySuccessor cache
    /// hold after any sequence of edge mutations.
    #[test]
    fn graph_invariants_hold_after_arbitrary_ops(ops in proptest::collection::vec(graph_op(), 0..200)) {
        let mut g: SparseNumberedEdgeManager<DenseNodeManager<usize>> =
            SparseNumberedEdgeManager::new(DenseNodeManager::new(), IndexConfig::default());
        for n in 0..DOMAIN {
            g.node_manager_mut().make_node(n);
        }
        for op in ops {
            match op {
                GraphOp::Add(a, b) => { let _ = g.add_edge(&a, &b); }
                GraphOp::Remove(a, b) => { let _ = g.remove_edge(&a, &b); }
                GraphOp::RemoveOutgoing(a) => { let _ = g.remove_outgoing_edges(&a); }
                GraphOp::RemoveIncoming(a) => { let _ = g.remove_incoming_edges(&a); }
                GraphOp::RemoveAllIncident(a) => { let _ = g.remove_all_incident_edges(&a); }
            }
            assert_symmetry(&g);
            for x in 0..DOMAIN {
                prop_assert_eq!(g.has_any_successor(&x), g.succ_node_count(&x) > 0);
            }
        }
    }

    /// Invariant 7: `removeAllIncidentEdges(n)` leaves `n` with no
    /// successors or predecessors, and touches no edge not incident on
    /// `n`.
    #[test]
    fn remove_all_incident_isolates_the_node(
        ops in proptest::collection::vec((small_usize(), small_usize()), 0..100),
        victim in small_usize(),
    ) {
        let mut g: SparseNumberedEdgeManager<DenseNodeManager<usize>> =
            SparseNumberedEdgeManager::new(DenseNodeManager::new(), IndexConfig::default());
        for n in 0..DOMAIN {
            g.node_manager_mut().make_node(n);
        }
        for (a, b) in &ops {
            let _ = g.add_edge(a, b);
        }
        let mut untouched_edges = Vec::new();
        for x in 0..DOMAIN {
            for y in 0..DOMAIN {
                if x != victim && y != victim && g.has_edge(&x, &y) {
                    untouched_edges.push((x, y));
                }
            }
        }

        g.remove_all_incident_edges(&victim).unwrap();

        prop_assert_eq!(g.succ_node_count(&victim), 0);
        prop_assert_eq!(g.pred_node_count(&victim), 0);
        for (x, y) in untouched_edges {
            prop_assert!(g.has_edge(&x, &y));
        }
    }
}
