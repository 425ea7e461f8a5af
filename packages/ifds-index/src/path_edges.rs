//! `LocalPathEdges`: the per-procedure path-edge triple store, §4.2.
//!
//! A path edge `⟨s_p, d1⟩ → ⟨n, d2⟩` is routed on arrival into one of
//! three stores, keyed on the relationship between `d1` (written `i`
//! below) and `d2` (`j`):
//!
//! - `i == 0`            → `zeroPaths[j]`, a plain set of `n` (the zero
//!   fact is the universal source, so `i` carries no information).
//! - `i == j` (and `i != 0`) → `identityPaths[i]`, a plain set of `n`
//!   (an identity edge is determined entirely by the shared fact, the
//!   pair `(n, i)` is redundant with itself).
//! - otherwise            → `paths[j]`, a [`BinaryNaturalRelation`] over
//!   `(n, i)`.
//!
//! The three stores never overlap in what they can produce for a given
//! `(n, d2)` or `(n, d1)` query — see the routing argument below each
//! query method — so the `FactSet` builders in this module never need
//! to deduplicate.
//!
//! When `fast_merge` is on, every insert is mirrored into a fourth,
//! `i`-keyed relation `altPaths[i]` over `(n, j)`, trading memory and
//! write cost for an O(`related` cost) `reachable(n, d1)` instead of an
//! O(#distinct d2) scan.

use rustc_hash::FxHashMap;

use crate::config::IndexConfig;
use crate::fact_set::FactSet;
use crate::nat::NatSet;
use crate::relation::BinaryNaturalRelation;

/// Per-procedure store of path edges, keyed by supergraph node `n` and
/// fact ids `d1`/`d2`. One instance covers a single procedure; an
/// interprocedural solver owns one per procedure it has visited.
#[derive(Debug, Clone)]
pub struct LocalPathEdges {
    /// `paths[j]` relates `n` to every `i` with a path edge `⟨_, i⟩ →
    /// ⟨n, j⟩` where `i` is neither `0` nor `j`.
    paths: FxHashMap<usize, BinaryNaturalRelation>,
    /// `identityPaths[i]` is the set of `n` with a path edge `⟨_, i⟩ →
    /// ⟨n, i⟩`, `i != 0`.
    identity_paths: FxHashMap<usize, NatSet>,
    /// `zeroPaths[j]` is the set of `n` with a path edge `⟨_, 0⟩ → ⟨n,
    /// j⟩`.
    zero_paths: FxHashMap<usize, NatSet>,
    /// `altPaths[i]` relates `n` to every `j` reachable at `n` from
    /// `i`, mirroring the three stores above. Present only when
    /// `fast_merge` is enabled.
    alt_paths: Option<FxHashMap<usize, BinaryNaturalRelation>>,
    config: IndexConfig,
}

impl LocalPathEdges {
    /// A store with `IndexConfig::default()` except for `fast_merge`,
    /// which callers most often want to pick explicitly at the call
    /// site rather than thread a whole config through.
    pub fn new(fast_merge: bool) -> Self {
        Self::with_config(IndexConfig::default().fast_merge(fast_merge))
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            paths: FxHashMap::default(),
            identity_paths: FxHashMap::default(),
            zero_paths: FxHashMap::default(),
            alt_paths: if config.fast_merge {
                Some(FxHashMap::default())
            } else {
                None
            },
            config,
        }
    }

    pub fn fast_merge(&self) -> bool {
        self.config.fast_merge
    }

    fn new_nat_set() -> NatSet {
        NatSet::new()
    }

    /// Record the path edge `⟨_, i⟩ → ⟨n, j⟩`. Idempotent.
    pub fn add(&mut self, i: usize, n: usize, j: usize) {
        let threshold = self.config.simple_row_capacity;
        if i == 0 {
            self.zero_paths
                .entry(j)
                .or_insert_with(Self::new_nat_set)
                .insert(n, threshold);
            if let Some(alt) = &mut self.alt_paths {
                alt.entry(0)
                    .or_insert_with(|| BinaryNaturalRelation::new(threshold))
                    .add(n, j);
            }
        } else if i == j {
            self.identity_paths
                .entry(i)
                .or_insert_with(Self::new_nat_set)
                .insert(n, threshold);
            if let Some(alt) = &mut self.alt_paths {
                alt.entry(i)
                    .or_insert_with(|| BinaryNaturalRelation::new(threshold))
                    .add(n, i);
            }
        } else {
            self.paths
                .entry(j)
                .or_insert_with(|| BinaryNaturalRelation::new(threshold))
                .add(n, i);
            if let Some(alt) = &mut self.alt_paths {
                alt.entry(i)
                    .or_insert_with(|| BinaryNaturalRelation::new(threshold))
                    .add(n, j);
            }
        }
        #[cfg(feature = "trace")]
        tracing::trace!(i, n, j, "path edge recorded");
    }

    /// Does `⟨_, i⟩ → ⟨n, j⟩` already exist?
    pub fn contains(&self, i: usize, n: usize, j: usize) -> bool {
        if i == 0 {
            self.zero_paths.get(&j).map_or(false, |s| s.contains(n))
        } else if i == j {
            self.identity_paths.get(&i).map_or(false, |s| s.contains(n))
        } else {
            self.paths.get(&j).map_or(false, |r| r.contains(n, i))
        }
    }

    /// Every `d1` with a path edge `⟨_, d1⟩ → ⟨n, d2⟩`.
    ///
    /// Routing argument: a given `(n, d2)` pair draws from `paths[d2]`
    /// (which only ever holds `i` values with `i != 0` and `i != d2`),
    /// from `identity_paths[d2]` (which can only contribute `d2`
    /// itself), and from `zero_paths[d2]` (which can only contribute
    /// `0`). `d2` and `0` are excluded from `paths[d2]`'s domain by
    /// construction (see `add`), so the three contributions are
    /// pairwise disjoint and `push` never needs to check for
    /// duplicates.
    pub fn inverse(&self, n: usize, d2: usize) -> FactSet {
        let mut out = FactSet::Empty;
        if let Some(relation) = self.paths.get(&d2) {
            if let Some(row) = relation.related(n) {
                for i in row.iter() {
                    out = out.push(i);
                }
            }
        }
        if self
            .identity_paths
            .get(&d2)
            .map_or(false, |s| s.contains(n))
        {
            out = out.push(d2);
        }
        if self.zero_paths.get(&d2).map_or(false, |s| s.contains(n)) {
            out = out.push(0);
        }
        out
    }

    /// Every `d2` with a path edge `⟨_, d1⟩ → ⟨n, d2⟩`.
    ///
    /// Dispatches to the `altPaths` mirror when `fast_merge` is on;
    /// otherwise scans every `paths[j]` row at `n`. Under
    /// `config.audit_mode` (only meaningful when `fast_merge` is also
    /// on) both paths are computed and compared, panicking on mismatch
    /// since that indicates a bug in this crate rather than a caller
    /// error.
    pub fn reachable(&self, n: usize, d1: usize) -> FactSet {
        let slow = || self.reachable_slow(n, d1);
        match &self.alt_paths {
            Some(_) => {
                let fast = self.reachable_fast(n, d1);
                if self.config.audit_mode && !fact_sets_equal(&fast, &slow()) {
                    panic!(
                        "{}",
                        crate::errors::IndexError::PoisonedInvariant(format!(
                            "reachable({n}, {d1}) fast/slow mismatch"
                        ))
                    );
                }
                fast
            }
            None => slow(),
        }
    }

    fn reachable_fast(&self, n: usize, d1: usize) -> FactSet {
        match self.alt_paths.as_ref().and_then(|alt| alt.get(&d1)) {
            Some(relation) => match relation.related(n) {
                Some(row) => row.iter().collect(),
                None => FactSet::Empty,
            },
            None => FactSet::Empty,
        }
    }

    /// Routing argument: symmetric to `inverse` — `paths[j]` rows at
    /// `n` containing `d1` contribute `j`, `identity_paths[d1]`
    /// contributes `d1` itself (only when `d1 != 0`, since
    /// `identity_paths` never stores a row for `0`), and
    /// `zero_paths[j]` contributes every such `j` only when `d1 == 0`.
    fn reachable_slow(&self, n: usize, d1: usize) -> FactSet {
        let mut out = FactSet::Empty;
        for (&j, relation) in self.paths.iter() {
            if relation.contains(n, d1) {
                out = out.push(j);
            }
        }
        if self
            .identity_paths
            .get(&d1)
            .map_or(false, |s| s.contains(n))
        {
            out = out.push(d1);
        }
        if d1 == 0 {
            for (&j, nat) in self.zero_paths.iter() {
                if nat.contains(n) {
                    out = out.push(j);
                }
            }
        }
        out
    }

    /// Every `d2` reachable at `n` from *any* `d1`, i.e. the union of
    /// `reachable(n, d1)` over every `d1` this store has ever recorded
    /// a path edge for. Used when a caller wants "what facts hold at
    /// `n`" without regard to which source fact produced them.
    pub fn reachable_any(&self, n: usize) -> FactSet {
        let mut out = FactSet::Empty;
        for (&j, relation) in self.paths.iter() {
            if relation.related_count(n) > 0 {
                out = out.push(j);
            }
        }
        for (&i, nat) in self.identity_paths.iter() {
            if nat.contains(n) {
                out = out.push(i);
            }
        }
        for (&j, nat) in self.zero_paths.iter() {
            if nat.contains(n) {
                out = out.push(j);
            }
        }
        out
    }

    /// The set of every node `n` that has at least one path edge
    /// landing on it, across all three stores.
    pub fn reached_nodes(&self) -> NatSet {
        let mut out = NatSet::new();
        let threshold = self.config.simple_row_capacity;
        for relation in self.paths.values() {
            for n in relation.row_keys() {
                out.insert(n, threshold);
            }
        }
        for nat in self.identity_paths.values() {
            for n in nat.iter() {
                out.insert(n, threshold);
            }
        }
        for nat in self.zero_paths.values() {
            for n in nat.iter() {
                out.insert(n, threshold);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.identity_paths.is_empty() && self.zero_paths.is_empty()
    }
}

fn fact_sets_equal(a: &FactSet, b: &FactSet) -> bool {
    use rustc_hash::FxHashSet;
    let a: FxHashSet<usize> = a.iter().collect();
    let b: FxHashSet<usize> = b.iter().collect();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fact_routes_to_zero_paths() {
        let mut p = LocalPathEdges::new(false);
        p.add(0, 10, 3);
        assert!(p.contains(0, 10, 3));
        assert!(!p.contains(0, 10, 4));
        // (0, n, 0) must never land in identity_paths[0].
        p.add(0, 11, 0);
        assert!(p.contains(0, 11, 0));
    }

    #[test]
    fn identity_fact_routes_to_identity_paths() {
        let mut p = LocalPathEdges::new(false);
        p.add(5, 20, 5);
        assert!(p.contains(5, 20, 5));
        assert!(!p.contains(5, 20, 6));
    }

    #[test]
    fn general_fact_routes_to_paths() {
        let mut p = LocalPathEdges::new(false);
        p.add(2, 30, 7);
        assert!(p.contains(2, 30, 7));
        assert!(!p.contains(2, 30, 8));
        assert!(!p.contains(3, 30, 7));
    }

    #[test]
    fn inverse_collects_from_all_three_stores() {
        let mut p = LocalPathEdges::new(false);
        p.add(0, 1, 9); // zero
        p.add(9, 1, 9); // identity
        p.add(4, 1, 9); // general
        p.add(6, 1, 9); // general
        let inv = p.inverse(1, 9);
        assert_eq!(inv.len(), 4);
        for d1 in [0, 9, 4, 6] {
            assert!(inv.contains(d1));
        }
    }

    #[test]
    fn reachable_slow_matches_inverse_view() {
        let mut p = LocalPathEdges::new(false);
        p.add(0, 1, 9);
        p.add(0, 1, 10);
        p.add(9, 1, 9);
        p.add(4, 1, 9);
        p.add(4, 1, 11);
        let r = p.reachable(1, 4);
        assert_eq!(r.len(), 2);
        assert!(r.contains(9) && r.contains(11));

        let r0 = p.reachable(1, 0);
        assert_eq!(r0.len(), 2);
        assert!(r0.contains(9) && r0.contains(10));
    }

    #[test]
    fn fast_and_slow_reachable_agree() {
        let mut fast = LocalPathEdges::new(true);
        let mut slow = LocalPathEdges::new(false);
        let edges = [
            (0usize, 1usize, 9usize),
            (0, 1, 10),
            (9, 1, 9),
            (4, 1, 9),
            (4, 1, 11),
            (2, 5, 3),
            (3, 5, 3),
            (0, 5, 3),
        ];
        for &(i, n, j) in &edges {
            fast.add(i, n, j);
            slow.add(i, n, j);
        }
        for n in [1, 5] {
            for d1 in [0, 2, 3, 4, 9] {
                assert!(fact_sets_equal(&fast.reachable(n, d1), &slow.reachable(n, d1)));
            }
        }
    }

    #[test]
    fn reachable_any_unions_every_source_fact() {
        let mut p = LocalPathEdges::new(false);
        p.add(0, 1, 9);
        p.add(9, 1, 9);
        p.add(4, 1, 11);
        let any = p.reachable_any(1);
        assert_eq!(any.len(), 2);
        assert!(any.contains(9) && any.contains(11));
    }

    #[test]
    fn reached_nodes_unions_across_stores() {
        let mut p = LocalPathEdges::new(false);
        p.add(0, 1, 9);
        p.add(9, 2, 9);
        p.add(4, 3, 11);
        let nodes = p.reached_nodes();
        let mut got: Vec<usize> = nodes.iter().collect();
        got.sort_unstable();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn add_is_idempotent_across_all_routes() {
        let mut p = LocalPathEdges::new(true);
        for &(i, n, j) in &[(0usize, 1usize, 2usize), (2, 1, 2), (3, 1, 2)] {
            p.add(i, n, j);
            p.add(i, n, j);
        }
        assert_eq!(p.inverse(1, 2).len(), 3);
    }

    #[test]
    fn empty_store_has_no_reachable_facts() {
        let p = LocalPathEdges::new(false);
        assert!(p.is_empty());
        assert!(p.reachable(1, 0).is_empty());
        assert!(p.inverse(1, 0).is_empty());
        assert!(p.reached_nodes().is_empty());
    }
}
