//! Configuration for the path-edge index and edge manager.
//!
//! Follows the surrounding framework's tiered configuration pattern:
//! a [`Preset`] one-liner for the common case, with [`IndexConfig`]
//! fields available for direct override when a caller needs something
//! between the presets.

#[cfg(feature = "config-yaml")]
use serde::{Deserialize, Serialize};

/// Configuration preset for [`IndexConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-yaml", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-yaml", serde(rename_all = "lowercase"))]
pub enum Preset {
    /// Lowest per-edge overhead: no `altPaths` mirror, no audit checks.
    /// Good for a solver that has already been validated and just wants
    /// throughput.
    Fast,

    /// `altPaths` maintained for O(1) `reachable(n, d1)`, audit checks
    /// off. The default: most analyses call `reachable` inside a
    /// merge-heavy worklist loop and want the fast path.
    Balanced,

    /// `altPaths` maintained *and* every paranoid cross-check enabled
    /// (fast/slow `reachable` equivalence, succ/pred symmetry). Meant
    /// for developing new flow functions, not production throughput.
    Thorough,

    /// Minimal defaults; callers are expected to override fields
    /// directly rather than rely on preset tuning.
    Custom,
}

impl Preset {
    pub fn index_config(self) -> IndexConfig {
        match self {
            Preset::Fast => IndexConfig {
                fast_merge: false,
                simple_row_capacity: 8,
                normal_case_rows: 0,
                audit_mode: false,
            },
            Preset::Balanced => IndexConfig {
                fast_merge: true,
                simple_row_capacity: 8,
                normal_case_rows: 16,
                audit_mode: false,
            },
            Preset::Thorough => IndexConfig {
                fast_merge: true,
                simple_row_capacity: 8,
                normal_case_rows: 16,
                audit_mode: true,
            },
            Preset::Custom => IndexConfig::default(),
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Balanced
    }
}

/// Tuning knobs shared by [`crate::path_edges::LocalPathEdges`] and
/// [`crate::graph::SparseNumberedEdgeManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-yaml", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-yaml", serde(default))]
pub struct IndexConfig {
    /// Maintain the `altPaths` mirror so `reachable(n, d1)` is O(cost of
    /// `related`) instead of an O(#d2-rows) scan. See §4.2.
    pub fast_merge: bool,

    /// Row length at which a [`crate::nat::NatSet`] promotes from the
    /// simple list encoding to the two-level sparse bit vector. §4.1
    /// suggests "≤ ~8" for the simple encoding.
    pub simple_row_capacity: usize,

    /// How many leading rows of a [`crate::relation::BinaryNaturalRelation`]
    /// are pre-committed to the simple encoding rather than starting
    /// empty and promoting lazily. Mirrors the edge manager's
    /// `normalCase` constructor parameter from §4.3.
    pub normal_case_rows: usize,

    /// Enable the paranoid cross-checks described in §4.2.4 (fast/slow
    /// `reachable` equivalence) and §4.3 (succ/pred symmetry). These
    /// walk structures that would otherwise not be touched on the hot
    /// path, so they cost real time — leave off outside tests/debugging.
    pub audit_mode: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Preset::Balanced.index_config()
    }
}

impl IndexConfig {
    pub fn from_preset(preset: Preset) -> Self {
        preset.index_config()
    }

    pub fn fast_merge(mut self, v: bool) -> Self {
        self.fast_merge = v;
        self
    }

    pub fn simple_row_capacity(mut self, v: usize) -> Self {
        self.simple_row_capacity = v;
        self
    }

    pub fn normal_case_rows(mut self, v: usize) -> Self {
        self.normal_case_rows = v;
        self
    }

    pub fn audit_mode(mut self, v: bool) -> Self {
        self.audit_mode = v;
        self
    }

    #[cfg(feature = "config-yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
