//! Label to network participation group routing

use l16gw_common::LabelNpgPair;

/// NPG used when no routing entry matches (surveillance)
pub const DEFAULT_NPG: u16 = 7;

/// Ordered set of unique `(label, npg)` routing entries.
///
/// Several entries may share a label; lookup returns the first one added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpgTable {
    pairs: Vec<(u8, u16)>,
    default_npg: u16,
}

impl Default for NpgTable {
    fn default() -> Self {
        Self::new(DEFAULT_NPG)
    }
}

impl NpgTable {
    pub fn new(default_npg: u16) -> Self {
        Self {
            pairs: Vec::new(),
            default_npg,
        }
    }

    /// Builds a table from configured entries, skipping exact duplicates.
    pub fn from_pairs(pairs: &[LabelNpgPair]) -> Self {
        let mut table = Self::default();
        for pair in pairs {
            if !table.set_pair(pair.label, pair.npg) {
                tracing::debug!(label = pair.label, npg = pair.npg, "Duplicate label/NPG pair ignored");
            }
        }
        table
    }

    /// Adds a routing entry. Returns false if the exact pair already exists.
    pub fn set_pair(&mut self, label: u8, npg: u16) -> bool {
        if self.pairs.contains(&(label, npg)) {
            return false;
        }
        self.pairs.push((label, npg));
        true
    }

    /// NPG for `label`: the first matching entry, or the default.
    pub fn lookup(&self, label: u8) -> u16 {
        self.pairs
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(self.default_npg, |&(_, npg)| npg)
    }

    pub fn default_npg(&self) -> u16 {
        self.default_npg
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
