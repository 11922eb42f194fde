//! Bit-set encoded candidate clique.

use bit_set::BitSet;

/// A GA candidate: the set bits are the selected vertices.
///
/// The bit-set grows on demand, so an individual is sized by the graph it
/// is used with rather than by a compile-time bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Individual {
    genes: BitSet,
}

impl Individual {
    /// Empty individual with room for `n` vertices.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            genes: BitSet::with_capacity(n),
        }
    }

    /// Individual selecting exactly `vertices`.
    pub fn from_vertices(vertices: &[usize]) -> Self {
        let mut genes = BitSet::new();
        for &v in vertices {
            genes.insert(v);
        }
        Self { genes }
    }

    /// Whether vertex `v` is selected.
    pub fn contains(&self, v: usize) -> bool {
        self.genes.contains(v)
    }

    /// Selects or deselects vertex `v`.
    pub fn set(&mut self, v: usize, selected: bool) {
        if selected {
            self.genes.insert(v);
        } else {
            self.genes.remove(v);
        }
    }

    /// Toggles vertex `v`.
    pub fn flip(&mut self, v: usize) {
        if !self.genes.remove(v) {
            self.genes.insert(v);
        }
    }

    /// Number of selected vertices.
    pub fn count(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Iterates over the selected vertices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes.iter()
    }

    /// Selected vertices in ascending order.
    pub fn vertices(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
