//! Greedy clique repair.
//!
//! Turns an arbitrary vertex subset into a clique by repeatedly dropping the
//! selected vertex with the fewest selected neighbors (lowest index on
//! ties). Each removal shrinks the set, and sets of size 0 or 1 are cliques,
//! so the loop always terminates with a valid clique.
//!
//! # Complexity
//! O(k²) to build the neighbor counts for `k` selected vertices, then O(k)
//! per removal.

use crate::graph::Graph;

use super::individual::Individual;

/// Reusable buffers for [`CliqueRepair::repair`].
///
/// `counts` is indexed by vertex id and only the entries of the currently
/// selected vertices are meaningful. Keeping the buffers between calls
/// avoids an allocation per repaired child.
#[derive(Debug, Clone, Default)]
pub struct CliqueRepair {
    counts: Vec<usize>,
    members: Vec<usize>,
}

impl CliqueRepair {
    /// Buffers for graphs with up to `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            counts: vec![0; n],
            members: Vec::with_capacity(n),
        }
    }

    /// Repairs `individual` in place and returns how many vertices were dropped.
    pub fn repair(&mut self, graph: &Graph, individual: &mut Individual) -> usize {
        let n = graph.number_of_vertices();
        if self.counts.len() < n {
            self.counts.resize(n, 0);
        }

        self.members.clear();
        self.members.extend(individual.iter());
        for &v in &self.members {
            self.counts[v] = 0;
        }

        // Non-adjacent selected pairs; the set is a clique iff this is zero.
        let mut missing = 0usize;
        for (i, &u) in self.members.iter().enumerate() {
            for &v in &self.members[i + 1..] {
                if graph.is_edge(u, v) {
                    self.counts[u] += 1;
                    self.counts[v] += 1;
                } else {
                    missing += 1;
                }
            }
        }

        let mut removed = 0;
        while missing > 0 {
            let counts = &self.counts;
            let (pos, victim) = self
                .members
                .iter()
                .copied()
                .enumerate()
                .min_by_key(|&(_, v)| counts[v])
                .expect("repair: no vertex to remove from a non-clique");

            missing -= self.members.len() - 1 - self.counts[victim];
            self.members.remove(pos);
            for &u in &self.members {
                if graph.is_edge(u, victim) {
                    self.counts[u] -= 1;
                }
            }
            individual.set(victim, false);
            removed += 1;
        }

        debug_assert!(graph.is_clique(&self.members));
        removed
    }
}

/// One-shot repair with freshly allocated buffers.
pub fn repair_clique(graph: &Graph, individual: &mut Individual) -> usize {
    CliqueRepair::new(graph.number_of_vertices()).repair(graph, individual)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_clique_untouched() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let triangle: Vec<usize> = (0..4).filter(|&v| g.degree(v) == 2).collect();
        let mut ind = Individual::from_vertices(&triangle);
        assert_eq!(repair_clique(&g, &mut ind), 0);
        assert_eq!(ind.vertices(), triangle);
    }

    #[test]
    fn test_empty_and_singleton() {
        let g = path4();
        let mut ind = Individual::default();
        assert_eq!(repair_clique(&g, &mut ind), 0);
        let mut ind = Individual::from_vertices(&[3]);
        assert_eq!(repair_clique(&g, &mut ind), 0);
        assert_eq!(ind.vertices(), vec![3]);
    }

    #[test]
    fn test_full_path_reduces_to_edge() {
        let g = path4();
        let mut ind = Individual::from_vertices(&[0, 1, 2, 3]);
        let removed = repair_clique(&g, &mut ind);
        assert_eq!(removed, 2);
        assert_eq!(ind.count(), 2);
        assert!(g.is_clique(&ind.vertices()));
    }

    #[test]
    fn test_independent_set_keeps_highest_index() {
        // Every vertex has zero selected neighbors; the lowest index goes first.
        let g = Graph::from_edges(5, &[]).unwrap();
        let mut ind = Individual::from_vertices(&[0, 1, 2, 3, 4]);
        assert_eq!(repair_clique(&g, &mut ind), 4);
        assert_eq!(ind.vertices(), vec![4]);
    }

    #[test]
    fn test_removes_min_degree_first() {
        // Triangle {a, b, c} plus pendant d attached to a.
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (0, 3)]).unwrap();
        let pendant = g.index_of_label(4).unwrap();
        let mut ind = Individual::from_vertices(&[0, 1, 2, 3]);
        assert_eq!(repair_clique(&g, &mut ind), 1);
        assert!(!ind.contains(pendant));
        assert_eq!(ind.count(), 3);
    }

    #[test]
    fn test_buffers_are_reusable() {
        let g = path4();
        let mut repair = CliqueRepair::new(4);
        for subset in [vec![0, 1, 2, 3], vec![0, 2], vec![1, 2, 3], vec![]] {
            let mut ind = Individual::from_vertices(&subset);
            repair.repair(&g, &mut ind);
            assert!(g.is_clique(&ind.vertices()), "subset {subset:?}");
        }
    }

    #[test]
    fn test_member_buffer_keeps_capacity() {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (0, 2), (3, 4)]).unwrap();
        let mut repair = CliqueRepair::new(6);
        let capacity = repair.members.capacity();
        for _ in 0..10 {
            let mut ind = Individual::from_vertices(&[0, 1, 2, 3, 4, 5]);
            repair.repair(&g, &mut ind);
            assert!(g.is_clique(&ind.vertices()));
            assert_eq!(repair.members.capacity(), capacity, "member buffer reallocated");
        }
    }
}
