//! Undirected graph shared by all clique searches.
//!
//! A [`Graph`] stores both an adjacency list and a dense bit-set adjacency
//! matrix, so neighbor iteration and edge tests are both cheap. On
//! construction, vertices are relabeled by descending degree: internal index
//! 0 is the vertex with the most neighbors. The original 1-based labels stay
//! available through [`Graph::label`] and [`Graph::index_of_label`].
//!
//! # Examples
//!
//! ```
//! use clique_metaheur::graph::Graph;
//!
//! let graph: Graph = "p edge 3 2\ne 1 2\ne 2 3\n".parse().unwrap();
//! assert_eq!(graph.number_of_vertices(), 3);
//! assert_eq!(graph.number_of_edges(), 2);
//!
//! // Label 2 has the highest degree, so it becomes index 0.
//! assert_eq!(graph.index_of_label(2), Some(0));
//! assert!(graph.is_edge(0, 1) && graph.is_edge(0, 2));
//! assert!(!graph.is_edge(1, 2));
//! ```

pub(crate) mod edge_list;

use std::path::Path;
use std::str::FromStr;

use bit_set::BitSet;
use tracing::debug;

use crate::error::{CliqueError, CliqueResult};

/// Canonical, degree-relabeled adjacency structure.
#[derive(Debug, Clone)]
pub struct Graph {
    number_of_vertices: usize,
    number_of_edges: usize,
    /// adjacency_list[v]: neighbors of v, ascending.
    adjacency_list: Vec<Vec<usize>>,
    /// adjacency_matrix[v]: bit-set of the neighbors of v.
    adjacency_matrix: Vec<BitSet>,
    /// index2label[v]: 1-based original label of index v.
    index2label: Vec<usize>,
    /// label2index[l]: index of label l. Slot 0 is unused.
    label2index: Vec<usize>,
}

impl Graph {
    /// Builds a graph from 0-based edges over `number_of_vertices` vertices.
    ///
    /// Self-loops are ignored and parallel edges collapse into one.
    pub fn from_edges(number_of_vertices: usize, edges: &[(usize, usize)]) -> CliqueResult<Self> {
        let mut lists = vec![Vec::new(); number_of_vertices];
        for &(u, v) in edges {
            for endpoint in [u, v] {
                if endpoint >= number_of_vertices {
                    return Err(CliqueError::VertexOutOfRange {
                        vertex: endpoint,
                        vertices: number_of_vertices,
                    });
                }
            }
            if u != v {
                lists[u].push(v);
                lists[v].push(u);
            }
        }
        for list in &mut lists {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Self::relabeled(lists))
    }

    /// Loads a graph from a DIMACS-style edge-list file.
    pub fn read_edge_list<P: AsRef<Path>>(path: P) -> CliqueResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let graph = Self::parse_edge_list(&text)?;
        debug!(
            path = %path.as_ref().display(),
            vertices = graph.number_of_vertices,
            edges = graph.number_of_edges,
            "loaded edge list"
        );
        Ok(graph)
    }

    /// Parses DIMACS-style edge-list text.
    pub fn parse_edge_list(text: &str) -> CliqueResult<Self> {
        let list = edge_list::parse(text)?;
        if list.declared_edges != list.edges.len() {
            debug!(
                declared = list.declared_edges,
                found = list.edges.len(),
                "edge count differs from problem line"
            );
        }
        Self::from_edges(list.vertices, &list.edges)
    }

    /// Sorts vertices by descending degree and rewrites every structure in
    /// the new indices. `lists` uses the original 0-based ids.
    fn relabeled(lists: Vec<Vec<usize>>) -> Self {
        let n = lists.len();

        // Stable: equal degrees keep their original order.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| lists[b].len().cmp(&lists[a].len()));

        let mut index2label = vec![0; n];
        let mut label2index = vec![0; n + 1];
        for (index, &original) in order.iter().enumerate() {
            index2label[index] = original + 1;
            label2index[original + 1] = index;
        }

        let adjacency_list: Vec<Vec<usize>> = order
            .iter()
            .map(|&original| {
                let mut row: Vec<usize> = lists[original]
                    .iter()
                    .map(|&w| label2index[w + 1])
                    .collect();
                row.sort_unstable();
                row
            })
            .collect();

        let number_of_edges = adjacency_list.iter().map(Vec::len).sum::<usize>() / 2;
        let adjacency_matrix = build_adjacency_matrix(&adjacency_list);

        Self {
            number_of_vertices: n,
            number_of_edges,
            adjacency_list,
            adjacency_matrix,
            index2label,
            label2index,
        }
    }

    /// Number of vertices.
    pub fn number_of_vertices(&self) -> usize {
        self.number_of_vertices
    }

    /// Number of undirected edges.
    pub fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }

    /// Returns `true` if `u` and `v` are adjacent.
    ///
    /// # Panics
    /// Panics if either index is not below [`number_of_vertices`](Self::number_of_vertices).
    #[inline]
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        assert!(
            v < self.number_of_vertices,
            "vertex {v} out of bounds for graph with {} vertices",
            self.number_of_vertices
        );
        self.adjacency_matrix[u].contains(v)
    }

    /// Returns `true` if every pair in `vertices` is adjacent.
    ///
    /// The empty list and single vertices are cliques.
    pub fn is_clique(&self, vertices: &[usize]) -> bool {
        vertices.iter().enumerate().all(|(i, &u)| {
            vertices[i + 1..].iter().all(|&v| self.is_edge(u, v))
        })
    }

    /// Number of neighbors of `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency_list[v].len()
    }

    /// Neighbors of `v`, ascending.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency_list[v]
    }

    /// The whole adjacency list.
    pub fn adjacency_list(&self) -> &[Vec<usize>] {
        &self.adjacency_list
    }

    /// Original 1-based label of index `v`.
    pub fn label(&self, v: usize) -> usize {
        self.index2label[v]
    }

    /// Index of the vertex with original label `label`, if it exists.
    pub fn index_of_label(&self, label: usize) -> Option<usize> {
        if label == 0 || label > self.number_of_vertices {
            None
        } else {
            Some(self.label2index[label])
        }
    }

    /// Maps indices to their original labels.
    pub fn labels_of(&self, vertices: &[usize]) -> Vec<usize> {
        vertices.iter().map(|&v| self.index2label[v]).collect()
    }

    /// Induced subgraph on `vertices`.
    ///
    /// Vertex `vertices[i]` gets label `i + 1` in the subgraph; the subgraph
    /// is then degree-sorted like any other graph.
    ///
    /// # Panics
    /// Panics if a vertex is out of bounds.
    pub fn get_subgraph(&self, vertices: &[usize]) -> Graph {
        let k = vertices.len();
        let mut lists = vec![Vec::new(); k];
        for i in 0..k {
            for j in (i + 1)..k {
                if self.is_edge(vertices[i], vertices[j]) {
                    lists[i].push(j);
                    lists[j].push(i);
                }
            }
        }
        Self::relabeled(lists)
    }

    /// Vertex with the fewest neighbors; the lowest index wins ties.
    ///
    /// Returns `None` for the empty graph.
    pub fn vertex_with_lowest_degree(&self) -> Option<usize> {
        (0..self.number_of_vertices).min_by_key(|&v| self.adjacency_list[v].len())
    }

    /// Disconnects `vertex` from the graph.
    ///
    /// The vertex is removed from every neighbor list and its matrix row and
    /// column are cleared, so list and matrix stay consistent. It remains in
    /// the graph as an isolated vertex.
    pub fn remove_vertex(&mut self, vertex: usize) {
        let neighbors = std::mem::take(&mut self.adjacency_list[vertex]);
        for &w in &neighbors {
            self.adjacency_list[w].retain(|&x| x != vertex);
            self.adjacency_matrix[w].remove(vertex);
        }
        self.adjacency_matrix[vertex].clear();
        self.number_of_edges -= neighbors.len();
    }
}

impl FromStr for Graph {
    type Err = CliqueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_edge_list(s)
    }
}

fn build_adjacency_matrix(adjacency_list: &[Vec<usize>]) -> Vec<BitSet> {
    let n = adjacency_list.len();
    adjacency_list
        .iter()
        .map(|row| {
            let mut bits = BitSet::with_capacity(n);
            for &w in row {
                bits.insert(w);
            }
            bits
        })
        .collect()
}
