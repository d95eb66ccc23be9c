use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::graph::{dist_add, Graph, NodeId, Weight, INF};

/// Square `n × n` grid of distances, indexed by the sorted node order.
///
/// The diagonal is always 0; off-diagonal cells hold a finite distance or [`INF`].
/// Serializes as a list of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<Vec<Weight>>")]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<Weight>,
}

impl DistanceMatrix {
    /// Diagonal 0, everything else unreachable.
    pub fn unreachable(n: usize) -> Self {
        let mut cells = vec![INF; n * n];
        for i in 0..n {
            cells[i * n + i] = 0;
        }
        Self { n, cells }
    }

    /// Direct weight matrix for `graph`, with rows/cols in sorted node order.
    ///
    /// When several edges join the same ordered pair, the last one in the edge
    /// list wins. Self-loops and edges with unknown endpoints are ignored.
    pub fn from_graph(graph: &Graph) -> (Self, Vec<NodeId>) {
        let nodes = graph.sorted_nodes();
        let position: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut matrix = Self::unreachable(nodes.len());
        for edge in graph.edges() {
            let (Some(&i), Some(&j)) = (
                position.get(edge.from.as_str()),
                position.get(edge.to.as_str()),
            ) else {
                continue;
            };
            if i != j {
                matrix.set(i, j, edge.weight);
            }
        }

        (matrix, nodes)
    }

    /// Build from explicit rows. Panics if the rows are not square.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Weight>>) -> Self {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            assert_eq!(row.len(), n, "distance matrix rows must be square");
            cells.extend(row);
        }
        Self { n, cells }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Weight {
        self.cells[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Weight) {
        self.cells[i * self.n + j] = value;
    }

    pub fn row(&self, i: usize) -> &[Weight] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> Vec<Vec<Weight>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// Min-plus product: `out[i][j] = min over k of self[i][k] + other[k][j]`.
    pub fn min_plus_product(&self, other: &Self) -> Self {
        assert_eq!(self.n, other.n, "min-plus operands must share a size");
        let n = self.n;
        let mut out = vec![INF; n * n];
        for i in 0..n {
            for k in 0..n {
                let ik = self.get(i, k);
                if ik >= INF {
                    continue;
                }
                for j in 0..n {
                    let candidate = dist_add(ik, other.get(k, j));
                    let cell = &mut out[i * n + j];
                    if candidate < *cell {
                        *cell = candidate;
                    }
                }
            }
        }
        Self { n, cells: out }
    }

    /// Elementwise minimum with `other`.
    pub fn min_with(&mut self, other: &Self) {
        for (cell, &o) in self.cells.iter_mut().zip(&other.cells) {
            if o < *cell {
                *cell = o;
            }
        }
    }

    /// True when no cell can be improved through any intermediate vertex.
    pub fn is_fixed_point(&self) -> bool {
        let n = self.n;
        (0..n).all(|k| {
            (0..n).all(|i| (0..n).all(|j| dist_add(self.get(i, k), self.get(k, j)) >= self.get(i, j)))
        })
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0)
    }
}

impl Default for DistanceMatrix {
    fn default() -> Self {
        Self::unreachable(0)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Weight>> {
    fn from(m: DistanceMatrix) -> Self {
        m.rows()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                if j > 0 {
                    write!(f, " ")?;
                }
                match self.get(i, j) {
                    v if v >= INF => write!(f, "{:>6}", "inf")?,
                    v => write!(f, "{:>6}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
