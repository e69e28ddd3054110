//! Exact L2 nearest-neighbor index.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// One search hit: the row position and its distance to the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    /// Row position in the index, identical to the chunk position.
    pub position: usize,
    /// Squared L2 distance to the query vector. Squared distance orders
    /// rows identically to true L2 and skips the square root.
    pub distance: f32,
}

/// A flat, exact nearest-neighbor index over squared L2 distance.
///
/// Every query scans every row, so results are exact, never approximate.
/// Row `i` corresponds 1:1 to chunk `i`; the index is built in one step
/// from the full vector set and is immutable afterwards, so a partially
/// populated index is never observable.
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatL2Index {
    /// Build an index over the given vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if any vector's length
    /// differs from `dimensions`.
    pub fn build(dimensions: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
        for vector in &vectors {
            if vector.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    actual: vector.len(),
                });
            }
        }
        Ok(Self { dimensions, vectors })
    }

    /// Number of rows in the index.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimensionality the index was built with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the `k` nearest rows to `query`, nearest first.
    ///
    /// Equal distances are broken by ascending row position, so results
    /// are fully deterministic. If the index holds fewer than `k` rows,
    /// all rows are returned.
    ///
    /// # Errors
    ///
    /// - [`RagError::IndexNotReady`] if the index holds no rows.
    /// - [`RagError::DimensionMismatch`] if `query` has the wrong length.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.vectors.is_empty() {
            return Err(RagError::IndexNotReady);
        }
        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, row)| Neighbor { position, distance: squared_l2(query, row) })
            .collect();

        neighbors
            .sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.position.cmp(&b.position)));
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
