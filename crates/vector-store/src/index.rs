use crate::error::{Result, VectorStoreError};
use ndarray::{ArrayView1, ArrayView2};
use std::cmp::Ordering;

/// Exact inner-product index over a contiguous row-major buffer.
///
/// Row `i` of the buffer is the vector stored at position `i`.
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(VectorStoreError::InvalidConfig(
                "embedding dimension must be > 0".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            data: Vec::new(),
        })
    }

    /// Check every vector against the index dimension without touching the buffer
    fn check_batch(&self, vectors: &[Vec<f32>]) -> Result<()> {
        match vectors.iter().find(|v| v.len() != self.dimension) {
            Some(bad) => Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: bad.len(),
            }),
            None => Ok(()),
        }
    }

    /// Append vectors in order; positions continue from the current length
    pub fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        self.check_batch(vectors)?;
        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }
        Ok(())
    }

    /// Top-`k` positions by inner product, best first.
    ///
    /// Non-finite scores count as "no match" and are dropped. Ties keep
    /// insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if query.len() != self.dimension {
            return Err(VectorStoreError::InvalidDimension {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = ArrayView2::from_shape((self.len(), self.dimension), &self.data)
            .map_err(|e| VectorStoreError::IndexError(e.to_string()))?;
        let scores = matrix.dot(&ArrayView1::from(query));

        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, score)| score.is_finite())
            .collect();

        // Best first; equal scores keep insertion order.
        let by_rank = |a: &(usize, f32), b: &(usize, f32)| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        };
        if k < ranked.len() {
            ranked.select_nth_unstable_by(k - 1, by_rank);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(by_rank);

        Ok(ranked)
    }

    /// Copy of the vector stored at `position`
    pub fn vector(&self, position: usize) -> Option<Vec<f32>> {
        let start = position.checked_mul(self.dimension)?;
        self.data
            .get(start..start + self.dimension)
            .map(<[f32]>::to_vec)
    }

    /// Get number of vectors in index
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
