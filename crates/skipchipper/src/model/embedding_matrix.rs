//! # Embedding Matrix

use rand::Rng;

use crate::errors::{SCResult, SkipchipperError};

/// A dense, row-major ``rows x dim`` matrix of `f32`.
///
/// Row `i` is the embedding of vocabulary id `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    rows: usize,
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// A matrix of zeros.
    pub fn zeros(
        rows: usize,
        dim: usize,
    ) -> Self {
        Self {
            rows,
            dim,
            data: vec![0.0; rows * dim],
        }
    }

    /// Wrap row-major data.
    ///
    /// Fails with [`SkipchipperError::InvalidConfig`] if ``data.len() != rows * dim``.
    pub fn from_vec(
        rows: usize,
        dim: usize,
        data: Vec<f32>,
    ) -> SCResult<Self> {
        if data.len() != rows * dim {
            return Err(SkipchipperError::invalid_config(
                "data",
                format!("has {} values, expected {rows} x {dim}", data.len()),
            ));
        }
        Ok(Self { rows, dim, data })
    }

    /// A matrix with entries drawn uniformly from ``[low, high)``.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        dim: usize,
        low: f32,
        high: f32,
        rng: &mut R,
    ) -> Self {
        let data = (0..rows * dim)
            .map(|_| rng.random_range(low..high))
            .collect();
        Self { rows, dim, data }
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// View row `idx`.
    ///
    /// ## Panics
    /// If `idx` is out of range.
    pub fn row(
        &self,
        idx: usize,
    ) -> &[f32] {
        &self.data[idx * self.dim..(idx + 1) * self.dim]
    }

    /// Mutably view row `idx`.
    ///
    /// ## Panics
    /// If `idx` is out of range.
    pub fn row_mut(
        &mut self,
        idx: usize,
    ) -> &mut [f32] {
        &mut self.data[idx * self.dim..(idx + 1) * self.dim]
    }

    /// Gather the rows at `ids` into a new ``ids.len() x dim`` matrix.
    ///
    /// ## Panics
    /// If any id is out of range.
    pub fn gather(
        &self,
        ids: &[usize],
    ) -> Self {
        let mut data = Vec::with_capacity(ids.len() * self.dim);
        for &id in ids {
            data.extend_from_slice(self.row(id));
        }
        Self {
            rows: ids.len(),
            dim: self.dim,
            data,
        }
    }

    /// A copy with every row scaled to unit L2 norm; all-zero rows stay zero.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        if self.dim == 0 {
            return out;
        }
        for row in out.data.chunks_exact_mut(self.dim) {
            let norm = dot(row, row).sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|x| *x /= norm);
            }
        }
        out
    }
}

/// The dot product of two equal-length vectors.
#[inline]
pub fn dot(
    a: &[f32],
    b: &[f32],
) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_rows() {
        let mut m = EmbeddingMatrix::from_vec(2, 3, vec![1., 2., 3., 4., 5., 6.]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.dim(), 3);
        assert_eq!(m.row(1), &[4., 5., 6.]);

        m.row_mut(0)[1] = 9.;
        assert_eq!(m.as_slice(), &[1., 9., 3., 4., 5., 6.]);

        assert!(EmbeddingMatrix::from_vec(2, 3, vec![1.]).is_err());
        assert_eq!(EmbeddingMatrix::zeros(2, 2).as_slice(), &[0.; 4]);
    }

    #[test]
    fn test_gather() {
        let m = EmbeddingMatrix::from_vec(3, 2, vec![0., 1., 2., 3., 4., 5.]).unwrap();
        let g = m.gather(&[2, 0, 2]);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.as_slice(), &[4., 5., 0., 1., 4., 5.]);
    }

    #[test]
    fn test_normalized() {
        let m = EmbeddingMatrix::from_vec(2, 2, vec![3., 4., 0., 0.]).unwrap();
        let n = m.normalized();
        assert_eq!(n.row(0), &[0.6, 0.8]);
        assert_eq!(n.row(1), &[0., 0.]);
    }

    #[test]
    fn test_random_uniform() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = EmbeddingMatrix::random_uniform(10, 4, -1.0, 1.0, &mut rng);
        assert_eq!(m.as_slice().len(), 40);
        assert!(m.as_slice().iter().all(|x| (-1.0..1.0).contains(x)));
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1., 2., 3.], &[4., 5., 6.]), 32.);
    }
}
