//! # Nearest-Neighbor Diagnostics

use crate::model::{EmbeddingMatrix, embedding_matrix::dot};

/// Cosine similarity of row `query` against every row of a row-normalized matrix.
///
/// ## Arguments
/// * `normalized` - a matrix from [`EmbeddingMatrix::normalized`].
/// * `query` - the query row.
pub fn cosine_similarities(
    normalized: &EmbeddingMatrix,
    query: usize,
) -> Vec<f32> {
    let q = normalized.row(query);
    score_rows(normalized, |row| dot(q, row))
}

#[cfg(feature = "rayon")]
fn score_rows<F>(
    matrix: &EmbeddingMatrix,
    score: F,
) -> Vec<f32>
where
    F: Fn(&[f32]) -> f32 + Sync,
{
    use rayon::prelude::*;

    (0..matrix.rows())
        .into_par_iter()
        .map(|i| score(matrix.row(i)))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn score_rows<F>(
    matrix: &EmbeddingMatrix,
    score: F,
) -> Vec<f32>
where
    F: Fn(&[f32]) -> f32 + Sync,
{
    (0..matrix.rows()).map(|i| score(matrix.row(i))).collect()
}

/// The `k` rows most similar to `query`.
///
/// Rows are sorted by descending cosine similarity (ties by row index) and
/// rank 0, the query itself under normal conditions, is skipped.
///
/// ## Returns
/// Up to `k` ``(row, similarity)`` pairs.
pub fn nearest_neighbors(
    normalized: &EmbeddingMatrix,
    query: usize,
    k: usize,
) -> Vec<(usize, f32)> {
    let sims = cosine_similarities(normalized, query);
    let mut ranked: Vec<(usize, f32)> = sims.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().skip(1).take(k).collect()
}
