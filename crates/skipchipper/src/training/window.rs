//! # Dynamic Context Windows
//!
//! For each center position, the window reach `R` is drawn uniformly from
//! ``{1, ..., C}``; nearer words are therefore sampled more often than
//! distant ones.
//!
//! Windows are deduplicated by *value*: if an id appears several times
//! within a window it contributes one context row, and any occurrence of
//! the center's own id is removed along with the center.

use rand::Rng;

use crate::{
    errors::{SCResult, SkipchipperError},
    training::options::validate_window_size,
    types::{SCHashSet, TokenType, hash_set_with_capacity},
};

/// Collect the distinct context ids within `reach` of `chunk[idx]`.
///
/// The window is ``chunk[max(0, idx - reach) .. min(len, idx + reach + 1)]``;
/// ids are deduplicated in first-seen order and the center id is removed.
///
/// ## Returns
/// The context ids; possibly empty. Fails with
/// [`SkipchipperError::MissingCenter`] when `idx` is outside the chunk.
pub fn window_contexts<T: TokenType>(
    chunk: &[T],
    idx: usize,
    reach: usize,
) -> SCResult<Vec<T>> {
    let Some(&center) = chunk.get(idx) else {
        return Err(SkipchipperError::MissingCenter {
            index: idx,
            len: chunk.len(),
        });
    };

    let start = idx.saturating_sub(reach);
    let end = idx.saturating_add(reach).saturating_add(1).min(chunk.len());
    let window = &chunk[start..end];

    let mut seen: SCHashSet<T> = hash_set_with_capacity(window.len());
    let mut contexts: Vec<T> = Vec::with_capacity(window.len());
    for &token in window {
        if seen.insert(token) {
            contexts.push(token);
        }
    }

    match contexts.iter().position(|&t| t == center) {
        Some(pos) => {
            contexts.remove(pos);
            Ok(contexts)
        }
        None => Err(SkipchipperError::MissingCenter {
            index: idx,
            len: chunk.len(),
        }),
    }
}

/// Collect the context ids of `chunk[idx]` for a randomly sized window.
///
/// Draws exactly one reach ``R ~ U{1..=window_size}`` from `rng`, then
/// delegates to [`window_contexts`].
///
/// ## Arguments
/// * `chunk` - the token chunk.
/// * `idx` - the center position; ``0 <= idx < chunk.len()``.
/// * `window_size` - the maximum reach `C`; must be ``>= 1``.
/// * `rng` - the random source.
pub fn context_window<T, R>(
    chunk: &[T],
    idx: usize,
    window_size: usize,
    rng: &mut R,
) -> SCResult<Vec<T>>
where
    T: TokenType,
    R: Rng + ?Sized,
{
    validate_window_size(window_size)?;
    let reach = rng.random_range(1..=window_size);
    window_contexts(chunk, idx, reach)
}
