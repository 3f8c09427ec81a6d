//! Adjacent-pair cosine similarity over an embedding sequence.
//!
//! Accumulation is done in `f64` even though providers return `f32`
//! components; high-dimensional dot products lose precision otherwise.

/// Cosine similarity for every adjacent embedding pair.
///
/// For `n` embeddings the result has `n − 1` entries; entry `i` scores the
/// pair `(i, i + 1)`. A zero-magnitude operand makes the score undefined
/// (`None`) rather than dividing by zero; undefined scores are excluded
/// from threshold statistics and never trigger a boundary.
pub fn adjacent_scores(embeddings: &[Vec<f32>]) -> Vec<Option<f64>> {
    embeddings
        .windows(2)
        .map(|pair| cosine_similarity(&pair[0], &pair[1]))
        .collect()
}

/// Cosine of the angle between two vectors, in `[-1, 1]`.
///
/// Returns `None` for mismatched lengths, empty vectors, or zero-magnitude
/// operands, so `NaN` can never escape into the statistics.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x64 = f64::from(x);
        let y64 = f64::from(y);
        dot += x64 * y64;
        norm_a += x64 * x64;
        norm_b += y64 * y64;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return None;
    }
    Some(dot / denom)
}
