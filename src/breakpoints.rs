//! Adaptive threshold derivation and boundary detection.
//!
//! A fixed similarity cut-off does not generalize across transcripts of
//! different topical density, so the threshold is anchored to the current
//! run's own distribution: mean minus a configurable fraction of the
//! population standard deviation.

use crate::types::ThresholdStatistics;

/// Computes mean, population standard deviation, and the derived threshold
/// over the *defined* similarity scores.
///
/// Undefined scores (zero-magnitude operands) are excluded. Returns `None`
/// when every score is undefined; callers should emit a single chunk in
/// that case rather than treat it as an error.
pub fn threshold_statistics(
    scores: &[Option<f64>],
    std_dev_factor: f64,
) -> Option<ThresholdStatistics> {
    let defined: Vec<f64> = scores.iter().copied().flatten().collect();
    if defined.is_empty() {
        return None;
    }

    let count = defined.len() as f64;
    let mean = defined.iter().sum::<f64>() / count;
    // Population variance: divide by count, not count − 1.
    let variance = defined.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    Some(ThresholdStatistics {
        mean,
        std_dev,
        threshold: mean - std_dev_factor * std_dev,
    })
}

/// Marks sentence positions where a new chunk starts.
///
/// Pair `i` scoring strictly below the threshold emits boundary `i + 1`;
/// equality does not trigger, and undefined scores never do. The result is
/// strictly increasing, never contains 0, and never reaches the sentence
/// count.
pub fn detect_boundaries(scores: &[Option<f64>], threshold: f64) -> Vec<usize> {
    scores
        .iter()
        .enumerate()
        .filter_map(|(i, score)| match score {
            Some(s) if *s < threshold => Some(i + 1),
            _ => None,
        })
        .collect()
}
