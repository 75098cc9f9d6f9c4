use super::DistanceHistogram;
use crate::error::{Result, ReviewLdaError};
use crate::thresholds::FALLBACK_THRESHOLD;
use crate::util::bin_value;

/// Smallest histogram distance at which the cumulative count, summed from the
/// smallest distance upward, reaches `percentage * total`.
///
/// When the target is never reached (only with `percentage > 1`) the result is
/// [`FALLBACK_THRESHOLD`], regardless of how large the distances are.
pub fn select_threshold(hist: &DistanceHistogram, percentage: f64) -> Result<f64> {
    if percentage.is_nan() || percentage <= 0.0 {
        return Err(ReviewLdaError::InvalidThreshold(format!(
            "percentage must be positive, got {percentage}"
        )));
    }
    if hist.is_empty() {
        return Err(ReviewLdaError::InvalidThreshold(
            "distance histogram is empty (fewer than two users)".into(),
        ));
    }

    let target = hist.total() as f64 * percentage;
    let mut running = 0u64;
    for (bin, count) in hist.bins() {
        running += count;
        if running as f64 >= target {
            return Ok(bin_value(bin));
        }
    }
    tracing::warn!(percentage, "cumulative count never reached target, using fallback threshold");
    Ok(FALLBACK_THRESHOLD)
}
