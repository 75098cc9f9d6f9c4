use std::collections::BTreeMap;

use super::{DistanceFn, Neighbor, UserVectors};
use crate::error::{Result, ReviewLdaError};
use crate::util::{bin_value, distance_bin};

/// Frequency table of pairwise distances rounded to two decimals.
///
/// Built over *ordered* pairs, so every unordered pair of users is counted
/// twice and `total() == n * (n - 1)`. Threshold selection is defined against
/// these doubled counts; do not halve them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceHistogram {
    // key: distance in hundredths
    bins: BTreeMap<i64, u64>,
}

impl DistanceHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one distance in its rounded bin.
    pub fn record(&mut self, distance: f64) {
        *self.bins.entry(distance_bin(distance)).or_insert(0) += 1;
    }

    /// Occurrences of `distance` after rounding it to two decimals.
    pub fn count(&self, distance: f64) -> u64 {
        self.bins.get(&distance_bin(distance)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.bins.values().sum()
    }

    /// Number of distinct rounded distances.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// `(distance, count)` in ascending distance order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.bins.iter().map(|(&bin, &count)| (bin_value(bin), count))
    }

    pub(crate) fn bins(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.bins.iter().map(|(&bin, &count)| (bin, count))
    }
}

impl FromIterator<(f64, u64)> for DistanceHistogram {
    fn from_iter<I: IntoIterator<Item = (f64, u64)>>(iter: I) -> Self {
        let mut hist = Self::new();
        for (distance, count) in iter {
            if count > 0 {
                *hist.bins.entry(distance_bin(distance)).or_insert(0) += count;
            }
        }
        hist
    }
}

fn checked_distance<D: DistanceFn + ?Sized>(
    distance: &D,
    from: (&str, &[f64]),
    to: (&str, &[f64]),
) -> Result<f64> {
    if from.1.len() != to.1.len() {
        return Err(ReviewLdaError::DimensionMismatch {
            expected: from.1.len(),
            actual: to.1.len(),
        });
    }
    let value = distance.distance(from.1, to.1);
    if !value.is_finite() || value < 0.0 {
        return Err(ReviewLdaError::InvalidDistance {
            from: from.0.to_string(),
            to: to.0.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Histogram of rounded distances over every ordered pair of distinct users.
pub fn distance_histogram<D: DistanceFn + ?Sized>(
    vectors: &UserVectors,
    distance: &D,
) -> Result<DistanceHistogram> {
    let mut hist = DistanceHistogram::new();
    for (user, vector) in vectors {
        for (other, other_vector) in vectors {
            if other == user {
                continue;
            }
            let d = checked_distance(
                distance,
                (user.as_str(), vector.as_slice()),
                (other.as_str(), other_vector.as_slice()),
            )?;
            hist.record(d);
        }
    }
    tracing::debug!(
        users = vectors.len(),
        pairs = hist.total(),
        bins = hist.len(),
        "distance histogram built"
    );
    Ok(hist)
}

/// Unrounded distances from `user` to every other user, in user-id order.
pub fn distances_from<D: DistanceFn + ?Sized>(
    user: &str,
    vectors: &UserVectors,
    distance: &D,
) -> Result<Vec<Neighbor>> {
    let vector = vectors
        .get(user)
        .ok_or_else(|| ReviewLdaError::UnknownUser(user.to_string()))?;

    vectors
        .iter()
        .filter(|(other, _)| other.as_str() != user)
        .map(|(other, other_vector)| {
            let d = checked_distance(
                distance,
                (user, vector.as_slice()),
                (other.as_str(), other_vector.as_slice()),
            )?;
            Ok(Neighbor::new(d, other.clone()))
        })
        .collect()
}
