use serde::{Deserialize, Serialize};

use super::{distances_from, DistanceFn, UserVectors};
use crate::error::{Result, ReviewLdaError};
use crate::util::round_distance;

/// One entry of a neighbor list. Serializes as `[distance, user_id]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct Neighbor {
    pub distance: f64,
    pub user_id: String,
}

impl Neighbor {
    pub fn new(distance: f64, user_id: impl Into<String>) -> Self {
        Self {
            distance,
            user_id: user_id.into(),
        }
    }
}

impl From<(f64, String)> for Neighbor {
    fn from((distance, user_id): (f64, String)) -> Self {
        Self { distance, user_id }
    }
}

impl From<Neighbor> for (f64, String) {
    fn from(n: Neighbor) -> Self {
        (n.distance, n.user_id)
    }
}

/// Distances from `user` to every other user, optionally cut at `threshold`.
///
/// The filter compares the distance *rounded to two decimals* against the
/// threshold, while the returned pairs carry the unrounded distance. Output
/// follows user-id order and is not sorted by distance.
pub fn resolve_neighbors<D: DistanceFn + ?Sized>(
    user: &str,
    vectors: &UserVectors,
    distance: &D,
    threshold: Option<f64>,
) -> Result<Vec<Neighbor>> {
    if let Some(t) = threshold {
        if t.is_nan() {
            return Err(ReviewLdaError::InvalidThreshold("threshold is NaN".into()));
        }
    }

    let mut all = distances_from(user, vectors, distance)?;
    if let Some(t) = threshold {
        all.retain(|n| round_distance(n.distance) <= t);
    }
    Ok(all)
}

/// The single closest other user. On ties the first in user-id order wins.
/// `None` when `user` is the only one.
pub fn find_closest<D: DistanceFn + ?Sized>(
    user: &str,
    vectors: &UserVectors,
    distance: &D,
) -> Result<Option<Neighbor>> {
    let mut best: Option<Neighbor> = None;
    for n in distances_from(user, vectors, distance)? {
        match &best {
            Some(b) if n.distance >= b.distance => {}
            _ => best = Some(n),
        }
    }
    Ok(best)
}
