//! User similarity: mean topic vectors, pairwise distances, the percentile
//! cutoff, and per-user neighbor lists.
//!
//! Users are kept in a `BTreeMap`, so every traversal (histogram, neighbor
//! lists) visits them in user-id order and output is reproducible run to run.

mod aggregate;
mod distance;
mod histogram;
mod neighbors;
mod threshold;

use std::collections::BTreeMap;

pub use aggregate::{aggregate, dense_vector};
pub use distance::{chebyshev, cosine_distance, euclidean, manhattan, DistanceFn, Metric};
pub use histogram::{distance_histogram, distances_from, DistanceHistogram};
pub use neighbors::{find_closest, resolve_neighbors, Neighbor};
pub use threshold::select_threshold;

/// Sparse topic → probability pairs for one document.
pub type TopicDistribution = Vec<(usize, f64)>;

/// User id → one topic distribution per review the user wrote.
pub type UserCorpus = BTreeMap<String, Vec<TopicDistribution>>;

/// User id → dense mean topic vector.
pub type UserVectors = BTreeMap<String, Vec<f64>>;
