//! Defaults and cutoffs shared across the pipeline.

/// Topic count used when none is configured.
pub const DEFAULT_NUM_TOPICS: usize = 100;

/// Gibbs sweeps over the corpus when fitting.
pub const DEFAULT_PASSES: usize = 20;

/// Neighbor cutoff: the closest 5% of all pairwise distances.
pub const DEFAULT_PERCENTAGE: f64 = 0.05;

/// Reviews in any other language are dropped before tokenizing.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Returned by threshold selection when the cumulative count never reaches
/// the target (only possible with a percentage above 1).
pub const FALLBACK_THRESHOLD: f64 = 1.0;

/// Distances are binned to this many decimal places.
pub const DISTANCE_DECIMALS: i32 = 2;

/// Topics below this probability are truncated from a document's distribution.
pub const MIN_TOPIC_PROBABILITY: f64 = 0.01;

/// Topic-word Dirichlet prior.
pub const DEFAULT_ETA: f64 = 0.01;

/// Fixed-point iterations when inferring a single document's topics.
pub const INFERENCE_ITERATIONS: usize = 50;

/// Seed for the Gibbs sampler.
pub const DEFAULT_SEED: u64 = 42;
