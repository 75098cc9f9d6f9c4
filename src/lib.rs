//! reviewlda: group reviewers by what they write about.
//!
//! Reviews are tokenized and fed to an LDA topic model. Each user becomes the
//! mean of their reviews' topic distributions, and users whose vectors sit in
//! the closest slice of all pairwise distances become neighbors.

pub mod config;
pub mod corpus;
pub mod error;
pub mod lda;
pub mod pipeline;
pub mod review;
pub mod similarity;
pub mod text;
pub mod thresholds;
pub mod util;

pub use config::PipelineConfig;
pub use error::{Result, ReviewLdaError};
pub use pipeline::{Pipeline, RunSummary};
