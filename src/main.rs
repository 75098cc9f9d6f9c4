//! reviewlda: find users who review the same things.

use clap::Parser;
use reviewlda::similarity::Metric;
use reviewlda::{thresholds, Pipeline, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reviewlda", version, about = "Topic-model neighbors for review authors")]
struct Args {
    /// JSON-lines review file (review_id, user_id, text per line)
    #[arg(env = "REVIEWLDA_SOURCE")]
    source: PathBuf,

    /// Directory for <user>.json neighbor files (default: current directory)
    #[arg(short, long, env = "REVIEWLDA_TARGET")]
    target: Option<PathBuf>,

    /// Number of LDA topics
    #[arg(short = 'k', long, default_value_t = thresholds::DEFAULT_NUM_TOPICS, env = "REVIEWLDA_TOPICS")]
    num_topics: usize,

    /// Gibbs sampling passes
    #[arg(long, default_value_t = thresholds::DEFAULT_PASSES, env = "REVIEWLDA_PASSES")]
    passes: usize,

    /// Keep only reviews in this language (ISO 639-1 or 639-3)
    #[arg(short, long, default_value = thresholds::DEFAULT_LANGUAGE, env = "REVIEWLDA_LANGUAGE")]
    language: String,

    /// Distance function: euclidean, manhattan, chebyshev or cosine
    #[arg(short, long, default_value = "euclidean", env = "REVIEWLDA_DISTANCE")]
    distance: Metric,

    /// Fraction of pairwise distances counted as close
    #[arg(short, long, default_value_t = thresholds::DEFAULT_PERCENTAGE, env = "REVIEWLDA_PERCENTAGE")]
    percentage: f64,

    /// Sampler seed
    #[arg(long, default_value_t = thresholds::DEFAULT_SEED, env = "REVIEWLDA_SEED")]
    seed: u64,

    /// Precomputed model; needs --dictionary
    #[arg(long, requires = "dictionary", env = "REVIEWLDA_MODEL")]
    model: Option<PathBuf>,

    /// Dictionary the precomputed model was trained with
    #[arg(long, requires = "model", env = "REVIEWLDA_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Save tokenized reviews, dictionary and model here
    #[arg(long, env = "REVIEWLDA_ARTIFACTS")]
    artifacts: Option<PathBuf>,
}

impl From<Args> for PipelineConfig {
    fn from(a: Args) -> Self {
        Self {
            source: a.source,
            target: a.target,
            num_topics: a.num_topics,
            passes: a.passes,
            language: a.language,
            metric: a.distance,
            percentage: a.percentage,
            seed: a.seed,
            model_path: a.model,
            dictionary_path: a.dictionary,
            artifacts_dir: a.artifacts,
            ..Self::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PipelineConfig::from(Args::parse());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.source.display(),
        topics = config.num_topics,
        metric = %config.metric,
        percentage = config.percentage,
        "reviewlda starting"
    );

    match Pipeline::new(config).run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, config = e.is_config(), "run failed");
            ExitCode::FAILURE
        }
    }
}
