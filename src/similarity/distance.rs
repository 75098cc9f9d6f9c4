use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A symmetric, non-negative distance between two equal-length vectors.
///
/// Implemented for [`Metric`] and for any `Fn(&[f64], &[f64]) -> f64`.
pub trait DistanceFn {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> DistanceFn for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// `sqrt(sum((a_i - b_i)^2))`
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

pub fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// `1 - cosine_similarity`, clamped at 0. Two zero vectors are at distance 0,
/// a zero vector and a non-zero one at distance 1.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut na = 0.0;
    let mut nb = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let denom = na.sqrt() * nb.sqrt();
    if denom < 1e-12 {
        return if na < 1e-24 && nb < 1e-24 { 0.0 } else { 1.0 };
    }
    (1.0 - dot / denom).max(0.0)
}

/// Built-in distance functions, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
    Cosine,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Cosine => "cosine",
        }
    }
}

impl DistanceFn for Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
            Self::Chebyshev => chebyshev(a, b),
            Self::Cosine => cosine_distance(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" | "cityblock" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            "cosine" => Ok(Self::Cosine),
            other => Err(format!(
                "unknown distance function: {other} (expected euclidean, manhattan, chebyshev or cosine)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Metric; 4] = [
        Metric::Euclidean,
        Metric::Manhattan,
        Metric::Chebyshev,
        Metric::Cosine,
    ];

    #[test]
    fn self_distance_is_zero() {
        let v = [0.1, 0.4, 0.5];
        for m in ALL {
            assert!(m.distance(&v, &v).abs() < 1e-12, "{m}");
        }
    }

    #[test]
    fn metrics_are_symmetric() {
        let a = [0.2, 0.3, 0.5];
        let b = [0.6, 0.1, 0.3];
        for m in ALL {
            assert!((m.distance(&a, &b) - m.distance(&b, &a)).abs() < 1e-12, "{m}");
        }
    }

    #[test]
    fn euclidean_3_4_5() {
        assert!((euclidean(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((manhattan(&[0.0, 0.0], &[3.0, 4.0]) - 7.0).abs() < 1e-12);
        assert!((chebyshev(&[0.0, 0.0], &[3.0, 4.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_orthogonal_is_one() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn closures_are_distance_fns() {
        let scaled = |a: &[f64], b: &[f64]| 2.0 * euclidean(a, b);
        assert!((scaled.distance(&[0.0], &[1.5]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn parse_metric_names() {
        assert_eq!("Euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("l1".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert!("hamming".parse::<Metric>().is_err());
        for m in ALL {
            assert_eq!(m.to_string().parse::<Metric>().unwrap(), m);
        }
    }
}
