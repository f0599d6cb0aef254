//! Timing and memory comparison of the two representations
//!
//! For each dataset size: insert a seeded random dataset into both trees,
//! then search every key back. Peak memory is taken from the array
//! store's space tracker and from the reference tree's node count.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::{ImplicitAvl, ReferenceAvl, StoreConfig, TreeError};

/// Errors from a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// No sizes to run
    #[error("benchmark needs at least one dataset size")]
    EmptySizes,

    /// A dataset size of zero
    #[error("dataset size must be greater than zero")]
    ZeroSize,

    /// The array store failed to grow
    #[error("array store error: {0}")]
    Store(#[from] TreeError),
}

/// Parameters of a benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Dataset sizes, one row each
    pub sizes: Vec<usize>,

    /// Keys are drawn uniformly from `0..=key_max`
    pub key_max: i64,

    /// RNG seed
    pub seed: u64,

    /// Array store pre-allocates `size * capacity_factor` slots
    pub capacity_factor: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: vec![100, 500, 1_000, 2_000, 5_000],
            key_max: 100_000,
            seed: 42,
            capacity_factor: 10,
        }
    }
}

impl BenchmarkConfig {
    fn check(&self) -> Result<(), BenchError> {
        if self.sizes.is_empty() {
            return Err(BenchError::EmptySizes);
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::ZeroSize);
        }
        Ok(())
    }
}

/// Measurements for one dataset size
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BenchmarkRow {
    /// Keys generated (duplicates included)
    pub size: usize,

    /// Pointer tree: insertion time
    pub reference_insert: Duration,
    /// Pointer tree: search time
    pub reference_search: Duration,
    /// Pointer tree: node bytes
    pub reference_bytes: usize,

    /// Array tree: insertion time
    pub array_insert: Duration,
    /// Array tree: search time
    pub array_search: Duration,
    /// Array tree: peak slot bytes
    pub array_bytes: usize,
    /// Array tree: reallocations
    pub array_reallocations: usize,
    /// Array tree: nodes moved by rotations
    pub array_relocated: usize,
}

impl BenchmarkRow {
    /// Header line matching the [`fmt::Display`] layout
    pub fn header() -> String {
        format!(
            "{:>7} | {:>11} | {:>11} | {:>11} | {:>11} | {:>10} | {:>10} | {:>8} | {:>9}",
            "n", "ref ins", "arr ins", "ref search", "arr search", "ref KB", "arr KB", "reallocs", "relocated"
        )
    }
}

impl fmt::Display for BenchmarkRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>7} | {:>11.3?} | {:>11.3?} | {:>11.3?} | {:>11.3?} | {:>10.1} | {:>10.1} | {:>8} | {:>9}",
            self.size,
            self.reference_insert,
            self.array_insert,
            self.reference_search,
            self.array_search,
            self.reference_bytes as f64 / 1024.0,
            self.array_bytes as f64 / 1024.0,
            self.array_reallocations,
            self.array_relocated
        )
    }
}

/// Seeded dataset of `size` keys in `0..=key_max`
pub fn dataset(size: usize, key_max: i64, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.gen_range(0..=key_max)).collect()
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Measure one dataset
pub fn measure(keys: &[i64], capacity_factor: usize) -> Result<BenchmarkRow, BenchError> {
    let (reference, reference_insert) = timed(|| {
        let mut tree = ReferenceAvl::new();
        tree.extend(keys.iter().copied());
        tree
    });
    let (_, reference_search) = timed(|| keys.iter().filter(|k| reference.contains(k)).count());

    let config = StoreConfig::with_capacity(keys.len().saturating_mul(capacity_factor)).profiled();
    let (array, array_insert) = timed(|| -> Result<_, TreeError> {
        let mut store = ImplicitAvl::with_config(&config);
        for &key in keys {
            store.try_insert(key)?;
        }
        Ok(store)
    });
    let mut array = array?;
    let (_, array_search) = timed(|| keys.iter().filter(|k| array.search(k)).count());

    let array_bytes = array.space().max_bytes();
    let profile = array.take_profile().unwrap_or_default();

    Ok(BenchmarkRow {
        size: keys.len(),
        reference_insert,
        reference_search,
        reference_bytes: reference.approx_bytes(),
        array_insert,
        array_search,
        array_bytes,
        array_reallocations: profile.reallocations,
        array_relocated: profile.nodes_relocated,
    })
}

/// Run every configured size
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<Vec<BenchmarkRow>, BenchError> {
    config.check()?;

    config
        .sizes
        .iter()
        .map(|&size| {
            tracing::info!(size, "running experiments");
            let keys = dataset(size, config.key_max, config.seed);
            let row = measure(&keys, config.capacity_factor)?;
            tracing::debug!(
                size,
                array_bytes = row.array_bytes,
                reference_bytes = row.reference_bytes,
                "measured"
            );
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_is_seeded() {
        let a = dataset(50, 1_000, 7);
        let b = dataset(50, 1_000, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|&k| (0..=1_000).contains(&k)));
        assert_ne!(a, dataset(50, 1_000, 8));
    }

    #[test]
    fn test_rejects_bad_config() {
        let empty = BenchmarkConfig {
            sizes: vec![],
            ..BenchmarkConfig::default()
        };
        assert!(matches!(run_benchmark(&empty), Err(BenchError::EmptySizes)));

        let zero = BenchmarkConfig {
            sizes: vec![10, 0],
            ..BenchmarkConfig::default()
        };
        assert!(matches!(run_benchmark(&zero), Err(BenchError::ZeroSize)));
    }

    #[test]
    fn test_small_run() {
        let config = BenchmarkConfig {
            sizes: vec![20, 60],
            capacity_factor: 1,
            ..BenchmarkConfig::default()
        };
        let rows = run_benchmark(&config).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].size, 20);
        assert!(rows[1].array_bytes >= 60 * ImplicitAvl::<i64>::slot_bytes());
        assert!(rows[1].reference_bytes > 0);
    }

    #[test]
    fn test_header_and_row_align() {
        let row = measure(&[3, 1, 2], 10).unwrap();
        let line = row.to_string();
        assert_eq!(line.matches('|').count(), BenchmarkRow::header().matches('|').count());
    }
}
