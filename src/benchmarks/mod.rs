//! Benchmarking and performance analysis.
//!
//! This module measures where cubemaze spends its time. Maze generation and mesh
//! building are timed on every new game, the headless frame driver records frame
//! times, and [`summary`] renders everything as a table when the binary exits.
//!
//! # Features
//! - **Timing Measurements**: [`Timer`], [`ScopedTimer`] and [`time`] for code sections
//! - **Frame Counter**: FPS statistics from [`record_frame`]
//! - **Process-wide Storage**: one [`data::BENCHMARK_DATA`] shared by every caller
//! - **Minimal Overhead**: a disabled [`BenchmarkConfig`] just runs the closure

use std::time::Duration;

/// Configuration for benchmarking features
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Whether benchmarking is enabled
    pub enabled: bool,
    /// Whether to log every measurement at debug level as it is recorded
    pub log_results: bool,
    /// Minimum duration to record (filters out very fast operations)
    pub min_duration_threshold: Duration,
    /// Maximum number of distinct operations to keep in memory
    pub max_samples: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_results: cfg!(debug_assertions),
            min_duration_threshold: Duration::ZERO,
            max_samples: 1000,
        }
    }
}

/// Measurement storage: frame counter, per-operation metrics and the profiler.
pub mod data;

/// Table formatting for [`summary`].
pub mod format;

/// Timers, convenience functions and the summary report.
pub mod utils;


pub use data::{FrameRateCounter, PerformanceMetrics, Profiler};
pub use utils::*;
