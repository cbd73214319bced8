//! Benchmark utility functions and helper types
//!
//! This module provides convenience functions, timers, and the summary report.
//!
//! # Key Features
//! - **Manual Timers**: `Timer` for explicit start/stop timing
//! - **Scoped Timers**: `ScopedTimer` for automatic timing based on scope
//! - **Convenience Functions**: `time`, `record_frame`, `get_measurements`
//! - **Report**: `summary` renders every measurement, `log_summary` sends it to the log
//! - **Macros**: `benchmark!` for easy code instrumentation

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::BenchmarkConfig;
use super::data::{PerformanceMetrics, Profiler, benchmark_data};
use super::format::format_table;

/// A timer for measuring execution time of code sections
///
/// The timer starts when created and records its measurement when stopped.
pub struct Timer {
    name: String,
    start_time: Instant,
    config: BenchmarkConfig,
}

impl Timer {
    /// Creates a new timer with the given name
    ///
    /// # Arguments
    /// * `name` - The name of the operation to be timed
    /// * `config` - Configuration for the timer behavior
    pub fn new(name: &str, config: BenchmarkConfig) -> Self {
        Self {
            name: name.to_string(),
            start_time: Instant::now(),
            config,
        }
    }

    /// Stops the timer and records the measurement
    ///
    /// Returns the duration that elapsed since the timer was created.
    /// If the duration meets the minimum threshold, it will be recorded
    /// in the global benchmark data.
    pub fn stop(self) -> Duration {
        let duration = self.start_time.elapsed();

        if self.config.enabled && duration >= self.config.min_duration_threshold {
            benchmark_data().record_measurement(&self.name, duration);
            if self.config.log_results {
                log::debug!("[BENCHMARK] {}: {:?}", self.name, duration);
            }
        }

        duration
    }
}

/// A scoped timer that automatically stops when dropped
pub struct ScopedTimer {
    timer: Option<Timer>,
}

impl ScopedTimer {
    /// Creates a new scoped timer
    pub fn new(name: &str, config: BenchmarkConfig) -> Self {
        Self {
            timer: Some(Timer::new(name, config)),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}

/// Times a closure execution with default configuration
///
/// # Arguments
/// * `name` - The name of the operation being timed
/// * `f` - The closure to execute and time
///
/// # Returns
/// The result of the closure execution
pub fn time<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut profiler = Profiler::new(BenchmarkConfig::default());
    profiler.time_closure(name, f)
}

/// Renders every recorded measurement as a report headed by the local time.
///
/// Operations are sorted by total time, most expensive first.
pub fn summary() -> String {
    let now: DateTime<Local> = Local::now();
    let measurements = get_measurements();
    let mut report = vec![format!(
        "=== PERFORMANCE SUMMARY ({}) ===",
        now.format("%Y-%m-%d %H:%M:%S")
    )];

    let (min_fps, avg_fps, max_fps) = get_fps_stats();
    if avg_fps > 0.0 {
        report.push(format!(
            "FPS Statistics - Min: {:.1}, Average: {:.1}, Max: {:.1}",
            min_fps, avg_fps, max_fps
        ));
    } else {
        report.push("FPS Statistics - No frame data recorded".to_string());
    }

    if measurements.is_empty() {
        report.push("No measurements recorded".to_string());
        return report.join("\n");
    }

    let mut benchmarks: Vec<_> = measurements.iter().collect();
    benchmarks.sort_by(|a, b| {
        b.1.total_duration
            .cmp(&a.1.total_duration)
            .then_with(|| a.0.cmp(b.0))
    });

    let total: f64 = benchmarks
        .iter()
        .map(|(_, m)| m.total_duration.as_secs_f64())
        .sum();

    report.push(String::new());
    report.push(format_table(&benchmarks));
    report.push(String::new());
    report.push(format!("Total measured time: {:.3}s", total));
    report.join("\n")
}

/// Writes [`summary`] to the log at info level, one line per log record.
pub fn log_summary() {
    for line in summary().lines() {
        log::info!("{}", line);
    }
}

/// Clears all recorded measurements and frame samples
pub fn clear_measurements() {
    benchmark_data().clear();
}

/// Returns a copy of all recorded measurements
pub fn get_measurements() -> HashMap<String, PerformanceMetrics> {
    benchmark_data().get_measurements()
}

/// Metrics of one operation, if it was ever measured.
pub fn get_metrics(name: &str) -> Option<PerformanceMetrics> {
    get_measurements().remove(name)
}

/// Records a frame for FPS tracking. Call once per frame.
///
/// # Returns
/// The current average FPS
pub fn record_frame() -> f64 {
    benchmark_data().record_frame()
}

/// Gets FPS statistics as (min, average, max)
pub fn get_fps_stats() -> (f64, f64, f64) {
    benchmark_data().get_fps_stats()
}

/// Macro for easy timing of code blocks
///
/// Creates a scoped timer that records timing when the block exits.
///
/// # Example
/// ```
/// let sum = cubemaze::benchmark!("sum_operation", { (1..=10).sum::<u32>() });
/// assert_eq!(sum, 55);
/// ```
#[macro_export]
macro_rules! benchmark {
    ($name:expr, $block:expr) => {{
        let _timer =
            $crate::benchmarks::ScopedTimer::new($name, $crate::benchmarks::BenchmarkConfig::default());
        $block
    }};
}
