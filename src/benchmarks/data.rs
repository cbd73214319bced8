use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::BenchmarkConfig;

/// Frame rate counter for monitoring the frame loop
#[derive(Debug)]
pub struct FrameRateCounter {
    /// Duration of each recorded frame, oldest first
    pub frame_times: VecDeque<Duration>,
    /// Maximum number of frame time samples to keep in memory
    max_samples: usize,
    /// Timestamp of the last recorded frame
    last_frame_time: Option<Instant>,
}

impl FrameRateCounter {
    /// Creates a new frame rate counter
    pub fn new(max_samples: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            last_frame_time: None,
        }
    }

    /// Records a frame and returns the current FPS
    pub fn record_frame(&mut self) -> f64 {
        let now = Instant::now();
        if let Some(last_time) = self.last_frame_time {
            self.push(now.duration_since(last_time));
        }
        self.last_frame_time = Some(now);
        self.get_fps()
    }

    /// Adds a frame of known length, dropping the oldest sample when full.
    pub fn push(&mut self, frame_time: Duration) {
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
    }

    /// Gets the current average FPS
    pub fn get_fps(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total_time / self.frame_times.len() as u32;

        if avg_frame_time.as_secs_f64() > 0.0 {
            1.0 / avg_frame_time.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Gets the minimum frame time (best performance)
    pub fn get_min_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .min()
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Gets the maximum frame time (worst performance)
    pub fn get_max_frame_time(&self) -> Duration {
        self.frame_times
            .iter()
            .max()
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Performance profiler for named sections
pub struct Profiler {
    active_timers: HashMap<String, Instant>,
    config: BenchmarkConfig,
}

impl Profiler {
    /// Creates a new profiler
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            active_timers: HashMap::new(),
            config,
        }
    }

    /// Starts timing a section
    pub fn start_section(&mut self, name: &str) {
        if self.config.enabled {
            self.active_timers.insert(name.to_string(), Instant::now());
        }
    }

    /// Ends timing a section. Ending a section that was never started does nothing.
    pub fn end_section(&mut self, name: &str) {
        if !self.config.enabled {
            return;
        }
        if let Some(start_time) = self.active_timers.remove(name) {
            let duration = start_time.elapsed();
            if duration >= self.config.min_duration_threshold {
                benchmark_data().record_measurement(name, duration);
                if self.config.log_results {
                    log::debug!("[PROFILER] {}: {:?}", name, duration);
                }
            }
        }
    }

    /// Times a closure execution
    pub fn time_closure<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.config.enabled {
            self.start_section(name);
            let result = f();
            self.end_section(name);
            result
        } else {
            f()
        }
    }
}

/// Performance metrics for a specific operation
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Number of times this operation was measured
    pub count: usize,
    /// Total duration of all measurements combined
    pub total_duration: Duration,
    /// Shortest duration recorded for this operation
    pub min_duration: Duration,
    /// Longest duration recorded for this operation
    pub max_duration: Duration,
    /// Average duration across all measurements
    pub avg_duration: Duration,
}

impl PerformanceMetrics {
    pub(crate) fn new() -> Self {
        Self {
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            avg_duration: Duration::ZERO,
        }
    }

    pub(crate) fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.avg_duration = self.total_duration / self.count as u32;
    }
}

lazy_static::lazy_static! {
    /// Centralized benchmark data storage
    pub static ref BENCHMARK_DATA: Arc<Mutex<BenchmarkData>> = Arc::new(Mutex::new(BenchmarkData::new()));
}

/// Locks [`BENCHMARK_DATA`]. A panic while holding the lock leaves plain counters
/// behind, so a poisoned lock is still usable.
pub(crate) fn benchmark_data() -> MutexGuard<'static, BenchmarkData> {
    BENCHMARK_DATA.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Central storage for all benchmark measurements
pub struct BenchmarkData {
    measurements: HashMap<String, PerformanceMetrics>,
    config: BenchmarkConfig,
    fps_counter: FrameRateCounter,
}

impl BenchmarkData {
    fn new() -> Self {
        Self {
            measurements: HashMap::new(),
            config: BenchmarkConfig::default(),
            fps_counter: FrameRateCounter::new(1000),
        }
    }

    /// Records a new measurement for the specified operation
    ///
    /// # Arguments
    /// * `name` - The name of the operation being measured
    /// * `duration` - The duration of the operation
    pub fn record_measurement(&mut self, name: &str, duration: Duration) {
        if !self.measurements.contains_key(name)
            && self.config.max_samples > 0
            && self.measurements.len() >= self.config.max_samples
        {
            log::warn!(
                "Benchmark storage full ({} operations), dropping '{}'",
                self.config.max_samples,
                name
            );
            return;
        }

        self.measurements
            .entry(name.to_string())
            .or_insert_with(PerformanceMetrics::new)
            .update(duration);
    }

    /// Returns a copy of all recorded measurements
    pub fn get_measurements(&self) -> HashMap<String, PerformanceMetrics> {
        self.measurements.clone()
    }

    /// Clears all recorded measurements and frame samples
    pub fn clear(&mut self) {
        self.measurements.clear();
        self.fps_counter = FrameRateCounter::new(self.fps_counter.max_samples);
    }

    /// Records a frame and returns the current FPS
    pub fn record_frame(&mut self) -> f64 {
        self.fps_counter.record_frame()
    }

    /// Returns FPS statistics as (min_fps, avg_fps, max_fps)
    pub fn get_fps_stats(&self) -> (f64, f64, f64) {
        fps_stats(&self.fps_counter)
    }
}

/// (min, average, max) FPS of a counter. The slowest frame gives the minimum.
pub fn fps_stats(counter: &FrameRateCounter) -> (f64, f64, f64) {
    let per_second = |frame: Duration| {
        if frame.as_secs_f64() > 0.0 {
            1.0 / frame.as_secs_f64()
        } else {
            0.0
        }
    };

    let min_fps = per_second(counter.get_max_frame_time());
    let max_fps = per_second(counter.get_min_frame_time());
    (min_fps, counter.get_fps(), max_fps)
}
