//! Progress telemetry for a single file transfer.
//!
//! Fed cumulative `(loaded, total)` byte counts plus a timestamp on every
//! progress event, [`TransferStats`] maintains the displayed percentage, a
//! smoothed throughput and an estimated time remaining. All inputs are plain
//! numbers so the arithmetic is testable without a browser clock.

/// Throughput is resampled at most every 500 ms (plus once on completion) to
/// keep the displayed speed from flickering.
pub const SAMPLE_INTERVAL_MS: f64 = 500.0;

/// Minimum time the uploading view stays on screen, measured from the start
/// of the first file's transfer.
pub const MIN_UPLOAD_SCREEN_MS: f64 = 800.0;

/// Weight of the newest throughput sample in the moving average.
const EMA_SAMPLE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct TransferStats {
    last_sample_ms: f64,
    last_loaded: f64,
    percent: u32,
    speed_bps: f64,
    eta_seconds: f64,
}

impl TransferStats {
    /// Fresh counters for one transfer, started at `now_ms`.
    pub fn start(now_ms: f64) -> Self {
        Self {
            last_sample_ms: now_ms,
            last_loaded: 0.0,
            percent: 0,
            speed_bps: 0.0,
            eta_seconds: 0.0,
        }
    }

    /// Records one progress event.
    ///
    /// The percentage (`floor(100 * loaded / total)`) updates on every event.
    /// Throughput and ETA update only when the sampling interval has elapsed
    /// or the transfer just completed: the instantaneous rate over the window
    /// is blended into an exponential moving average (the first sample seeds
    /// it directly) and ETA is remaining bytes over the smoothed rate, zero
    /// while the rate is zero. An event without a total (unknown content
    /// length) updates nothing.
    pub fn record(&mut self, loaded: f64, total: Option<f64>, now_ms: f64) {
        let Some(total) = total else {
            return;
        };
        if total <= 0.0 {
            return;
        }

        self.percent = ((loaded / total) * 100.0).floor() as u32;

        let completed = loaded >= total;
        if now_ms - self.last_sample_ms < SAMPLE_INTERVAL_MS && !completed {
            return;
        }

        let elapsed_s = (now_ms - self.last_sample_ms) / 1000.0;
        if elapsed_s > 0.0 {
            let instant = (loaded - self.last_loaded) / elapsed_s;
            self.speed_bps = if self.speed_bps == 0.0 {
                instant
            } else {
                self.speed_bps * (1.0 - EMA_SAMPLE_WEIGHT) + instant * EMA_SAMPLE_WEIGHT
            };
        }
        self.eta_seconds = if self.speed_bps > 0.0 {
            (total - loaded) / self.speed_bps
        } else {
            0.0
        };
        self.last_loaded = loaded;
        self.last_sample_ms = now_ms;
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn speed_mb_per_s(&self) -> f64 {
        self.speed_bps / (1024.0 * 1024.0)
    }

    pub fn eta_seconds(&self) -> f64 {
        self.eta_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn first_sample_seeds_the_average() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, Some(10_240.0), 1_000.0);
        assert_close(stats.speed_bps, 1024.0);
        assert_eq!(stats.percent(), 10);
    }

    #[test]
    fn later_samples_blend_with_weight_point_three() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, Some(10_240.0), 1_000.0);
        // 2048 more bytes over the next second: instantaneous rate 2048 B/s.
        stats.record(3072.0, Some(10_240.0), 2_000.0);
        assert_close(stats.speed_bps, 1024.0 * 0.7 + 2048.0 * 0.3);
    }

    #[test]
    fn eta_uses_the_smoothed_rate() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, Some(10_240.0), 1_000.0);
        assert_close(stats.eta_seconds(), (10_240.0 - 1024.0) / 1024.0);
    }

    #[test]
    fn percentage_updates_inside_the_sampling_window() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, Some(10_240.0), 1_000.0);
        let speed_before = stats.speed_bps;
        // 200 ms later: below the sampling interval, percent still moves.
        stats.record(5_120.0, Some(10_240.0), 1_200.0);
        assert_eq!(stats.percent(), 50);
        assert_close(stats.speed_bps, speed_before);
    }

    #[test]
    fn completion_forces_a_final_sample() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, Some(10_240.0), 1_000.0);
        stats.record(10_240.0, Some(10_240.0), 1_100.0);
        assert_eq!(stats.percent(), 100);
        assert_close(stats.eta_seconds(), 0.0);
        // 9216 bytes over 100 ms blended into the prior 1024 B/s.
        assert_close(stats.speed_bps, 1024.0 * 0.7 + 92_160.0 * 0.3);
    }

    #[test]
    fn missing_total_suppresses_everything() {
        let mut stats = TransferStats::start(0.0);
        stats.record(1024.0, None, 1_000.0);
        assert_eq!(stats.percent(), 0);
        assert_close(stats.speed_bps, 0.0);
        assert_close(stats.eta_seconds(), 0.0);
    }

    #[test]
    fn percentage_floors() {
        let mut stats = TransferStats::start(0.0);
        stats.record(999.0, Some(1_000.0), 10.0);
        assert_eq!(stats.percent(), 99);
    }
}
