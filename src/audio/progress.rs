use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared elapsed/total position of the current preview, written by the
/// playback monitor and read by the progress gauge on every tick.
#[derive(Default, Debug)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
}

impl TrackProgress {
    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get_progress(&self) -> (u64, u64) {
        (
            self.current_position_millis.load(Ordering::Relaxed),
            self.total_duration_millis.load(Ordering::Relaxed),
        )
    }

    /// Elapsed progress as a whole percentage, clamped to `[0, 100]`.
    /// Returns 0 while the total duration is not yet known, so readback
    /// never divides by zero.
    pub fn percent(&self) -> u8 {
        let (current, total) = self.get_progress();
        if total == 0 {
            return 0;
        }
        ((current * 100) / total).min(100) as u8
    }

    /// Absolute position corresponding to `percent` of the total duration,
    /// the write side of scrubbing.
    pub fn position_for_percent(&self, percent: u8) -> Duration {
        let total = self.total_duration_millis.load(Ordering::Relaxed);
        Duration::from_millis(total * u64::from(percent.min(100)) / 100)
    }

    pub fn reset(&self) {
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_zero_while_duration_unknown() {
        let progress = TrackProgress::default();
        progress.set_current_position(Duration::from_secs(5));
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn percent_is_clamped_to_hundred() {
        let progress = TrackProgress::default();
        progress.set_total_duration(Duration::from_secs(30));
        progress.set_current_position(Duration::from_secs(31));
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn scrub_target_recovers_percent_within_rounding() {
        let progress = TrackProgress::default();
        progress.set_total_duration(Duration::from_secs(30));

        for percent in [0u8, 17, 50, 99, 100] {
            let target = progress.position_for_percent(percent);
            progress.set_current_position(target);
            assert_eq!(progress.percent(), percent);
        }
    }

    #[test]
    fn reset_clears_both_sides() {
        let progress = TrackProgress::default();
        progress.set_total_duration(Duration::from_secs(30));
        progress.set_current_position(Duration::from_secs(10));
        progress.reset();
        assert_eq!(progress.get_progress(), (0, 0));
    }
}
