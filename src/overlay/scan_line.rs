use std::time::Duration;

use crate::settings::ScanLineSettings;

/// Scan-line position over time: linear from `0` to `travel` over `duration`,
/// repeated forever. With `reverse` each odd cycle runs back up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanLineAnimation {
    travel: f32,
    duration: Duration,
    reverse: bool,
}

impl ScanLineAnimation {
    pub fn new(travel: f32, duration: Duration, reverse: bool) -> Self {
        Self {
            travel,
            duration,
            reverse,
        }
    }

    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Vertical offset of the line after `elapsed`.
    pub fn offset_at(&self, elapsed: Duration) -> f32 {
        let cycle_ms = self.duration.as_millis();
        if cycle_ms == 0 {
            return self.travel;
        }

        let elapsed_ms = elapsed.as_millis();
        let cycle = elapsed_ms / cycle_ms;
        let progress = (elapsed_ms % cycle_ms) as f32 / cycle_ms as f32;

        let progress = if self.reverse && cycle % 2 == 1 {
            1.0 - progress
        } else {
            progress
        };
        self.travel * progress
    }

    /// Endless stream of offsets sampled at `fps`.
    pub fn frames(&self, fps: u32) -> ScanLineFrames {
        ScanLineFrames {
            animation: *self,
            step: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            num_frame: 0,
        }
    }
}

impl From<&ScanLineSettings> for ScanLineAnimation {
    fn from(settings: &ScanLineSettings) -> Self {
        Self::new(
            settings.travel,
            Duration::from_millis(settings.duration_ms),
            settings.reverse,
        )
    }
}

pub struct ScanLineFrames {
    animation: ScanLineAnimation,
    step: Duration,
    num_frame: u32,
}

impl Iterator for ScanLineFrames {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.animation.offset_at(self.step * self.num_frame);
        self.num_frame = self.num_frame.wrapping_add(1);
        Some(offset) // never ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> ScanLineAnimation {
        ScanLineAnimation::from(&ScanLineSettings::default())
    }

    #[test]
    fn runs_down_then_back_up() {
        let anim = line();
        assert_eq!(anim.offset_at(Duration::ZERO), 0.0);
        assert_eq!(anim.offset_at(Duration::from_millis(1000)), 135.0);
        assert_eq!(anim.offset_at(Duration::from_millis(2000)), 270.0);
        assert_eq!(anim.offset_at(Duration::from_millis(3000)), 135.0);
        assert_eq!(anim.offset_at(Duration::from_millis(4000)), 0.0);
        assert_eq!(anim.offset_at(Duration::from_millis(4500)), 67.5);
    }

    #[test]
    fn without_reverse_it_restarts_from_the_top() {
        let anim = ScanLineAnimation::new(270.0, Duration::from_secs(2), false);
        assert!((anim.offset_at(Duration::from_millis(1999)) - 269.865).abs() < 1e-3);
        assert_eq!(anim.offset_at(Duration::from_millis(2000)), 0.0);
        assert_eq!(anim.offset_at(Duration::from_millis(3000)), 135.0);
    }

    #[test]
    fn offsets_stay_within_travel() {
        let anim = line();
        assert!(anim
            .frames(60)
            .take(60 * 10)
            .all(|offset| (0.0..=anim.travel()).contains(&offset)));
    }

    #[test]
    fn zero_duration_parks_at_the_bottom() {
        let anim = ScanLineAnimation::new(100.0, Duration::ZERO, true);
        assert_eq!(anim.offset_at(Duration::from_secs(3)), 100.0);
    }

    #[test]
    fn frames_sample_at_the_requested_rate() {
        let mut frames = line().frames(2);
        assert_eq!(frames.next(), Some(0.0));
        assert_eq!(frames.next(), Some(67.5));
        assert_eq!(frames.next(), Some(135.0));
    }
}
