//! Timed visibility as plain data.
//!
//! An image with delays does not spawn anything itself. It produces a
//! `VisibilitySchedule` which the host hands to its timer (see
//! [`crate::timer::TimerService`]) and applies as changes come due.

use std::time::Duration;

use crate::consts::MILLIS_PER_SECOND;

/// Set visibility to `visible` once `at` has elapsed since submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    pub at: Duration,
    pub visible: bool,
}

/// Ordered visibility changes, offsets relative to the moment the schedule
/// is submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilitySchedule {
    changes: Vec<VisibilityChange>,
}

impl VisibilitySchedule {
    /// Build the show/hide timeline for a pair of delays in seconds.
    ///
    /// Returns `None` without a show delay: such an image is visible from the
    /// start and nothing needs scheduling. The hide delay counts from the
    /// moment the image is shown, not from submission.
    pub fn from_delays(delay_show: Option<f64>, delay_hide: Option<f64>) -> Option<Self> {
        let show_at = seconds_to_duration(delay_show?);
        let mut changes = vec![VisibilityChange {
            at: show_at,
            visible: true,
        }];
        if let Some(hide) = delay_hide {
            changes.push(VisibilityChange {
                at: show_at + seconds_to_duration(hide),
                visible: false,
            });
        }
        Some(Self { changes })
    }

    pub fn changes(&self) -> &[VisibilityChange] {
        &self.changes
    }

    /// Visibility dictated by the schedule once `elapsed` has passed, or
    /// `None` if no change is due yet.
    pub fn state_at(&self, elapsed: Duration) -> Option<bool> {
        self.changes
            .iter()
            .take_while(|c| c.at <= elapsed)
            .last()
            .map(|c| c.visible)
    }

    /// Offset of the last change.
    pub fn total_duration(&self) -> Duration {
        self.changes.last().map_or(Duration::ZERO, |c| c.at)
    }
}

/// Convert fractional seconds to a whole-millisecond duration.
///
/// Sub-millisecond remainders are truncated. Negative, NaN and infinite
/// inputs become zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_millis((seconds * MILLIS_PER_SECOND) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_show_delay_means_no_schedule() {
        assert!(VisibilitySchedule::from_delays(None, None).is_none());
        assert!(VisibilitySchedule::from_delays(None, Some(2.0)).is_none());
    }

    #[test]
    fn hide_counts_from_show() {
        let s = VisibilitySchedule::from_delays(Some(1.5), Some(2.0)).unwrap();
        assert_eq!(
            s.changes(),
            &[
                VisibilityChange {
                    at: Duration::from_millis(1500),
                    visible: true
                },
                VisibilityChange {
                    at: Duration::from_millis(3500),
                    visible: false
                },
            ]
        );
        assert_eq!(s.total_duration(), Duration::from_millis(3500));
    }

    #[test]
    fn millisecond_truncation() {
        assert_eq!(seconds_to_duration(0.0019), Duration::from_millis(1));
        assert_eq!(seconds_to_duration(-3.0), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(seconds_to_duration(f64::INFINITY), Duration::ZERO);
    }
}
