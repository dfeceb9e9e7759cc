//! Completion estimates for the day's remaining focus blocks.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Scheme;

/// Project when `remaining_focus_blocks` blocks started at `start` will be
/// done, counting the breaks taken between them.
///
/// A long break is only inserted between completed cadences, never after the
/// final block. `remaining_focus_blocks <= 0` returns `start`. A projection
/// past the last instant chrono can represent saturates to that instant.
pub fn estimate_completion<Tz: TimeZone>(
    start: DateTime<Tz>,
    remaining_focus_blocks: i64,
    scheme: &Scheme,
) -> DateTime<Tz> {
    let tz = start.timezone();
    try_estimate_completion(start, remaining_focus_blocks, scheme)
        .unwrap_or_else(|| DateTime::<Utc>::MAX_UTC.with_timezone(&tz))
}

/// Like [`estimate_completion`], but `None` when the projection falls outside
/// the representable date range.
pub fn try_estimate_completion<Tz: TimeZone>(
    start: DateTime<Tz>,
    remaining_focus_blocks: i64,
    scheme: &Scheme,
) -> Option<DateTime<Tz>> {
    if remaining_focus_blocks <= 0 {
        return Some(start);
    }
    let minutes = total_minutes(remaining_focus_blocks, scheme);
    start.checked_add_signed(Duration::try_minutes(minutes)?)
}

/// Minutes of work plus breaks for `blocks` focus blocks, saturating at
/// `i64::MAX`.
pub fn total_minutes(blocks: i64, scheme: &Scheme) -> i64 {
    if blocks <= 0 {
        return 0;
    }
    let long_breaks = (blocks - 1)
        .checked_div(i64::from(scheme.cadence))
        .unwrap_or(0)
        .max(0);
    let short_breaks = blocks - long_breaks;
    blocks
        .saturating_mul(i64::from(scheme.work_minutes))
        .saturating_add(short_breaks.saturating_mul(i64::from(scheme.short_break_minutes)))
        .saturating_add(long_breaks.saturating_mul(i64::from(scheme.long_break_minutes)))
}

/// Progress toward the daily target, as shown next to the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayProgress {
    pub completed: u32,
    pub target: u32,
    pub remaining_blocks: i64,
    /// 0.0 .. 100.0, capped.
    pub progress_pct: f64,
    pub planned_focus_minutes: u64,
    /// `None` once the target is met.
    pub eta: Option<DateTime<Utc>>,
}

impl DayProgress {
    pub fn compute(completed: u32, target: u32, scheme: &Scheme, now: DateTime<Utc>) -> Self {
        let remaining_blocks = i64::from(target) - i64::from(completed);
        let progress_pct = if target == 0 {
            0.0
        } else {
            (f64::from(completed) / f64::from(target) * 100.0).min(100.0)
        };
        let eta = (remaining_blocks > 0).then(|| estimate_completion(now, remaining_blocks, scheme));
        Self {
            completed,
            target,
            remaining_blocks,
            progress_pct,
            planned_focus_minutes: u64::from(target) * u64::from(scheme.work_minutes),
            eta,
        }
    }

    pub fn target_met(&self) -> bool {
        self.remaining_blocks <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn two_blocks_with_defaults_finish_at_ten() {
        let scheme = Scheme::new(25, 5, 15, 4);
        let eta = estimate_completion(nine_am(), 2, &scheme);
        assert_eq!(eta.hour(), 10);
        assert_eq!(eta.minute(), 0);
    }

    #[test]
    fn zero_or_negative_remaining_returns_start() {
        let scheme = Scheme::default();
        assert_eq!(estimate_completion(nine_am(), 0, &scheme), nine_am());
        assert_eq!(estimate_completion(nine_am(), -3, &scheme), nine_am());
    }

    #[test]
    fn long_break_only_between_cadences() {
        let scheme = Scheme::new(25, 5, 15, 4);
        // 4 blocks: no long break after the last one.
        assert_eq!(total_minutes(4, &scheme), 4 * 25 + 4 * 5);
        // 5 blocks: one long break replaces a short one.
        assert_eq!(total_minutes(5, &scheme), 5 * 25 + 4 * 5 + 15);
        assert_eq!(total_minutes(9, &scheme), 9 * 25 + 7 * 5 + 2 * 15);
    }

    #[test]
    fn zero_cadence_counts_no_long_breaks() {
        let scheme = Scheme::new(25, 5, 15, 0);
        assert_eq!(total_minutes(3, &scheme), 3 * 25 + 3 * 5);
    }

    #[test]
    fn huge_block_counts_saturate_instead_of_panicking() {
        let scheme = Scheme::default();
        assert_eq!(total_minutes(i64::MAX, &scheme), i64::MAX);

        for blocks in [10_000_000_000, i64::MAX] {
            assert_eq!(try_estimate_completion(nine_am(), blocks, &scheme), None);
            assert_eq!(
                estimate_completion(nine_am(), blocks, &scheme),
                DateTime::<Utc>::MAX_UTC
            );
        }
    }

    #[test]
    fn saturation_keeps_the_callers_time_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let eta = estimate_completion(start, i64::MAX, &Scheme::default());
        assert_eq!(eta.offset(), &tz);
        assert_eq!(eta, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn keeps_the_callers_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let start = tz.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let eta = estimate_completion(start, 1, &Scheme::default());
        assert_eq!(eta.hour(), 9);
        assert_eq!(eta.minute(), 30);
        assert_eq!(eta.offset(), &tz);
    }

    #[test]
    fn day_progress_reports_eta_until_target_met() {
        let scheme = Scheme::default();
        let p = DayProgress::compute(6, 8, &scheme, nine_am());
        assert_eq!(p.remaining_blocks, 2);
        assert_eq!(p.progress_pct, 75.0);
        assert_eq!(p.planned_focus_minutes, 200);
        assert_eq!(p.eta, Some(nine_am() + Duration::minutes(60)));
        assert!(!p.target_met());

        let done = DayProgress::compute(9, 8, &scheme, nine_am());
        assert!(done.target_met());
        assert_eq!(done.eta, None);
        assert_eq!(done.progress_pct, 100.0);
    }
}
