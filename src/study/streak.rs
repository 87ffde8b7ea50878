//! Streak engine: consecutive calendar days with at least one goal
//! completion, ending today.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Record a goal completion for the given day. Idempotent; callers invoke
/// this only when a goal actually transitioned to completed.
pub fn record_completion(days: &mut BTreeSet<NaiveDate>, today: NaiveDate) {
    days.insert(today);
}

/// Current consecutive-day streak ending today.
///
/// Walks backward one calendar day at a time (proper date arithmetic, so
/// month and year boundaries are handled) and counts days present in the
/// set. Today itself must be present for a non-zero streak: an unbroken
/// chain ending yesterday counts as 0.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let days: BTreeSet<NaiveDate> =
            [date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1)].into();
        assert_eq!(current_streak(&days, date(2024, 2, 1)), 3);
    }

    #[test]
    fn streak_is_zero_when_today_has_no_completion() {
        let days: BTreeSet<NaiveDate> =
            [date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1)].into();
        assert_eq!(current_streak(&days, date(2024, 2, 2)), 0);
    }

    #[test]
    fn streak_crosses_year_boundary() {
        let days: BTreeSet<NaiveDate> =
            [date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1)].into();
        assert_eq!(current_streak(&days, date(2024, 1, 1)), 3);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let days: BTreeSet<NaiveDate> =
            [date(2024, 3, 1), date(2024, 3, 3), date(2024, 3, 4)].into();
        assert_eq!(current_streak(&days, date(2024, 3, 4)), 2);
    }

    #[test]
    fn recording_is_idempotent() {
        let mut days = BTreeSet::new();
        record_completion(&mut days, date(2024, 3, 4));
        record_completion(&mut days, date(2024, 3, 4));
        assert_eq!(days.len(), 1);
        assert_eq!(current_streak(&days, date(2024, 3, 4)), 1);
    }
}
