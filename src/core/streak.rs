use crate::domain::model::{ContributionCalendar, StreakStats};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Returns `(current, longest)` for the active dates in `days`.
///
/// The current streak is the run of consecutive active dates ending exactly on
/// `today`; a gap on `today` resets it to zero. Dates after `today` are ignored
/// for the current streak but still count toward the longest one.
pub fn calculate_streaks(days: &BTreeMap<NaiveDate, u32>, today: NaiveDate) -> (u32, u32) {
    let active = days.iter().filter(|(_, count)| **count > 0).map(|(date, _)| *date);

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in active {
        run = match prev {
            Some(p) if p.checked_add_days(Days::new(1)) == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    let mut current = 0u32;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        match days.get(&day) {
            Some(count) if *count > 0 => {
                current += 1;
                cursor = day.pred_opt();
            }
            _ => break,
        }
    }

    (current, longest)
}

pub fn streak_stats(calendar: &ContributionCalendar) -> StreakStats {
    let (current_streak, longest_streak) = calculate_streaks(&calendar.days, calendar.today());

    StreakStats {
        current_streak,
        longest_streak,
        total_contributions: calendar.total_contributions,
        active_days: calendar.active_days(),
    }
}
