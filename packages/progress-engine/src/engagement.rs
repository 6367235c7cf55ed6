//! Daily study minutes, streak continuity and the weekly window.
//!
//! A streak survives exactly one missed day per freeze cycle: a session two
//! calendar days after the previous one consumes the freeze and keeps the
//! streak as it was. The freeze comes back only through the daily rollover.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{calendar_day_difference, StudyCalendar};
use crate::progress::{LearnerProgress, WEEK_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakChange {
    /// First session ever.
    Started,
    /// Another session on the same day.
    Unchanged,
    Extended,
    FreezeConsumed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakStatus {
    Inactive,
    StudiedToday,
    /// A session today keeps the streak alive.
    AtRisk,
    /// The next session starts over at 1.
    Broken,
}

pub fn record_study_session<C: StudyCalendar + ?Sized>(
    progress: &mut LearnerProgress,
    minutes: u32,
    now: DateTime<Utc>,
    calendar: &C,
) -> StreakChange {
    progress.today_study_minutes = progress.today_study_minutes.saturating_add(minutes);
    progress.weekly_study_minutes[WEEK_DAYS - 1] = progress.today_study_minutes;
    progress.total_study_minutes = progress.total_study_minutes.saturating_add(u64::from(minutes));

    let change = match progress.last_study_at {
        Some(last) => {
            let diff_days = calendar_day_difference(calendar, last, now);
            match diff_days {
                0 => StreakChange::Unchanged,
                1 => {
                    progress.current_streak = progress.current_streak.saturating_add(1);
                    progress.longest_streak = progress.longest_streak.max(progress.current_streak);
                    StreakChange::Extended
                }
                2 if !progress.streak_freeze_used => {
                    progress.streak_freeze_used = true;
                    progress.streak_freeze_at = Some(last);
                    tracing::info!(
                        streak = progress.current_streak,
                        "streak freeze consumed for missed day"
                    );
                    StreakChange::FreezeConsumed
                }
                _ => {
                    progress.current_streak = 1;
                    progress.longest_streak = progress.longest_streak.max(1);
                    StreakChange::Reset
                }
            }
        }
        None => {
            progress.current_streak = 1;
            progress.longest_streak = progress.longest_streak.max(1);
            StreakChange::Started
        }
    };

    progress.last_study_at = Some(now);

    tracing::debug!(
        minutes,
        today = progress.today_study_minutes,
        streak = progress.current_streak,
        change = ?change,
        "study session recorded"
    );
    change
}

/// Daily rollover. The caller invokes it once per new calendar day.
pub fn reset_daily_stats(progress: &mut LearnerProgress) {
    progress.weekly_study_minutes.rotate_left(1);
    progress.weekly_study_minutes[WEEK_DAYS - 1] = 0;
    progress.today_study_minutes = 0;
    progress.streak_freeze_used = false;
    progress.streak_freeze_at = None;
}

pub fn daily_goal_progress(progress: &LearnerProgress) -> f64 {
    progress.daily_goal_progress()
}

pub fn streak_status<C: StudyCalendar + ?Sized>(
    progress: &LearnerProgress,
    now: DateTime<Utc>,
    calendar: &C,
) -> StreakStatus {
    let Some(last) = progress.last_study_at else {
        return StreakStatus::Inactive;
    };
    if progress.current_streak == 0 {
        return StreakStatus::Inactive;
    }
    match calendar_day_difference(calendar, last, now) {
        d if d <= 0 => StreakStatus::StudiedToday,
        1 => StreakStatus::AtRisk,
        2 if !progress.streak_freeze_used => StreakStatus::AtRisk,
        _ => StreakStatus::Broken,
    }
}
