use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngagementConfig;

/// Rolling study-minute window, oldest day first, today last.
pub const WEEK_DAYS: usize = 7;

pub const FIRST_LEVEL: u32 = 1;

/// Learner-wide aggregate: streaks, study time and story completion.
///
/// One writer at a time per learner; the engine does no locking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProgress {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_study_at: Option<DateTime<Utc>>,
    pub streak_freeze_used: bool,
    pub streak_freeze_at: Option<DateTime<Utc>>,
    pub today_study_minutes: u32,
    pub weekly_study_minutes: [u32; WEEK_DAYS],
    pub daily_goal_minutes: u32,
    #[serde(default)]
    pub total_study_minutes: u64,
    pub completed_story_ids: HashSet<String>,
    /// Completion events per story level.
    pub level_completions: BTreeMap<u32, u32>,
    pub max_unlocked_level: u32,
}

impl Default for LearnerProgress {
    fn default() -> Self {
        Self::new(EngagementConfig::default().default_daily_goal_minutes)
    }
}

impl LearnerProgress {
    pub fn new(daily_goal_minutes: u32) -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_study_at: None,
            streak_freeze_used: false,
            streak_freeze_at: None,
            today_study_minutes: 0,
            weekly_study_minutes: [0; WEEK_DAYS],
            daily_goal_minutes,
            total_study_minutes: 0,
            completed_story_ids: HashSet::new(),
            level_completions: BTreeMap::new(),
            max_unlocked_level: FIRST_LEVEL,
        }
    }

    pub fn from_config(config: &EngagementConfig) -> Self {
        Self::new(config.default_daily_goal_minutes)
    }

    /// A zero goal is ignored.
    pub fn set_daily_goal(&mut self, minutes: u32) {
        if minutes > 0 {
            self.daily_goal_minutes = minutes;
        }
    }

    /// clamp(today / goal, 0, 1); a zero goal counts as met.
    pub fn daily_goal_progress(&self) -> f64 {
        if self.daily_goal_minutes == 0 {
            return 1.0;
        }
        (f64::from(self.today_study_minutes) / f64::from(self.daily_goal_minutes)).clamp(0.0, 1.0)
    }

    pub fn is_daily_goal_met(&self) -> bool {
        self.daily_goal_progress() >= 1.0
    }

    pub fn weekly_total_minutes(&self) -> u32 {
        self.weekly_study_minutes
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(*m))
    }

    pub fn weekly_average_minutes(&self) -> f64 {
        f64::from(self.weekly_total_minutes()) / WEEK_DAYS as f64
    }

    pub fn stories_completed(&self) -> usize {
        self.completed_story_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let progress = LearnerProgress::default();
        assert_eq!(progress.weekly_study_minutes.len(), WEEK_DAYS);
        assert_eq!(progress.max_unlocked_level, 1);
        assert_eq!(progress.daily_goal_minutes, 10);
        assert_eq!(progress.current_streak, 0);
    }

    #[test]
    fn test_daily_goal_progress_clamps() {
        let mut progress = LearnerProgress::new(20);
        progress.today_study_minutes = 5;
        assert!((progress.daily_goal_progress() - 0.25).abs() < 1e-9);
        progress.today_study_minutes = 45;
        assert!((progress.daily_goal_progress() - 1.0).abs() < 1e-9);
        assert!(progress.is_daily_goal_met());
    }

    #[test]
    fn test_zero_goal_is_ignored() {
        let mut progress = LearnerProgress::new(15);
        progress.set_daily_goal(0);
        assert_eq!(progress.daily_goal_minutes, 15);
        progress.set_daily_goal(30);
        assert_eq!(progress.daily_goal_minutes, 30);
    }

    #[test]
    fn test_weekly_totals() {
        let mut progress = LearnerProgress::default();
        progress.weekly_study_minutes = [10, 0, 20, 5, 0, 0, 35];
        assert_eq!(progress.weekly_total_minutes(), 70);
        assert!((progress.weekly_average_minutes() - 10.0).abs() < 1e-9);
    }
}
