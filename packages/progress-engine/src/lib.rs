//! Learner progress and mastery engine.
//!
//! Pure domain logic for a story-based vocabulary reader:
//!
//! - [`srs`] - SM-2 scheduling of flashcard reviews
//! - [`quiz`] - scored multiple-choice sessions and per-word quiz mastery
//! - [`engagement`] - study minutes, daily goal, streaks with a one-day freeze
//! - [`achievements`] - catalog-driven milestones that unlock once and stay unlocked
//! - [`level_gate`] - story level unlocking
//!
//! Every operation takes the current instant as a parameter and works on
//! values the caller owns, so persistence and clocks stay outside the crate.

pub mod achievements;
pub mod calendar;
pub mod config;
pub mod engagement;
pub mod error;
pub mod level_gate;
pub mod logging;
pub mod progress;
pub mod quiz;
pub mod srs;

pub use achievements::{
    Achievement, AchievementCategory, AchievementDefinition, AchievementEngine, AchievementRarity,
    ProgressCounters,
};
pub use calendar::StudyCalendar;
pub use config::{EngagementConfig, ProgressConfig, QuizScoring};
pub use engagement::{StreakChange, StreakStatus};
pub use error::{CatalogError, ConfigError, QualityError};
pub use progress::LearnerProgress;
pub use quiz::{QuizQuestion, QuizSession, QuizState, WordMastery, WordMasteryBook};
pub use srs::{MasteryLevel, ResponseQuality, WordReviewState};
