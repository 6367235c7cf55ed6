use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoring {
    /// Answers strictly faster than this earn `fast_points`.
    pub fast_answer_seconds: f64,
    pub fast_points: i32,
    pub slow_points: i32,
    pub wrong_points: i32,
    /// Cumulative score at which a word counts as mastered.
    pub mastery_score: i32,
}

impl Default for QuizScoring {
    fn default() -> Self {
        Self {
            fast_answer_seconds: 3.0,
            fast_points: 15,
            slow_points: 10,
            wrong_points: -5,
            mastery_score: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementConfig {
    pub default_daily_goal_minutes: u32,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            default_daily_goal_minutes: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressConfig {
    pub quiz: QuizScoring,
    pub engagement: EngagementConfig,
    pub log_level: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            quiz: QuizScoring::default(),
            engagement: EngagementConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ProgressConfig {
    /// Applies a `.env` file from the working directory when present, then reads and
    /// validates the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Raw environment read; values are not validated.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let quiz = QuizScoring {
            fast_answer_seconds: env_or(
                "PROGRESS_FAST_ANSWER_SECONDS",
                defaults.quiz.fast_answer_seconds,
            ),
            fast_points: env_or("PROGRESS_FAST_POINTS", defaults.quiz.fast_points),
            slow_points: env_or("PROGRESS_SLOW_POINTS", defaults.quiz.slow_points),
            wrong_points: env_or("PROGRESS_WRONG_POINTS", defaults.quiz.wrong_points),
            mastery_score: env_or("PROGRESS_MASTERY_SCORE", defaults.quiz.mastery_score),
        };

        let engagement = EngagementConfig {
            default_daily_goal_minutes: env_or(
                "PROGRESS_DAILY_GOAL_MINUTES",
                defaults.engagement.default_daily_goal_minutes,
            ),
        };

        let log_level = std::env::var("RUST_LOG").unwrap_or(defaults.log_level);

        Self {
            quiz,
            engagement,
            log_level,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.quiz.fast_answer_seconds.is_finite() || self.quiz.fast_answer_seconds <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "fastAnswerSeconds must be a positive number, got {}",
                self.quiz.fast_answer_seconds
            )));
        }
        if self.quiz.mastery_score <= 0 {
            return Err(ConfigError::Validation(format!(
                "masteryScore must be positive, got {}",
                self.quiz.mastery_score
            )));
        }
        if self.engagement.default_daily_goal_minutes == 0 {
            return Err(ConfigError::Validation(
                "defaultDailyGoalMinutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}
