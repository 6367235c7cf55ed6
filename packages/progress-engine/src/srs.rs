//! SM-2 review scheduling for flashcard words.
//!
//! Ease update: EF' = max(1.3, EF + 0.1 - (5-q)(0.08 + (5-q)·0.02))
//!
//! Intervals (days) on success: 1 for the first review, 6 for the second,
//! round(I × EF) afterwards. A failed review drops the interval to 0 and the
//! mastery level back to `Learning`, whatever level the word had reached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QualityError;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

const FIRST_INTERVAL_DAYS: u32 = 1;
const SECOND_INTERVAL_DAYS: u32 = 6;
const PASSING_QUALITY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseQuality {
    Again,
    Hard,
    Good,
    Easy,
}

impl ResponseQuality {
    pub const ALL: [ResponseQuality; 4] = [
        ResponseQuality::Again,
        ResponseQuality::Hard,
        ResponseQuality::Good,
        ResponseQuality::Easy,
    ];

    /// SM-2 grade. The scale has no 1 or 2.
    pub const fn value(self) -> u8 {
        match self {
            ResponseQuality::Again => 0,
            ResponseQuality::Hard => 3,
            ResponseQuality::Good => 4,
            ResponseQuality::Easy => 5,
        }
    }

    pub const fn is_pass(self) -> bool {
        self.value() >= PASSING_QUALITY
    }

    /// Grades a quiz-style answer for the scheduler.
    pub fn from_answer(is_correct: bool, response_time_seconds: f64) -> Self {
        if !is_correct {
            return Self::Again;
        }
        if response_time_seconds < 2.0 {
            Self::Easy
        } else if response_time_seconds < 5.0 {
            Self::Good
        } else {
            Self::Hard
        }
    }
}

impl TryFrom<u8> for ResponseQuality {
    type Error = QualityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Again),
            3 => Ok(Self::Hard),
            4 => Ok(Self::Good),
            5 => Ok(Self::Easy),
            other => Err(QualityError::Unsupported(other)),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum MasteryLevel {
    #[default]
    New,
    Learning,
    Familiar,
    Mastered,
    Known,
}

impl MasteryLevel {
    pub const fn next(self) -> Self {
        match self {
            MasteryLevel::New => MasteryLevel::Learning,
            MasteryLevel::Learning => MasteryLevel::Familiar,
            MasteryLevel::Familiar => MasteryLevel::Mastered,
            MasteryLevel::Mastered => MasteryLevel::Known,
            MasteryLevel::Known => MasteryLevel::Known,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MasteryLevel::New => "new",
            MasteryLevel::Learning => "learning",
            MasteryLevel::Familiar => "familiar",
            MasteryLevel::Mastered => "mastered",
            MasteryLevel::Known => "known",
        }
    }
}

/// Recall schedule of one word. Only [`apply_review`] and [`reset`] produce new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReviewState {
    pub word_id: String,
    pub ease_factor: f64,
    /// Days until the next review.
    pub interval: u32,
    pub review_count: u32,
    pub mastery_level: MasteryLevel,
    pub last_review_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,
}

impl WordReviewState {
    pub fn new(word_id: impl Into<String>) -> Self {
        Self {
            word_id: word_id.into(),
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            review_count: 0,
            mastery_level: MasteryLevel::New,
            last_review_at: None,
            next_review_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.mastery_level == MasteryLevel::New && self.last_review_at.is_none()
    }
}

pub fn apply_review(
    state: &WordReviewState,
    quality: ResponseQuality,
    now: DateTime<Utc>,
) -> WordReviewState {
    let ease_factor = next_ease_factor(state.ease_factor, quality);

    let (interval, mastery_level) = if quality.is_pass() {
        let interval = match state.review_count {
            0 => FIRST_INTERVAL_DAYS,
            1 => SECOND_INTERVAL_DAYS,
            _ => scaled_interval(state.interval, state.ease_factor.max(MIN_EASE_FACTOR)),
        };
        (interval, state.mastery_level.next())
    } else {
        (0, MasteryLevel::Learning)
    };

    tracing::debug!(
        word_id = %state.word_id,
        quality = quality.value(),
        ease_factor,
        interval,
        mastery = mastery_level.as_str(),
        "review applied"
    );

    WordReviewState {
        word_id: state.word_id.clone(),
        ease_factor,
        interval,
        review_count: state.review_count.saturating_add(1),
        mastery_level,
        last_review_at: Some(now),
        next_review_at: Some(
            now.checked_add_signed(Duration::days(i64::from(interval)))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        ),
    }
}

pub fn is_due(state: &WordReviewState, now: DateTime<Utc>) -> bool {
    if state.is_new() {
        return true;
    }
    state.next_review_at.map_or(true, |at| now >= at)
}

pub fn reset(state: &WordReviewState) -> WordReviewState {
    WordReviewState::new(state.word_id.clone())
}

/// Interval each grade would produce, in `ResponseQuality::ALL` order.
pub fn preview_intervals(state: &WordReviewState) -> [u32; 4] {
    let now = state.last_review_at.unwrap_or_default();
    ResponseQuality::ALL.map(|quality| apply_review(state, quality, now).interval)
}

/// Due words: scheduled ones first by due time, never-reviewed ones last.
pub fn due_words<'a, I>(states: I, now: DateTime<Utc>) -> Vec<&'a WordReviewState>
where
    I: IntoIterator<Item = &'a WordReviewState>,
{
    let mut due: Vec<&WordReviewState> = states
        .into_iter()
        .filter(|state| is_due(state, now))
        .collect();
    due.sort_by_key(|state| (state.last_review_at.is_none(), state.next_review_at));
    due
}

fn next_ease_factor(ease_factor: f64, quality: ResponseQuality) -> f64 {
    let penalty = 5.0 - f64::from(quality.value());
    let delta = 0.1 - penalty * (0.08 + penalty * 0.02);
    (ease_factor + delta).max(MIN_EASE_FACTOR)
}

fn scaled_interval(interval: u32, ease_factor: f64) -> u32 {
    (f64::from(interval) * ease_factor)
        .round()
        .clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Word counts per mastery level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryBreakdown {
    pub new: u32,
    pub learning: u32,
    pub familiar: u32,
    pub mastered: u32,
    pub known: u32,
    /// Words reviewed at least once.
    pub reviewed: u32,
}

impl MasteryBreakdown {
    pub fn from_states<'a, I>(states: I) -> Self
    where
        I: IntoIterator<Item = &'a WordReviewState>,
    {
        let mut breakdown = Self::default();
        for state in states {
            let slot = match state.mastery_level {
                MasteryLevel::New => &mut breakdown.new,
                MasteryLevel::Learning => &mut breakdown.learning,
                MasteryLevel::Familiar => &mut breakdown.familiar,
                MasteryLevel::Mastered => &mut breakdown.mastered,
                MasteryLevel::Known => &mut breakdown.known,
            };
            *slot += 1;
            if state.review_count > 0 {
                breakdown.reviewed += 1;
            }
        }
        breakdown
    }

    pub fn learned(&self) -> u32 {
        self.reviewed
    }

    /// Words at `Mastered` or `Known`.
    pub fn mastered_or_better(&self) -> u32 {
        self.mastered + self.known
    }

    pub fn total(&self) -> u32 {
        self.new + self.learning + self.familiar + self.mastered + self.known
    }
}
