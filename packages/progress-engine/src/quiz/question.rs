use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::QuizScoring;

const MAX_DISTRACTORS: usize = 3;

/// A multiple-choice question. The answer fields are written once by the owning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub word_id: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub asked_at: DateTime<Utc>,
    #[serde(default)]
    selected_answer: Option<String>,
    #[serde(default)]
    is_correct: Option<bool>,
    #[serde(default)]
    score: Option<i32>,
    #[serde(default)]
    response_time_seconds: Option<f64>,
}

impl QuizQuestion {
    pub fn new(
        word_id: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
        asked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            word_id: word_id.into(),
            correct_answer: correct_answer.into(),
            options,
            asked_at,
            selected_answer: None,
            is_correct: None,
            score: None,
            response_time_seconds: None,
        }
    }

    /// Correct answer plus up to three distinct distractors, shuffled.
    pub fn build<R, I, S>(
        word_id: impl Into<String>,
        correct_answer: impl Into<String>,
        distractors: I,
        asked_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let correct_answer = correct_answer.into();

        let mut pool: Vec<String> = Vec::new();
        for candidate in distractors {
            let candidate = candidate.into();
            if candidate != correct_answer && !pool.contains(&candidate) {
                pool.push(candidate);
            }
        }
        pool.shuffle(rng);
        pool.truncate(MAX_DISTRACTORS);

        let mut options = pool;
        options.push(correct_answer.clone());
        options.shuffle(rng);

        Self::new(word_id, correct_answer, options, asked_at)
    }

    pub fn is_answered(&self) -> bool {
        self.selected_answer.is_some()
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn score(&self) -> Option<i32> {
        self.score
    }

    pub fn response_time_seconds(&self) -> Option<f64> {
        self.response_time_seconds
    }

    /// Returns `None` when the question already carries an answer.
    pub(crate) fn record_answer(
        &mut self,
        chosen_answer: &str,
        response_time_seconds: f64,
        scoring: &QuizScoring,
    ) -> Option<i32> {
        if self.is_answered() {
            return None;
        }
        let score = score_with(scoring, self, chosen_answer, response_time_seconds);
        self.selected_answer = Some(chosen_answer.to_string());
        self.is_correct = Some(chosen_answer == self.correct_answer);
        self.score = Some(score);
        self.response_time_seconds = Some(response_time_seconds);
        Some(score)
    }
}

/// +15 for a correct answer under three seconds, +10 for a slower correct one, -5 when wrong.
pub fn score_answer(question: &QuizQuestion, chosen_answer: &str, response_time_seconds: f64) -> i32 {
    score_with(
        &QuizScoring::default(),
        question,
        chosen_answer,
        response_time_seconds,
    )
}

pub fn score_with(
    scoring: &QuizScoring,
    question: &QuizQuestion,
    chosen_answer: &str,
    response_time_seconds: f64,
) -> i32 {
    if chosen_answer != question.correct_answer {
        return scoring.wrong_points;
    }
    if response_time_seconds < scoring.fast_answer_seconds {
        scoring.fast_points
    } else {
        scoring.slow_points
    }
}
