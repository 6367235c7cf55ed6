use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::QuizQuestion;
use super::session::QuizSession;
use crate::config::QuizScoring;

/// Cross-session quiz record for one word.
///
/// Independent of the SRS `MasteryLevel`: a word can be quiz-mastered while its
/// flashcard schedule still says `Learning`, and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMastery {
    pub word_id: String,
    pub total_score: i32,
    pub correct_streak: u32,
    pub wrong_streak: u32,
    pub times_asked: u32,
    pub times_correct: u32,
    pub times_wrong: u32,
    pub is_mastered: bool,
    pub mastered_at: Option<DateTime<Utc>>,
}

impl WordMastery {
    pub fn new(word_id: impl Into<String>) -> Self {
        Self {
            word_id: word_id.into(),
            total_score: 0,
            correct_streak: 0,
            wrong_streak: 0,
            times_asked: 0,
            times_correct: 0,
            times_wrong: 0,
            is_mastered: false,
            mastered_at: None,
        }
    }

    /// Folds one answered question in. Returns true when this call latched mastery.
    pub fn update(&mut self, question: &QuizQuestion, now: DateTime<Utc>) -> bool {
        self.update_with(question, now, QuizScoring::default().mastery_score)
    }

    pub fn update_with(
        &mut self,
        question: &QuizQuestion,
        now: DateTime<Utc>,
        mastery_score: i32,
    ) -> bool {
        if question.word_id != self.word_id {
            return false;
        }
        let (Some(is_correct), Some(score)) = (question.is_correct(), question.score()) else {
            return false;
        };

        self.times_asked += 1;
        if is_correct {
            self.times_correct += 1;
            self.correct_streak += 1;
            self.wrong_streak = 0;
        } else {
            self.times_wrong += 1;
            self.wrong_streak += 1;
            self.correct_streak = 0;
        }
        self.total_score += score;

        if !self.is_mastered && self.progress_toward(mastery_score) >= 1.0 {
            self.is_mastered = true;
            self.mastered_at = Some(now);
            tracing::info!(word_id = %self.word_id, total_score = self.total_score, "word mastered");
            return true;
        }
        false
    }

    /// clamp(totalScore / 100, 0, 1)
    pub fn progress(&self) -> f64 {
        self.progress_toward(QuizScoring::default().mastery_score)
    }

    pub fn progress_toward(&self, mastery_score: i32) -> f64 {
        if mastery_score <= 0 {
            return 1.0;
        }
        (f64::from(self.total_score) / f64::from(mastery_score)).clamp(0.0, 1.0)
    }

    pub fn accuracy(&self) -> f64 {
        if self.times_asked == 0 {
            return 0.0;
        }
        f64::from(self.times_correct) / f64::from(self.times_asked)
    }
}

/// Per-word quiz records for one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMasteryBook {
    entries: HashMap<String, WordMastery>,
    mastery_score: i32,
    /// Ids of questions already folded in.
    #[serde(default)]
    recorded_question_ids: HashSet<String>,
}

impl Default for WordMasteryBook {
    fn default() -> Self {
        Self::new()
    }
}

impl WordMasteryBook {
    pub fn new() -> Self {
        Self::with_scoring(&QuizScoring::default())
    }

    pub fn with_scoring(scoring: &QuizScoring) -> Self {
        Self {
            entries: HashMap::new(),
            mastery_score: scoring.mastery_score,
            recorded_question_ids: HashSet::new(),
        }
    }

    pub fn get(&self, word_id: &str) -> Option<&WordMastery> {
        self.entries.get(word_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordMastery> {
        self.entries.values()
    }

    pub fn mastered_count(&self) -> usize {
        self.entries.values().filter(|m| m.is_mastered).count()
    }

    /// Unanswered questions and questions already recorded are ignored.
    pub fn record_question(&mut self, question: &QuizQuestion, now: DateTime<Utc>) -> bool {
        if !question.is_answered() || self.recorded_question_ids.contains(&question.id) {
            return false;
        }
        self.recorded_question_ids.insert(question.id.clone());
        let mastery_score = self.mastery_score;
        self.entries
            .entry(question.word_id.clone())
            .or_insert_with(|| WordMastery::new(question.word_id.clone()))
            .update_with(question, now, mastery_score)
    }

    /// Folds every answered question of `session` in; returns the words newly mastered.
    pub fn record_session(&mut self, session: &QuizSession, now: DateTime<Utc>) -> Vec<String> {
        let mut newly_mastered = Vec::new();
        for question in session.questions() {
            if self.record_question(question, now) {
                newly_mastered.push(question.word_id.clone());
            }
        }
        newly_mastered
    }
}
