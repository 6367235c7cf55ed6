use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::question::QuizQuestion;
use crate::config::QuizScoring;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl QuizState {
    pub const fn as_str(self) -> &'static str {
        match self {
            QuizState::NotStarted => "not_started",
            QuizState::InProgress => "in_progress",
            QuizState::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub question_id: String,
    pub word_id: String,
    pub is_correct: bool,
    pub score: i32,
    /// Cumulative session score for the word after this answer.
    pub word_score: i32,
    pub word_mastered: bool,
    pub session_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub total_questions: usize,
    pub answered: usize,
    pub correct: usize,
    pub wrong: usize,
    pub accuracy: f64,
    pub average_response_seconds: f64,
    pub total_score: i32,
    pub mastered_word_ids: Vec<String>,
}

/// One quiz run. Owns its questions; only the summary outlives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    total_score: i32,
    state: QuizState,
    #[serde(default)]
    scoring: QuizScoring,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self::with_scoring(questions, QuizScoring::default())
    }

    pub fn with_scoring(questions: Vec<QuizQuestion>, scoring: QuizScoring) -> Self {
        Self {
            questions,
            current_index: 0,
            total_score: 0,
            state: QuizState::NotStarted,
            scoring,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn scoring(&self) -> &QuizScoring {
        &self.scoring
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::InProgress => self.questions.get(self.current_index),
            _ => None,
        }
    }

    /// NotStarted -> InProgress. An empty session completes immediately.
    pub fn start(&mut self) {
        if self.state != QuizState::NotStarted {
            return;
        }
        self.state = QuizState::InProgress;
        self.refresh_completion();
        tracing::debug!(
            questions = self.questions.len(),
            state = self.state.as_str(),
            "quiz session started"
        );
    }

    /// Answers the current question. `None` unless the session is in progress.
    pub fn answer_current(
        &mut self,
        chosen_answer: &str,
        response_time_seconds: f64,
    ) -> Option<AnswerOutcome> {
        if self.state != QuizState::InProgress {
            return None;
        }
        let question = self.questions.get_mut(self.current_index)?;
        let score = question.record_answer(chosen_answer, response_time_seconds, &self.scoring)?;
        let question_id = question.id.clone();
        let word_id = question.word_id.clone();
        let is_correct = question.is_correct().unwrap_or(false);

        self.total_score += score;
        self.current_index += 1;
        self.refresh_completion();

        let word_score = self.word_score(&word_id);
        let outcome = AnswerOutcome {
            question_id,
            word_id,
            is_correct,
            score,
            word_score,
            word_mastered: word_score >= self.scoring.mastery_score,
            session_completed: self.state == QuizState::Completed,
        };

        tracing::debug!(
            word_id = %outcome.word_id,
            score,
            word_score,
            total_score = self.total_score,
            "quiz answer scored"
        );
        Some(outcome)
    }

    /// Sum of answered scores for `word_id` in this session; zero for unknown words.
    pub fn word_score(&self, word_id: &str) -> i32 {
        self.questions
            .iter()
            .filter(|q| q.word_id == word_id)
            .filter_map(QuizQuestion::score)
            .sum()
    }

    pub fn is_word_mastered(&self, word_id: &str) -> bool {
        self.word_score(word_id) >= self.scoring.mastery_score
    }

    pub fn summary(&self) -> QuizSummary {
        let answered: Vec<&QuizQuestion> =
            self.questions.iter().filter(|q| q.is_answered()).collect();
        let correct = answered
            .iter()
            .filter(|q| q.is_correct() == Some(true))
            .count();
        let accuracy = if answered.is_empty() {
            0.0
        } else {
            correct as f64 / answered.len() as f64
        };
        let average_response_seconds = if answered.is_empty() {
            0.0
        } else {
            answered
                .iter()
                .filter_map(|q| q.response_time_seconds())
                .sum::<f64>()
                / answered.len() as f64
        };

        let scores = self.word_scores();
        let mut mastered_word_ids = Vec::new();
        for question in &self.questions {
            let mastered = scores
                .get(question.word_id.as_str())
                .is_some_and(|score| *score >= self.scoring.mastery_score);
            if mastered && !mastered_word_ids.contains(&question.word_id) {
                mastered_word_ids.push(question.word_id.clone());
            }
        }

        QuizSummary {
            total_questions: self.questions.len(),
            answered: answered.len(),
            correct,
            wrong: answered.len() - correct,
            accuracy,
            average_response_seconds,
            total_score: self.total_score,
            mastered_word_ids,
        }
    }

    fn word_scores(&self) -> HashMap<&str, i32> {
        let mut scores: HashMap<&str, i32> = HashMap::new();
        for question in &self.questions {
            let entry = scores.entry(question.word_id.as_str()).or_insert(0);
            *entry += question.score().unwrap_or(0);
        }
        scores
    }

    fn refresh_completion(&mut self) {
        if self.state != QuizState::InProgress {
            return;
        }
        let exhausted = self.current_index >= self.questions.len();
        let all_mastered = self
            .word_scores()
            .values()
            .all(|score| *score >= self.scoring.mastery_score);
        if exhausted || all_mastered {
            self.state = QuizState::Completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn question(word_id: &str, answer: &str) -> QuizQuestion {
        QuizQuestion::new(
            word_id,
            answer,
            vec![answer.to_string(), "other".to_string()],
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_state_machine() {
        let mut session = QuizSession::new(vec![question("a", "x"), question("b", "y")]);
        assert_eq!(session.state(), QuizState::NotStarted);
        assert!(session.answer_current("x", 1.0).is_none());

        session.start();
        assert_eq!(session.state(), QuizState::InProgress);
        let first = session.answer_current("x", 1.0).unwrap();
        assert_eq!(first.score, 15);
        assert!(!first.session_completed);

        let second = session.answer_current("other", 4.0).unwrap();
        assert_eq!(second.score, -5);
        assert!(second.session_completed);
        assert_eq!(session.state(), QuizState::Completed);
        assert_eq!(session.total_score(), 10);
        assert!(session.answer_current("y", 1.0).is_none());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn test_empty_session_completes_on_start() {
        let mut session = QuizSession::new(Vec::new());
        session.start();
        assert_eq!(session.state(), QuizState::Completed);
    }

    #[test]
    fn test_completes_early_when_every_word_mastered() {
        let questions: Vec<QuizQuestion> = (0..10).map(|_| question("a", "x")).collect();
        let mut session = QuizSession::new(questions);
        session.start();
        let mut last = None;
        for _ in 0..7 {
            last = session.answer_current("x", 1.0);
        }
        // 7 × 15 = 105
        let last = last.unwrap();
        assert!(last.word_mastered);
        assert!(last.session_completed);
        assert_eq!(session.current_index(), 7);
        assert!(session.is_word_mastered("a"));
    }

    #[test]
    fn test_word_score_unknown_word_is_zero() {
        let session = QuizSession::new(vec![question("a", "x")]);
        assert_eq!(session.word_score("missing"), 0);
        assert!(!session.is_word_mastered("missing"));
    }

    #[test]
    fn test_summary() {
        let mut session = QuizSession::new(vec![
            question("a", "x"),
            question("b", "y"),
            question("a", "x"),
        ]);
        session.start();
        session.answer_current("x", 2.0);
        session.answer_current("other", 4.0);

        let summary = session.summary();
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.answered, 2);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.wrong, 1);
        assert!((summary.accuracy - 0.5).abs() < 1e-9);
        assert!((summary.average_response_seconds - 3.0).abs() < 1e-9);
        assert_eq!(summary.total_score, 10);
        assert!(summary.mastered_word_ids.is_empty());
    }
}
