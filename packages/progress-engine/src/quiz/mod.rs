//! Quiz mastery tracking
//!
//! - `question` - multiple-choice questions and answer scoring
//! - `session` - one timed quiz run (NotStarted -> InProgress -> Completed)
//! - `mastery` - per-word quiz record that persists across sessions

pub mod mastery;
pub mod question;
pub mod session;

pub use mastery::{WordMastery, WordMasteryBook};
pub use question::{score_answer, score_with, QuizQuestion};
pub use session::{AnswerOutcome, QuizSession, QuizState, QuizSummary};
