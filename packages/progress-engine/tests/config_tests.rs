use std::io::Write;

use chrono::Utc;
use hikaya_progress::{ConfigError, LearnerProgress, ProgressConfig, QuizQuestion, QuizSession, QuizState};

// Environment variables are process-wide, so everything touching them lives in one test.
#[test]
fn env_file_overrides_defaults_and_is_validated() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "PROGRESS_MASTERY_SCORE=80").unwrap();
    writeln!(file, "PROGRESS_FAST_POINTS=20").unwrap();
    writeln!(file, "PROGRESS_DAILY_GOAL_MINUTES=25").unwrap();
    file.flush().unwrap();

    let config = ProgressConfig::load_from(file.path()).unwrap();
    assert_eq!(config.quiz.mastery_score, 80);
    assert_eq!(config.quiz.fast_points, 20);
    assert_eq!(config.quiz.slow_points, 10);
    assert_eq!(config.engagement.default_daily_goal_minutes, 25);
    assert_eq!(LearnerProgress::from_config(&config.engagement).daily_goal_minutes, 25);

    std::env::set_var("PROGRESS_FAST_ANSWER_SECONDS", "-1");
    let invalid = ProgressConfig::from_env().validate();
    assert!(matches!(invalid, Err(ConfigError::Validation(_))));
    std::env::remove_var("PROGRESS_FAST_ANSWER_SECONDS");

    let missing = ProgressConfig::load_from(file.path().with_extension("missing"));
    assert!(matches!(missing, Err(ConfigError::EnvFile(_))));

    // A zero threshold would complete every quiz before the first answer.
    std::env::set_var("PROGRESS_MASTERY_SCORE", "0");
    assert!(matches!(ProgressConfig::load(), Err(ConfigError::Validation(_))));
    std::env::set_var("PROGRESS_MASTERY_SCORE", "100");
    let config = ProgressConfig::load().unwrap();
    let questions = (0..5)
        .map(|_| QuizQuestion::new("kitab", "book", vec!["book".into(), "pen".into()], Utc::now()))
        .collect();
    let mut session = QuizSession::with_scoring(questions, config.quiz);
    session.start();
    assert_eq!(session.state(), QuizState::InProgress);
    std::env::remove_var("PROGRESS_MASTERY_SCORE");
}
