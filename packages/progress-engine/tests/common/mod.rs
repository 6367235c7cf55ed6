#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use hikaya_progress::quiz::QuizQuestion;

/// Fixed reference instant shared by the integration suites.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
}

pub fn days_later(days: i64) -> DateTime<Utc> {
    base_time() + Duration::days(days)
}

pub fn question(word_id: &str, answer: &str) -> QuizQuestion {
    QuizQuestion::new(
        word_id,
        answer,
        vec![
            answer.to_string(),
            "wrong-a".to_string(),
            "wrong-b".to_string(),
            "wrong-c".to_string(),
        ],
        base_time(),
    )
}
