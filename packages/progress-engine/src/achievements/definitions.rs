//! Achievement definitions
//!
//! Definitions are plain configuration: the built-in set below or a JSON
//! catalog handed to the engine at construction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementCategory {
    WordsLearned,
    Streak,
    StoriesCompleted,
    StudyHours,
    WordsMastered,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 5] = [
        AchievementCategory::WordsLearned,
        AchievementCategory::Streak,
        AchievementCategory::StoriesCompleted,
        AchievementCategory::StudyHours,
        AchievementCategory::WordsMastered,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WordsLearned => "Vocabulary",
            Self::Streak => "Streaks",
            Self::StoriesCompleted => "Stories",
            Self::StudyHours => "Study Time",
            Self::WordsMastered => "Mastery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub category: AchievementCategory,
    /// Counter value that unlocks the achievement. Must be positive.
    pub requirement: u32,
    pub rarity: AchievementRarity,
}

impl AchievementDefinition {
    pub fn new(
        id: impl Into<String>,
        category: AchievementCategory,
        requirement: u32,
        rarity: AchievementRarity,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            icon: String::new(),
            category,
            requirement,
            rarity,
        }
    }
}

fn def(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    category: AchievementCategory,
    requirement: u32,
    rarity: AchievementRarity,
) -> AchievementDefinition {
    AchievementDefinition {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        requirement,
        rarity,
    }
}

/// Catalog shipped with the app.
pub fn default_definitions() -> Vec<AchievementDefinition> {
    use AchievementCategory::*;
    use AchievementRarity::*;

    vec![
        // === VOCABULARY ===
        def("first_word", "First Word", "Learn your first word", "📖", WordsLearned, 1, Common),
        def("words_10", "Word Collector", "Learn 10 words", "📚", WordsLearned, 10, Common),
        def("words_50", "Growing Vocabulary", "Learn 50 words", "🌱", WordsLearned, 50, Rare),
        def("words_100", "Wordsmith", "Learn 100 words", "✍️", WordsLearned, 100, Rare),
        def("words_500", "Lexicon", "Learn 500 words", "🏛️", WordsLearned, 500, Epic),
        def("words_1000", "Living Dictionary", "Learn 1000 words", "👑", WordsLearned, 1000, Legendary),
        // === STREAK ===
        def("streak_3", "On a Roll", "Study 3 days in a row", "🔥", Streak, 3, Common),
        def("streak_7", "Week Warrior", "Study 7 days in a row", "📅", Streak, 7, Rare),
        def("streak_30", "Monthly Devotion", "Study 30 days in a row", "🌙", Streak, 30, Epic),
        def("streak_100", "Unstoppable", "Study 100 days in a row", "💎", Streak, 100, Legendary),
        // === STORIES ===
        def("first_story", "Once Upon a Time", "Finish your first story", "📜", StoriesCompleted, 1, Common),
        def("stories_10", "Storyteller", "Finish 10 stories", "🏮", StoriesCompleted, 10, Rare),
        def("stories_50", "Thousand and One Nights", "Finish 50 stories", "🕌", StoriesCompleted, 50, Epic),
        // === STUDY TIME ===
        def("hours_1", "First Hour", "Study for 1 hour in total", "⏱️", StudyHours, 1, Common),
        def("hours_10", "Dedicated", "Study for 10 hours in total", "⏳", StudyHours, 10, Rare),
        def("hours_50", "Scholar", "Study for 50 hours in total", "🎓", StudyHours, 50, Epic),
        // === MASTERY ===
        def("mastered_10", "Sharp Memory", "Master 10 words", "🧠", WordsMastered, 10, Rare),
        def("mastered_50", "Keeper of Words", "Master 50 words", "🗝️", WordsMastered, 50, Epic),
        def("mastered_200", "Fluent Mind", "Master 200 words", "🌟", WordsMastered, 200, Legendary),
    ]
}
