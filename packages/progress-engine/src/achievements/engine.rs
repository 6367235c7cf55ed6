use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definitions::{
    default_definitions, AchievementCategory, AchievementDefinition, AchievementRarity,
};
use crate::error::CatalogError;
use crate::progress::LearnerProgress;
use crate::srs::{MasteryBreakdown, WordReviewState};

/// A learner's instance of a catalog achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub category: AchievementCategory,
    pub requirement: u32,
    pub rarity: AchievementRarity,
    pub current_progress: u32,
    pub is_unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn locked(definition: &AchievementDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            category: definition.category,
            requirement: definition.requirement,
            rarity: definition.rarity,
            current_progress: 0,
            is_unlocked: false,
            unlocked_at: None,
        }
    }

    /// Sets the progress value. Returns true when this call unlocked the achievement;
    /// an unlocked achievement stays unlocked whatever value follows.
    pub fn update_progress(&mut self, new_value: u32, now: DateTime<Utc>) -> bool {
        self.current_progress = new_value;
        if self.is_unlocked || self.current_progress < self.requirement {
            return false;
        }
        self.is_unlocked = true;
        self.unlocked_at = Some(now);
        true
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.requirement == 0 {
            return 1.0;
        }
        (f64::from(self.current_progress) / f64::from(self.requirement)).clamp(0.0, 1.0)
    }
}

/// Aggregate counters the achievement categories are measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressCounters {
    pub words_learned: u32,
    pub current_streak: u32,
    pub stories_completed: u32,
    pub hours_studied: u32,
    pub words_mastered: u32,
}

impl ProgressCounters {
    pub fn value_for(&self, category: AchievementCategory) -> u32 {
        match category {
            AchievementCategory::WordsLearned => self.words_learned,
            AchievementCategory::Streak => self.current_streak,
            AchievementCategory::StoriesCompleted => self.stories_completed,
            AchievementCategory::StudyHours => self.hours_studied,
            AchievementCategory::WordsMastered => self.words_mastered,
        }
    }

    /// Words mastered counts flashcard words at `Mastered` or above.
    pub fn collect<'a, I>(progress: &LearnerProgress, review_states: I) -> Self
    where
        I: IntoIterator<Item = &'a WordReviewState>,
    {
        let breakdown = MasteryBreakdown::from_states(review_states);
        Self {
            words_learned: breakdown.learned(),
            current_streak: progress.current_streak,
            stories_completed: u32::try_from(progress.stories_completed()).unwrap_or(u32::MAX),
            hours_studied: u32::try_from(progress.total_study_minutes / 60).unwrap_or(u32::MAX),
            words_mastered: breakdown.mastered_or_better(),
        }
    }
}

/// Evaluates achievements against an immutable catalog.
#[derive(Debug, Clone)]
pub struct AchievementEngine {
    definitions: Vec<AchievementDefinition>,
    index: HashMap<String, usize>,
}

impl AchievementEngine {
    pub fn new(definitions: Vec<AchievementDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(definitions.len());
        for definition in &definitions {
            if definition.id.trim().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if definition.requirement == 0 {
                return Err(CatalogError::InvalidRequirement {
                    id: definition.id.clone(),
                    requirement: definition.requirement,
                });
            }
            if !seen.insert(definition.id.as_str()) {
                return Err(CatalogError::DuplicateId(definition.id.clone()));
            }
        }
        Ok(Self::indexed(definitions))
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<AchievementDefinition> = serde_json::from_str(raw)?;
        Self::new(definitions)
    }

    /// The built-in catalog; its validity is covered by tests.
    pub fn with_default_catalog() -> Self {
        Self::indexed(default_definitions())
    }

    fn indexed(definitions: Vec<AchievementDefinition>) -> Self {
        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        Self { definitions, index }
    }

    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    pub fn definition(&self, id: &str) -> Option<&AchievementDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn instantiate(&self) -> Vec<Achievement> {
        self.definitions.iter().map(Achievement::locked).collect()
    }

    /// Appends locked instances for definitions missing from `existing`. Returns how many were added.
    pub fn reconcile(&self, existing: &mut Vec<Achievement>) -> usize {
        let present: HashSet<String> = existing.iter().map(|a| a.id.clone()).collect();
        let before = existing.len();
        existing.extend(
            self.definitions
                .iter()
                .filter(|d| !present.contains(&d.id))
                .map(Achievement::locked),
        );
        existing.len() - before
    }

    /// Unknown ids are left untouched and report false.
    pub fn update_progress(
        &self,
        achievement: &mut Achievement,
        new_value: u32,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(definition) = self.definition(&achievement.id) else {
            return false;
        };
        achievement.category = definition.category;
        achievement.requirement = definition.requirement;
        achievement.rarity = definition.rarity;

        let unlocked = achievement.update_progress(new_value, now);
        if unlocked {
            tracing::info!(
                achievement = %achievement.id,
                progress = new_value,
                requirement = achievement.requirement,
                "achievement unlocked"
            );
        }
        unlocked
    }

    /// Re-evaluates every achievement and returns the ones unlocked by this pass.
    pub fn evaluate(
        &self,
        achievements: &mut [Achievement],
        counters: &ProgressCounters,
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();
        for achievement in achievements.iter_mut() {
            let Some(category) = self.definition(&achievement.id).map(|d| d.category) else {
                continue;
            };
            if self.update_progress(achievement, counters.value_for(category), now) {
                newly_unlocked.push(achievement.clone());
            }
        }
        newly_unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn small_catalog() -> Vec<AchievementDefinition> {
        vec![
            AchievementDefinition::new(
                "streak_3",
                AchievementCategory::Streak,
                3,
                AchievementRarity::Common,
            ),
            AchievementDefinition::new(
                "words_10",
                AchievementCategory::WordsLearned,
                10,
                AchievementRarity::Rare,
            ),
        ]
    }

    #[test]
    fn test_default_catalog_validates() {
        assert!(AchievementEngine::new(default_definitions()).is_ok());
        assert_eq!(
            AchievementEngine::with_default_catalog().definitions().len(),
            default_definitions().len()
        );
    }

    #[test]
    fn test_rejects_zero_requirement() {
        let mut defs = small_catalog();
        defs[1].requirement = 0;
        let err = AchievementEngine::new(defs).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRequirement { ref id, .. } if id == "words_10"));
    }

    #[test]
    fn test_rejects_duplicates_and_empty_ids() {
        let mut defs = small_catalog();
        defs[1].id = "streak_3".into();
        assert!(matches!(
            AchievementEngine::new(defs),
            Err(CatalogError::DuplicateId(_))
        ));

        let mut defs = small_catalog();
        defs[0].id = "  ".into();
        assert!(matches!(AchievementEngine::new(defs), Err(CatalogError::EmptyId)));
    }

    #[test]
    fn test_update_latches_and_never_reverts() {
        let engine = AchievementEngine::new(small_catalog()).unwrap();
        let mut achievements = engine.instantiate();
        let streak = &mut achievements[0];

        assert!(!engine.update_progress(streak, 2, now()));
        assert!((streak.progress_ratio() - 2.0 / 3.0).abs() < 1e-9);
        assert!(engine.update_progress(streak, 3, now()));
        assert!(!engine.update_progress(streak, 5, now()));
        assert!(!engine.update_progress(streak, 0, now()));
        assert!(streak.is_unlocked);
        assert_eq!(streak.current_progress, 0);
        assert_eq!(streak.unlocked_at, Some(now()));
    }

    #[test]
    fn test_evaluate_returns_new_unlocks_only() {
        let engine = AchievementEngine::new(small_catalog()).unwrap();
        let mut achievements = engine.instantiate();
        let counters = ProgressCounters {
            current_streak: 4,
            words_learned: 3,
            ..Default::default()
        };

        let first = engine.evaluate(&mut achievements, &counters, now());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "streak_3");

        let second = engine.evaluate(&mut achievements, &counters, now());
        assert!(second.is_empty());
    }

    #[test]
    fn test_unknown_achievement_is_untouched() {
        let engine = AchievementEngine::new(small_catalog()).unwrap();
        let mut stray = Achievement::locked(&AchievementDefinition::new(
            "retired",
            AchievementCategory::Streak,
            1,
            AchievementRarity::Common,
        ));
        assert!(!engine.update_progress(&mut stray, 10, now()));
        assert_eq!(stray.current_progress, 0);
        assert!(!stray.is_unlocked);
    }

    #[test]
    fn test_reconcile_adds_missing() {
        let engine = AchievementEngine::new(small_catalog()).unwrap();
        let mut existing = vec![Achievement::locked(&small_catalog()[0])];
        assert_eq!(engine.reconcile(&mut existing), 1);
        assert_eq!(engine.reconcile(&mut existing), 0);
        assert_eq!(existing.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let raw = r#"[
            {"id": "first_story", "title": "Once Upon a Time", "description": "Finish a story",
             "category": "storiesCompleted", "requirement": 1, "rarity": "common"}
        ]"#;
        let engine = AchievementEngine::from_json(raw).unwrap();
        assert_eq!(
            engine.definition("first_story").map(|d| d.category),
            Some(AchievementCategory::StoriesCompleted)
        );

        assert!(matches!(
            AchievementEngine::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
        let zero = r#"[{"id": "x", "title": "", "description": "", "category": "streak",
                       "requirement": 0, "rarity": "epic"}]"#;
        assert!(matches!(
            AchievementEngine::from_json(zero),
            Err(CatalogError::InvalidRequirement { .. })
        ));
    }

    #[test]
    fn test_counters_from_progress() {
        let mut progress = LearnerProgress::default();
        progress.current_streak = 5;
        progress.total_study_minutes = 125;
        progress.completed_story_ids.insert("s1".into());
        let states = vec![
            WordReviewState::new("a"),
            WordReviewState {
                review_count: 4,
                mastery_level: crate::srs::MasteryLevel::Mastered,
                ..WordReviewState::new("b")
            },
        ];
        let counters = ProgressCounters::collect(&progress, &states);
        assert_eq!(counters.words_learned, 1);
        assert_eq!(counters.words_mastered, 1);
        assert_eq!(counters.current_streak, 5);
        assert_eq!(counters.hours_studied, 2);
        assert_eq!(counters.stories_completed, 1);
    }
}
