use crate::progress::{LearnerProgress, FIRST_LEVEL};

const SECOND_LEVEL: u32 = FIRST_LEVEL + 1;

/// Records a finished story and returns true when this completion unlocked level 2.
///
/// The unlock compares every distinct completed story, whatever its level,
/// against the level-1 story count.
pub fn on_story_completed(
    progress: &mut LearnerProgress,
    story_id: &str,
    level: u32,
    total_stories_in_level1: usize,
) -> bool {
    if !progress.completed_story_ids.contains(story_id) {
        progress.completed_story_ids.insert(story_id.to_string());
    }

    let counter = progress.level_completions.entry(level).or_insert(0);
    *counter = counter.saturating_add(1);

    if progress.max_unlocked_level < SECOND_LEVEL
        && total_stories_in_level1 > 0
        && progress.completed_story_ids.len() >= total_stories_in_level1
    {
        progress.max_unlocked_level = SECOND_LEVEL;
        tracing::info!(
            level = SECOND_LEVEL,
            completed = progress.completed_story_ids.len(),
            "story level unlocked"
        );
        return true;
    }

    tracing::debug!(story_id, level, "story completion recorded");
    false
}

pub fn is_level_unlocked(progress: &LearnerProgress, level: u32) -> bool {
    (FIRST_LEVEL..=progress.max_unlocked_level).contains(&level)
}

pub fn completed_in_level(progress: &LearnerProgress, level: u32) -> u32 {
    progress.level_completions.get(&level).copied().unwrap_or(0)
}

/// Share of the level-1 target already reached, in [0, 1]. Zero when the target is empty.
pub fn level_completion_ratio(progress: &LearnerProgress, total_stories_in_level1: usize) -> f64 {
    if total_stories_in_level1 == 0 {
        return 0.0;
    }
    (progress.completed_story_ids.len() as f64 / total_stories_in_level1 as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocks_when_target_reached() {
        let mut progress = LearnerProgress::default();
        assert!(!on_story_completed(&mut progress, "s1", 1, 3));
        assert!(!on_story_completed(&mut progress, "s2", 1, 3));
        assert!(on_story_completed(&mut progress, "s3", 1, 3));
        assert_eq!(progress.max_unlocked_level, 2);
        assert!(is_level_unlocked(&progress, 2));
        assert!(!is_level_unlocked(&progress, 3));
        assert!(!on_story_completed(&mut progress, "s4", 1, 3));
    }

    #[test]
    fn test_repeat_completion_does_not_duplicate() {
        let mut progress = LearnerProgress::default();
        on_story_completed(&mut progress, "s1", 1, 2);
        on_story_completed(&mut progress, "s1", 1, 2);
        assert_eq!(progress.completed_story_ids.len(), 1);
        assert_eq!(completed_in_level(&progress, 1), 2);
        assert_eq!(progress.max_unlocked_level, 1);
    }

    #[test]
    fn test_zero_target_never_unlocks() {
        let mut progress = LearnerProgress::default();
        for i in 0..5 {
            assert!(!on_story_completed(&mut progress, &format!("s{i}"), 1, 0));
        }
        assert_eq!(progress.max_unlocked_level, 1);
        assert!((level_completion_ratio(&progress, 0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_levels_count_toward_target() {
        let mut progress = LearnerProgress::default();
        on_story_completed(&mut progress, "s1", 1, 2);
        assert!(on_story_completed(&mut progress, "x7", 3, 2));
        assert_eq!(completed_in_level(&progress, 3), 1);
        assert!((level_completion_ratio(&progress, 2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_level_zero_is_never_unlocked() {
        let progress = LearnerProgress::default();
        assert!(!is_level_unlocked(&progress, 0));
        assert!(is_level_unlocked(&progress, 1));
    }
}
