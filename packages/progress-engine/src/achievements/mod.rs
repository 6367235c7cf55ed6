//! Achievements: a static catalog evaluated against aggregate progress counters.
//!
//! The engine only reads the counters it is given; computing them is the caller's job
//! (or `ProgressCounters::collect` for the aggregates this crate owns).

mod definitions;
mod engine;

pub use definitions::{
    default_definitions, AchievementCategory, AchievementDefinition, AchievementRarity,
};
pub use engine::{Achievement, AchievementEngine, ProgressCounters};
