//! Study domain models and engines.
//!
//! This module contains the core data structures and the pure computation
//! engines on top of them, split into submodules:
//! - `subject`: the Subject -> Chapter -> Lesson hierarchy
//! - `goal`: quantity-based goals and the due-date index
//! - `prep`: free-form preparation notes
//! - `study_data`: the in-memory store with lookups and removals
//! - `progress`: completion-percentage aggregation
//! - `streak`: day-completion streak computation

mod goal;
mod prep;
mod progress;
mod streak;
mod study_data;
mod subject;

pub use goal::{Goal, GoalEdit, due_date_index, local_date_today};
pub use prep::Preparation;
pub use progress::{
    chapter_progress, completed_lessons_count, lessons_progress, overall_progress,
    subject_lesson_counts, subject_progress, total_lessons_count,
};
pub use streak::{current_streak, record_completion};
pub use study_data::StudyData;
pub use subject::{Chapter, Lesson, LessonEdit, Subject};
