//! Study tracker core library
//!
//! This library implements a personal study tracker: learning material is
//! organized into subjects, chapters and lessons, goals track quantity-based
//! targets per subject, and progress percentages, a due-date calendar and a
//! day-completion streak are derived from the current state.
//!
//! # Architecture
//!
//! The library follows a 3-layer structure:
//! - **Facade**: [`StudyTracker`] - the mutation and query API used by a
//!   frontend, persisting after every change
//! - **Domain**: `study` module - entity types and the pure aggregation,
//!   goal and streak engines
//! - **Persistence**: `storage` module - TOML file storage with defensive
//!   loading
//!
//! # Example
//!
//! ```no_run
//! use study_tracker::StudyTracker;
//!
//! # fn main() -> Result<(), study_tracker::Error> {
//! let mut tracker = StudyTracker::open("study.toml")?;
//! let subject = tracker.add_subject("Rust")?;
//! let chapter = tracker.add_chapter(&subject, "Ownership")?;
//! tracker.add_lesson(&chapter, "Borrowing")?;
//! println!("overall: {}%", tracker.overall_progress());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod formatting;
mod storage;
mod study;
mod validation;

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::path::Path;

pub use error::{Error, Result};
pub use storage::Storage;
pub use study::{
    Chapter, Goal, GoalEdit, Lesson, LessonEdit, Preparation, StudyData, Subject, chapter_progress,
    completed_lessons_count, current_streak, due_date_index, lessons_progress, local_date_today,
    overall_progress, subject_lesson_counts, subject_progress, total_lessons_count,
};
pub use validation::parse_date;

/// Parameters for creating a goal. Dates and quantity are optional: a
/// missing quantity defaults to 1 and a fully missing date window defaults
/// to one week starting today.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub subject_id: String,
    pub quantity: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Application facade owning the in-memory store and its persistence.
///
/// All operations are synchronous and run to completion; the store is the
/// only mutable state. Every mutating operation writes the store back to
/// disk before returning, so a crash loses at most the mutation in flight.
pub struct StudyTracker {
    data: StudyData,
    storage: Storage,
}

impl StudyTracker {
    /// Open a tracker backed by the given data file, seeding the store from
    /// it. A missing or corrupt file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let storage = Storage::new(path);
        let data = storage.load().map_err(Error::Storage)?;
        Ok(Self { data, storage })
    }

    /// Read access to the current store snapshot
    pub fn data(&self) -> &StudyData {
        &self.data
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.data).map_err(Error::Storage)
    }

    // ------------------------------------------------------------------
    // Subjects, chapters, lessons
    // ------------------------------------------------------------------

    /// Add a subject and return its id
    pub fn add_subject(&mut self, name: &str) -> Result<String> {
        let name = validation::require_text(name, "subject name")?;
        let id = self.data.next_id("subject");
        self.data.subjects.push(Subject {
            id: id.clone(),
            name,
            chapters: Vec::new(),
        });
        self.persist()?;
        Ok(id)
    }

    pub fn rename_subject(&mut self, id: &str, name: &str) -> Result<()> {
        let name = validation::require_text(name, "subject name")?;
        let subject = self.data.find_subject_mut(id).ok_or_else(|| Error::NotFound {
            kind: "subject",
            id: id.to_string(),
        })?;
        subject.name = name;
        self.persist()
    }

    /// Delete a subject and everything it owns. Goals and preparations that
    /// referenced it keep their ids and resolve as "Unknown" from then on.
    /// Returns `false` when the id was already gone (a no-op).
    pub fn delete_subject(&mut self, id: &str) -> Result<bool> {
        if self.data.remove_subject(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Add a chapter to a subject and return the chapter id
    pub fn add_chapter(&mut self, subject_id: &str, name: &str) -> Result<String> {
        let name = validation::require_text(name, "chapter name")?;
        if self.data.find_subject(subject_id).is_none() {
            return Err(Error::UnknownSubject(subject_id.to_string()));
        }
        let id = self.data.next_id("chapter");
        if let Some(subject) = self.data.find_subject_mut(subject_id) {
            subject.chapters.push(Chapter {
                id: id.clone(),
                name,
                lessons: Vec::new(),
            });
        }
        self.persist()?;
        Ok(id)
    }

    pub fn rename_chapter(&mut self, id: &str, name: &str) -> Result<()> {
        let name = validation::require_text(name, "chapter name")?;
        let chapter = self.data.find_chapter_mut(id).ok_or_else(|| Error::NotFound {
            kind: "chapter",
            id: id.to_string(),
        })?;
        chapter.name = name;
        self.persist()
    }

    pub fn delete_chapter(&mut self, id: &str) -> Result<bool> {
        if self.data.remove_chapter(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Add a lesson to a chapter and return the lesson id
    pub fn add_lesson(&mut self, chapter_id: &str, name: &str) -> Result<String> {
        let name = validation::require_text(name, "lesson name")?;
        if self.data.find_chapter(chapter_id).is_none() {
            return Err(Error::NotFound {
                kind: "chapter",
                id: chapter_id.to_string(),
            });
        }
        let id = self.data.next_id("lesson");
        if let Some(chapter) = self.data.find_chapter_mut(chapter_id) {
            chapter.lessons.push(Lesson {
                id: id.clone(),
                name,
                completed: false,
                notes: String::new(),
            });
        }
        self.persist()?;
        Ok(id)
    }

    /// Update a lesson's name, completion flag and/or notes
    pub fn update_lesson(&mut self, lesson_id: &str, edit: LessonEdit) -> Result<()> {
        let name = match edit.name {
            Some(name) => Some(validation::require_text(&name, "lesson name")?),
            None => None,
        };
        let lesson = self
            .data
            .find_lesson_mut(lesson_id)
            .ok_or_else(|| Error::NotFound {
                kind: "lesson",
                id: lesson_id.to_string(),
            })?;
        if let Some(name) = name {
            lesson.name = name;
        }
        if let Some(completed) = edit.completed {
            lesson.completed = completed;
        }
        if let Some(notes) = edit.notes {
            lesson.notes = notes;
        }
        self.persist()
    }

    pub fn set_lesson_completed(&mut self, lesson_id: &str, completed: bool) -> Result<()> {
        self.update_lesson(
            lesson_id,
            LessonEdit {
                completed: Some(completed),
                ..Default::default()
            },
        )
    }

    pub fn delete_lesson(&mut self, id: &str) -> Result<bool> {
        if self.data.remove_lesson(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Goals
    // ------------------------------------------------------------------

    /// Create a goal and return its id.
    ///
    /// The title must be non-empty after trimming and the subject must
    /// exist. When neither date is given the window defaults to one week
    /// starting today.
    pub fn add_goal(&mut self, new_goal: NewGoal) -> Result<String> {
        let title = validation::require_text(&new_goal.title, "goal title")?;
        if self.data.find_subject(&new_goal.subject_id).is_none() {
            return Err(Error::UnknownSubject(new_goal.subject_id));
        }

        let (start_date, end_date) = match (new_goal.start_date, new_goal.end_date) {
            (None, None) => {
                let today = local_date_today();
                (Some(today), today.checked_add_days(Days::new(7)))
            }
            window => window,
        };
        validation::check_date_window(start_date, end_date)?;

        let quantity = validation::coerce_quantity(new_goal.quantity);
        let id = self.data.next_id("goal");
        self.data.goals.push(Goal {
            id: id.clone(),
            title,
            subject_id: new_goal.subject_id,
            quantity,
            progress: 0,
            completed: false,
            start_date,
            end_date,
            notes: new_goal.notes,
        });
        self.persist()?;
        Ok(id)
    }

    /// Edit a goal. Progress is capped to a lowered quantity and the
    /// completion state recomputed, see [`Goal::apply_edit`].
    pub fn edit_goal(&mut self, goal_id: &str, edit: GoalEdit) -> Result<()> {
        let mut edit = edit;
        if let Some(title) = &edit.title {
            edit.title = Some(validation::require_text(title, "goal title")?);
        }
        if let Some(subject_id) = &edit.subject_id
            && self.data.find_subject(subject_id).is_none()
        {
            return Err(Error::UnknownSubject(subject_id.clone()));
        }

        let goal = self.data.find_goal_mut(goal_id).ok_or_else(|| Error::NotFound {
            kind: "goal",
            id: goal_id.to_string(),
        })?;
        validation::check_date_window(
            edit.start_date.or(goal.start_date),
            edit.end_date.or(goal.end_date),
        )?;
        goal.apply_edit(edit);
        self.persist()
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<bool> {
        if self.data.remove_goal(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Advance a goal by one unit. Reaching the quantity completes the goal
    /// and records today for the streak. Incrementing a completed goal is a
    /// no-op.
    pub fn increment_goal(&mut self, goal_id: &str) -> Result<()> {
        let today = local_date_today();
        let goal = self
            .data
            .find_goal_mut(goal_id)
            .ok_or_else(|| Error::NotFound {
                kind: "goal",
                id: goal_id.to_string(),
            })?;
        if goal.increment() {
            study::record_completion(&mut self.data.completion_days, today);
        }
        self.persist()
    }

    /// Force a goal's completion state. Completing records today for the
    /// streak; un-completing keeps the goal's partial progress.
    pub fn set_goal_completed(&mut self, goal_id: &str, completed: bool) -> Result<()> {
        let today = local_date_today();
        let goal = self
            .data
            .find_goal_mut(goal_id)
            .ok_or_else(|| Error::NotFound {
                kind: "goal",
                id: goal_id.to_string(),
            })?;
        if goal.set_completed(completed) {
            study::record_completion(&mut self.data.completion_days, today);
        }
        self.persist()
    }

    // ------------------------------------------------------------------
    // Preparations
    // ------------------------------------------------------------------

    pub fn add_preparation(&mut self, subject_id: &str, title: &str, notes: &str) -> Result<String> {
        let title = validation::require_text(title, "preparation title")?;
        if self.data.find_subject(subject_id).is_none() {
            return Err(Error::UnknownSubject(subject_id.to_string()));
        }
        let id = self.data.next_id("prep");
        self.data.preparations.push(Preparation {
            id: id.clone(),
            subject_id: subject_id.to_string(),
            title,
            notes: notes.to_string(),
        });
        self.persist()?;
        Ok(id)
    }

    pub fn edit_preparation(
        &mut self,
        id: &str,
        title: Option<&str>,
        notes: Option<&str>,
    ) -> Result<()> {
        let title = match title {
            Some(title) => Some(validation::require_text(title, "preparation title")?),
            None => None,
        };
        let prep = self
            .data
            .find_preparation_mut(id)
            .ok_or_else(|| Error::NotFound {
                kind: "preparation",
                id: id.to_string(),
            })?;
        if let Some(title) = title {
            prep.title = title;
        }
        if let Some(notes) = notes {
            prep.notes = notes.to_string();
        }
        self.persist()
    }

    pub fn delete_preparation(&mut self, id: &str) -> Result<bool> {
        if self.data.remove_preparation(id).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn overall_progress(&self) -> u8 {
        study::overall_progress(&self.data.subjects)
    }

    pub fn subject_progress(&self, subject_id: &str) -> Option<u8> {
        self.data.find_subject(subject_id).map(study::subject_progress)
    }

    pub fn chapter_progress(&self, chapter_id: &str) -> Option<u8> {
        self.data.find_chapter(chapter_id).map(study::chapter_progress)
    }

    pub fn total_lessons_count(&self) -> usize {
        study::total_lessons_count(&self.data.subjects)
    }

    pub fn completed_lessons_count(&self) -> usize {
        study::completed_lessons_count(&self.data.subjects)
    }

    /// Goals grouped by due date, for calendar display
    pub fn due_date_index(&self) -> BTreeMap<NaiveDate, Vec<&Goal>> {
        study::due_date_index(&self.data.goals)
    }

    /// Consecutive days with a goal completion, ending today
    pub fn current_streak(&self) -> u32 {
        study::current_streak(&self.data.completion_days, local_date_today())
    }

    pub fn find_subject(&self, id: &str) -> Option<&Subject> {
        self.data.find_subject(id)
    }

    pub fn find_chapter(&self, id: &str) -> Option<&Chapter> {
        self.data.find_chapter(id)
    }

    pub fn find_lesson(&self, id: &str) -> Option<&Lesson> {
        self.data.find_lesson(id)
    }

    pub fn find_goal(&self, id: &str) -> Option<&Goal> {
        self.data.find_goal(id)
    }

    pub fn find_preparation(&self, id: &str) -> Option<&Preparation> {
        self.data.find_preparation(id)
    }

    /// Name of the subject a goal or preparation points at, if it still
    /// exists. Display code substitutes "Unknown" for `None`.
    pub fn subject_name(&self, subject_id: &str) -> Option<&str> {
        self.data.subject_name(subject_id)
    }
}
