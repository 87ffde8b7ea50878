use super::goal::Goal;
use super::prep::Preparation;
use super::subject::{Chapter, Lesson, Subject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// In-memory store for all study data.
///
/// Vecs are the primary storage: they keep insertion order, which gives
/// stable TOML serialization and predictable display order. The whole
/// subject tree is owned directly; goals and preparations point at subjects
/// only by id, so deleting a subject never has to touch them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyData {
    #[serde(rename = "subject")]
    pub(crate) subjects: Vec<Subject>,

    #[serde(rename = "goal")]
    pub(crate) goals: Vec<Goal>,

    #[serde(rename = "preparation")]
    pub(crate) preparations: Vec<Preparation>,

    /// Calendar days with at least one goal completion, for streak tracking
    pub(crate) completion_days: BTreeSet<NaiveDate>,

    /// Counter backing id generation, persisted so ids stay unique across
    /// restarts
    pub(crate) id_counter: u64,
}

impl StudyData {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh unique id with the given prefix
    pub(crate) fn next_id(&mut self, prefix: &str) -> String {
        self.id_counter += 1;
        format!("{}-{}", prefix, self.id_counter)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn preparations(&self) -> &[Preparation] {
        &self.preparations
    }

    pub fn completion_days(&self) -> &BTreeSet<NaiveDate> {
        &self.completion_days
    }

    // Lookups. All of these return `None` for unknown or dangling ids
    // rather than failing; chapter and lesson ids are unique across the
    // whole tree, so they can be addressed without naming their parents.

    pub fn find_subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub(crate) fn find_subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    pub fn find_chapter(&self, id: &str) -> Option<&Chapter> {
        self.subjects
            .iter()
            .flat_map(|s| s.chapters.iter())
            .find(|c| c.id == id)
    }

    pub(crate) fn find_chapter_mut(&mut self, id: &str) -> Option<&mut Chapter> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.chapters.iter_mut())
            .find(|c| c.id == id)
    }

    pub fn find_lesson(&self, id: &str) -> Option<&Lesson> {
        self.subjects
            .iter()
            .flat_map(|s| s.chapters.iter())
            .flat_map(|c| c.lessons.iter())
            .find(|l| l.id == id)
    }

    pub(crate) fn find_lesson_mut(&mut self, id: &str) -> Option<&mut Lesson> {
        self.subjects
            .iter_mut()
            .flat_map(|s| s.chapters.iter_mut())
            .flat_map(|c| c.lessons.iter_mut())
            .find(|l| l.id == id)
    }

    pub fn find_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub(crate) fn find_goal_mut(&mut self, id: &str) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    pub fn find_preparation(&self, id: &str) -> Option<&Preparation> {
        self.preparations.iter().find(|p| p.id == id)
    }

    pub(crate) fn find_preparation_mut(&mut self, id: &str) -> Option<&mut Preparation> {
        self.preparations.iter_mut().find(|p| p.id == id)
    }

    /// Resolve a weak subject reference to the subject's name, if the
    /// subject still exists
    pub fn subject_name(&self, subject_id: &str) -> Option<&str> {
        self.find_subject(subject_id).map(|s| s.name.as_str())
    }

    // Removals. All of these return the removed entity, or `None` when the
    // id is already gone.

    /// Remove a subject with everything it owns. Goals and preparations
    /// referencing it are left in place with a now-dangling reference.
    pub(crate) fn remove_subject(&mut self, id: &str) -> Option<Subject> {
        let pos = self.subjects.iter().position(|s| s.id == id)?;
        Some(self.subjects.remove(pos))
    }

    pub(crate) fn remove_chapter(&mut self, id: &str) -> Option<Chapter> {
        for subject in &mut self.subjects {
            if let Some(pos) = subject.chapters.iter().position(|c| c.id == id) {
                return Some(subject.chapters.remove(pos));
            }
        }
        None
    }

    pub(crate) fn remove_lesson(&mut self, id: &str) -> Option<Lesson> {
        for chapter in self
            .subjects
            .iter_mut()
            .flat_map(|s| s.chapters.iter_mut())
        {
            if let Some(pos) = chapter.lessons.iter().position(|l| l.id == id) {
                return Some(chapter.lessons.remove(pos));
            }
        }
        None
    }

    pub(crate) fn remove_goal(&mut self, id: &str) -> Option<Goal> {
        let pos = self.goals.iter().position(|g| g.id == id)?;
        Some(self.goals.remove(pos))
    }

    pub(crate) fn remove_preparation(&mut self, id: &str) -> Option<Preparation> {
        let pos = self.preparations.iter().position(|p| p.id == id)?;
        Some(self.preparations.remove(pos))
    }

    /// Coerce freshly loaded data into the strict internal shape.
    ///
    /// Goals are clamped into their progress invariant, and the id counter
    /// is bumped past every id already present so legacy payloads without a
    /// persisted counter cannot produce colliding ids.
    pub(crate) fn normalize(&mut self) {
        for goal in &mut self.goals {
            goal.normalize();
        }

        let mut max_suffix = 0;
        {
            let mut track = |id: &str| max_suffix = max_suffix.max(id_suffix(id));
            for subject in &self.subjects {
                track(&subject.id);
                for chapter in &subject.chapters {
                    track(&chapter.id);
                    for lesson in &chapter.lessons {
                        track(&lesson.id);
                    }
                }
            }
            for goal in &self.goals {
                track(&goal.id);
            }
            for prep in &self.preparations {
                track(&prep.id);
            }
        }
        self.id_counter = self.id_counter.max(max_suffix);
    }
}

/// Numeric suffix of a generated id ("goal-12" -> 12), 0 for foreign ids
fn id_suffix(id: &str) -> u64 {
    id.rsplit('-')
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
