use serde::{Deserialize, Serialize};

/// A subject of study (e.g. "Linear Algebra").
///
/// Subjects own their chapters exclusively; deleting a subject takes every
/// chapter and lesson under it along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier (e.g. "subject-3")
    pub id: String,
    /// Display name
    pub name: String,
    /// Chapters in study order
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// A chapter inside a subject, owning its lessons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    /// Lessons in study order. Absent on legacy records, treated as empty.
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A single lesson, the leaf of the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub name: String,
    /// Whether the lesson has been worked through
    #[serde(default)]
    pub completed: bool,
    /// Free-form notes in Markdown format
    #[serde(default)]
    pub notes: String,
}

/// Field updates applied by lesson edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct LessonEdit {
    pub name: Option<String>,
    pub completed: Option<bool>,
    pub notes: Option<String>,
}
