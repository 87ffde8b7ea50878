//! Aggregation engine: completion percentages derived bottom-up from the
//! lesson leaves.
//!
//! All functions here are pure over a store snapshot. Nothing is cached;
//! every call re-derives its result from the current leaves, so deletes and
//! edits can never leave a stale percentage behind.

use super::subject::{Chapter, Lesson, Subject};

/// Percentage of completed items out of `total`, rounded half up to the
/// nearest integer (computed in f64; half away from zero equals half up for
/// the non-negative ratios that occur here). 0 when there are no items.
fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Completion percentage of a plain lesson sequence
pub fn lessons_progress(lessons: &[Lesson]) -> u8 {
    let completed = lessons.iter().filter(|l| l.completed).count();
    percent(completed, lessons.len())
}

/// Completion percentage of a chapter
pub fn chapter_progress(chapter: &Chapter) -> u8 {
    lessons_progress(&chapter.lessons)
}

/// Completed and total lesson counts over a set of chapters
fn lesson_counts<'a>(chapters: impl Iterator<Item = &'a Chapter>) -> (usize, usize) {
    let mut completed = 0;
    let mut total = 0;
    for chapter in chapters {
        total += chapter.lessons.len();
        completed += chapter.lessons.iter().filter(|l| l.completed).count();
    }
    (completed, total)
}

/// Completed and total lesson counts for one subject
pub fn subject_lesson_counts(subject: &Subject) -> (usize, usize) {
    lesson_counts(subject.chapters.iter())
}

/// Completion percentage of a subject.
///
/// The ratio is taken over the flattened lesson set across all chapters,
/// not as an average of per-chapter percentages: chapters with more lessons
/// weigh proportionally more.
pub fn subject_progress(subject: &Subject) -> u8 {
    let (completed, total) = subject_lesson_counts(subject);
    percent(completed, total)
}

/// Completion percentage across every subject, with the same flattening
/// rule as [`subject_progress`]
pub fn overall_progress(subjects: &[Subject]) -> u8 {
    let (completed, total) = lesson_counts(subjects.iter().flat_map(|s| s.chapters.iter()));
    percent(completed, total)
}

/// Total number of lessons across all subjects
pub fn total_lessons_count(subjects: &[Subject]) -> usize {
    subjects
        .iter()
        .flat_map(|s| s.chapters.iter())
        .map(|c| c.lessons.len())
        .sum()
}

/// Number of completed lessons across all subjects
pub fn completed_lessons_count(subjects: &[Subject]) -> usize {
    subjects
        .iter()
        .flat_map(|s| s.chapters.iter())
        .flat_map(|c| c.lessons.iter())
        .filter(|l| l.completed)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, completed: bool) -> Lesson {
        Lesson {
            id: id.to_string(),
            name: format!("Lesson {}", id),
            completed,
            notes: String::new(),
        }
    }

    fn chapter(id: &str, lessons: Vec<Lesson>) -> Chapter {
        Chapter {
            id: id.to_string(),
            name: format!("Chapter {}", id),
            lessons,
        }
    }

    #[test]
    fn empty_chapter_is_zero_percent() {
        assert_eq!(chapter_progress(&chapter("c1", vec![])), 0);
    }

    #[test]
    fn fully_completed_chapter_is_hundred_percent() {
        let c = chapter("c1", vec![lesson("l1", true), lesson("l2", true)]);
        assert_eq!(chapter_progress(&c), 100);
    }

    #[test]
    fn percentages_round_half_up() {
        // 1/3 -> 33.33 -> 33, 2/3 -> 66.67 -> 67, 1/8 -> 12.5 -> 13
        let third = chapter("c1", vec![lesson("l1", true), lesson("l2", false), lesson("l3", false)]);
        assert_eq!(chapter_progress(&third), 33);

        let two_thirds = chapter("c2", vec![lesson("l1", true), lesson("l2", true), lesson("l3", false)]);
        assert_eq!(chapter_progress(&two_thirds), 67);

        let mut lessons = vec![lesson("l1", true)];
        lessons.extend((2..=8).map(|i| lesson(&format!("l{}", i), false)));
        let eighth = chapter("c3", lessons);
        assert_eq!(chapter_progress(&eighth), 13);
    }

    #[test]
    fn subject_progress_flattens_instead_of_averaging() {
        // Chapter A: 1/1 complete, chapter B: 0/3 complete.
        // Flattened: 1 of 4 lessons -> 25, not the 50 an average would give.
        let subject = Subject {
            id: "s1".to_string(),
            name: "Maths".to_string(),
            chapters: vec![
                chapter("a", vec![lesson("l1", true)]),
                chapter(
                    "b",
                    vec![lesson("l2", false), lesson("l3", false), lesson("l4", false)],
                ),
            ],
        };
        assert_eq!(subject_progress(&subject), 25);
    }

    #[test]
    fn subject_with_no_lessons_is_zero_percent() {
        let subject = Subject {
            id: "s1".to_string(),
            name: "Maths".to_string(),
            chapters: vec![chapter("a", vec![]), chapter("b", vec![])],
        };
        assert_eq!(subject_progress(&subject), 0);
    }

    #[test]
    fn overall_progress_spans_all_subjects() {
        let subjects = vec![
            Subject {
                id: "s1".to_string(),
                name: "Maths".to_string(),
                chapters: vec![chapter("a", vec![lesson("l1", true), lesson("l2", true)])],
            },
            Subject {
                id: "s2".to_string(),
                name: "Physics".to_string(),
                chapters: vec![chapter("b", vec![lesson("l3", false), lesson("l4", false)])],
            },
        ];
        assert_eq!(overall_progress(&subjects), 50);
        assert_eq!(total_lessons_count(&subjects), 4);
        assert_eq!(completed_lessons_count(&subjects), 2);
    }

    #[test]
    fn no_subjects_means_zero_percent() {
        assert_eq!(overall_progress(&[]), 0);
        assert_eq!(total_lessons_count(&[]), 0);
        assert_eq!(completed_lessons_count(&[]), 0);
    }
}
