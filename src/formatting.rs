//! Formatting helper functions for displaying study data as plain text.
//!
//! Everything here is read-only over a store snapshot; the CLI prints the
//! returned strings verbatim.

use crate::study::{self, StudyData, due_date_index};
use chrono::NaiveDate;

/// Format the progress overview: overall percentage, lesson totals and a
/// per-subject, per-chapter breakdown.
pub fn format_overview(data: &StudyData) -> String {
    let subjects = data.subjects();
    let mut result = format!(
        "Overall: {}% ({}/{} lessons completed)\n",
        study::overall_progress(subjects),
        study::completed_lessons_count(subjects),
        study::total_lessons_count(subjects),
    );

    if subjects.is_empty() {
        result.push_str("No subjects yet\n");
        return result;
    }

    for subject in subjects {
        let (completed, total) = study::subject_lesson_counts(subject);
        result.push_str(&format!(
            "- [{}] {}: {}% ({}/{} lessons)\n",
            subject.id,
            subject.name,
            study::subject_progress(subject),
            completed,
            total
        ));
        for chapter in &subject.chapters {
            result.push_str(&format!(
                "    [{}] {}: {}% ({} lessons)\n",
                chapter.id,
                chapter.name,
                study::chapter_progress(chapter),
                chapter.lessons.len()
            ));
        }
    }

    result
}

/// Format the goal list with achieved/overdue markers.
///
/// Subject references that no longer resolve are rendered as "Unknown".
pub fn format_goals(data: &StudyData, today: NaiveDate) -> String {
    if data.goals().is_empty() {
        return "No goals set yet".to_string();
    }

    let mut result = format!("Found {} goal(s):\n\n", data.goals().len());
    for goal in data.goals() {
        let subject_name = data.subject_name(&goal.subject_id).unwrap_or("Unknown");

        let mut markers = String::new();
        if goal.is_achieved() {
            markers.push_str(" [achieved]");
        }
        if goal.is_overdue(today) {
            markers.push_str(" [overdue]");
        }

        result.push_str(&format!(
            "- [{}] {} (subject: {}, progress: {}/{}){}\n",
            goal.id, goal.title, subject_name, goal.progress, goal.quantity, markers
        ));
        if let Some(end_date) = goal.end_date {
            result.push_str(&format!("  Due: {}\n", end_date));
        }
        if let Some(ref notes) = goal.notes {
            result.push_str(&format!("  Notes: {}\n", notes));
        }
    }

    result
}

/// Format goals grouped by due date, soonest first
pub fn format_calendar(data: &StudyData) -> String {
    let index = due_date_index(data.goals());
    if index.is_empty() {
        return "No goals with a due date".to_string();
    }

    let mut result = String::new();
    for (date, goals) in &index {
        result.push_str(&format!("{}:\n", date));
        for goal in goals {
            result.push_str(&format!(
                "  - {} ({}/{})\n",
                goal.title, goal.progress, goal.quantity
            ));
        }
    }

    result
}

/// Format the preparation notes list, with "Unknown" for dangling subject
/// references
pub fn format_preparations(data: &StudyData) -> String {
    if data.preparations().is_empty() {
        return "No preparations yet".to_string();
    }

    let mut result = String::new();
    for prep in data.preparations() {
        let subject_name = data.subject_name(&prep.subject_id).unwrap_or("Unknown");
        result.push_str(&format!(
            "- [{}] {} (subject: {})\n",
            prep.id, prep.title, subject_name
        ));
        if !prep.notes.is_empty() {
            result.push_str(&format!("  {}\n", prep.notes));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::{Chapter, Goal, Lesson, Subject};

    fn data_with_goal(subject_id: &str) -> StudyData {
        let mut data = StudyData::new();
        data.subjects.push(Subject {
            id: "subject-1".to_string(),
            name: "Rust".to_string(),
            chapters: vec![Chapter {
                id: "chapter-2".to_string(),
                name: "Ownership".to_string(),
                lessons: vec![Lesson {
                    id: "lesson-3".to_string(),
                    name: "Borrowing".to_string(),
                    completed: true,
                    notes: String::new(),
                }],
            }],
        });
        data.goals.push(Goal {
            id: "goal-4".to_string(),
            title: "Read the book".to_string(),
            subject_id: subject_id.to_string(),
            quantity: 2,
            progress: 1,
            completed: false,
            start_date: None,
            end_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            notes: None,
        });
        data
    }

    #[test]
    fn overview_shows_overall_and_breakdown() {
        let data = data_with_goal("subject-1");
        let text = format_overview(&data);
        assert!(text.contains("Overall: 100% (1/1 lessons completed)"));
        assert!(text.contains("Rust: 100%"));
        assert!(text.contains("Ownership: 100%"));
    }

    #[test]
    fn goals_render_subject_name_when_it_resolves() {
        let data = data_with_goal("subject-1");
        let text = format_goals(&data, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(text.contains("subject: Rust"));
        assert!(!text.contains("[overdue]"));
    }

    #[test]
    fn dangling_subject_reference_renders_as_unknown() {
        let data = data_with_goal("subject-99");
        let text = format_goals(&data, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(text.contains("subject: Unknown"));
    }

    #[test]
    fn overdue_goal_gets_a_marker() {
        let data = data_with_goal("subject-1");
        let text = format_goals(&data, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!(text.contains("[overdue]"));
    }

    #[test]
    fn calendar_groups_by_date() {
        let data = data_with_goal("subject-1");
        let text = format_calendar(&data);
        assert!(text.starts_with("2024-03-01:\n"));
        assert!(text.contains("Read the book (1/2)"));
    }

    #[test]
    fn empty_store_has_friendly_messages() {
        let data = StudyData::new();
        assert!(format_overview(&data).contains("No subjects yet"));
        assert_eq!(
            format_goals(&data, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            "No goals set yet"
        );
        assert_eq!(format_calendar(&data), "No goals with a due date");
        assert_eq!(format_preparations(&data), "No preparations yet");
    }
}
