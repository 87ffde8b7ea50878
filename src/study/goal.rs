use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_quantity() -> u32 {
    1
}

/// A quantity-based goal tied to a subject.
///
/// A goal tracks `progress` repetitions out of `quantity` and flips to
/// completed when the quantity is reached. The invariant
/// `0 <= progress <= quantity` holds after every mutation, and
/// `completed == true` implies `progress == quantity`. The reverse does not
/// hold: un-completing a goal keeps its partial credit, so
/// `progress == quantity && !completed` is a legal state.
///
/// `subject_id` is a weak reference. Deleting the subject leaves the goal in
/// place; lookups resolve the reference as not found and display code
/// renders it as "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier (e.g. "goal-7")
    pub id: String,
    /// Title describing the goal
    pub title: String,
    /// Weak reference to the subject this goal belongs to
    pub subject_id: String,
    /// Target number of repetitions, at least 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Repetitions done so far, in `[0, quantity]`
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Optional additional notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Field updates applied by goal edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct GoalEdit {
    pub title: Option<String>,
    pub subject_id: Option<String>,
    pub quantity: Option<u32>,
    pub notes: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Goal {
    /// Advance progress by one unit.
    ///
    /// Does nothing on a completed goal or when the quantity is already
    /// reached. Returns `true` when this call transitioned the goal to
    /// completed, so the caller can record the day for streak tracking.
    pub fn increment(&mut self) -> bool {
        if self.completed || self.progress >= self.quantity {
            return false;
        }
        self.progress += 1;
        if self.progress == self.quantity {
            self.completed = true;
            return true;
        }
        false
    }

    /// Force the completion state.
    ///
    /// Completing snaps `progress` to `quantity`. Un-completing keeps the
    /// current progress, so partial credit survives. Returns `true` when the
    /// goal newly became completed.
    pub fn set_completed(&mut self, completed: bool) -> bool {
        if completed {
            let newly_completed = !self.completed;
            self.progress = self.quantity;
            self.completed = true;
            newly_completed
        } else {
            self.completed = false;
            false
        }
    }

    /// Apply an edit, preserving the progress invariant.
    ///
    /// A quantity below the current progress caps the progress down, and the
    /// completion state is recomputed as `progress >= quantity` afterwards.
    /// The caller validates title and subject reference beforehand.
    pub fn apply_edit(&mut self, edit: GoalEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(subject_id) = edit.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(quantity) = edit.quantity {
            self.quantity = quantity.max(1);
        }
        if let Some(notes) = edit.notes {
            self.notes = Some(notes);
        }
        if let Some(start_date) = edit.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = edit.end_date {
            self.end_date = Some(end_date);
        }
        if self.progress > self.quantity {
            self.progress = self.quantity;
        }
        self.completed = self.progress >= self.quantity;
    }

    /// Coerce a persisted record into the invariant, once at the load
    /// boundary: quantity at least 1, progress clamped, and a completed goal
    /// snapped to full progress.
    pub fn normalize(&mut self) {
        if self.quantity == 0 {
            self.quantity = 1;
        }
        if self.progress > self.quantity {
            self.progress = self.quantity;
        }
        if self.completed {
            self.progress = self.quantity;
        }
    }

    /// A goal counts as achieved once completed or once progress has
    /// reached the quantity, whichever is recorded.
    pub fn is_achieved(&self) -> bool {
        self.completed || self.progress >= self.quantity
    }

    /// Overdue means the due date has passed without the goal being
    /// achieved. Goals without an end date are never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.end_date {
            Some(end_date) => today > end_date && !self.is_achieved(),
            None => false,
        }
    }
}

/// Group goals by their due date for calendar lookups.
///
/// Goals without an end date are excluded. Per-day lists keep the order the
/// goals have in the store, and the map iterates in date order.
pub fn due_date_index(goals: &[Goal]) -> BTreeMap<NaiveDate, Vec<&Goal>> {
    let mut index: BTreeMap<NaiveDate, Vec<&Goal>> = BTreeMap::new();
    for goal in goals {
        if let Some(end_date) = goal.end_date {
            index.entry(end_date).or_default().push(goal);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(quantity: u32, progress: u32, completed: bool) -> Goal {
        Goal {
            id: "goal-1".to_string(),
            title: "Read chapter".to_string(),
            subject_id: "subject-1".to_string(),
            quantity,
            progress,
            completed,
            start_date: None,
            end_date: None,
            notes: None,
        }
    }

    #[test]
    fn increment_reaches_quantity_and_completes() {
        let mut g = goal(3, 2, false);
        assert!(g.increment());
        assert_eq!(g.progress, 3);
        assert!(g.completed);
    }

    #[test]
    fn increment_on_completed_goal_is_a_noop() {
        let mut g = goal(3, 3, true);
        assert!(!g.increment());
        assert_eq!(g.progress, 3);
        assert!(g.completed);
    }

    #[test]
    fn increment_only_transitions_once() {
        let mut g = goal(2, 0, false);
        assert!(!g.increment());
        assert!(g.increment());
        assert!(!g.increment());
        assert_eq!(g.progress, 2);
    }

    #[test]
    fn set_completed_snaps_progress_up() {
        let mut g = goal(5, 1, false);
        assert!(g.set_completed(true));
        assert_eq!(g.progress, 5);
        assert!(g.completed);
        // Already completed, no new transition
        assert!(!g.set_completed(true));
    }

    #[test]
    fn uncompleting_keeps_partial_credit() {
        let mut g = goal(5, 5, true);
        assert!(!g.set_completed(false));
        assert_eq!(g.progress, 5);
        assert!(!g.completed);
        assert!(g.is_achieved());
    }

    #[test]
    fn edit_caps_progress_to_lowered_quantity() {
        let mut g = goal(5, 4, false);
        g.apply_edit(GoalEdit {
            quantity: Some(2),
            ..Default::default()
        });
        assert_eq!(g.progress, 2);
        assert!(g.completed);
    }

    #[test]
    fn edit_raising_quantity_uncompletes() {
        let mut g = goal(2, 2, true);
        g.apply_edit(GoalEdit {
            quantity: Some(4),
            ..Default::default()
        });
        assert_eq!(g.progress, 2);
        assert!(!g.completed);
    }

    #[test]
    fn normalize_clamps_loaded_records() {
        let mut g = goal(0, 9, false);
        g.normalize();
        assert_eq!(g.quantity, 1);
        assert_eq!(g.progress, 1);

        let mut g = goal(5, 2, true);
        g.normalize();
        assert_eq!(g.progress, 5);
        assert!(g.completed);
    }

    #[test]
    fn overdue_requires_past_due_date_and_no_achievement() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut g = goal(3, 1, false);
        g.end_date = Some(due);
        assert!(g.is_overdue(today));
        assert!(!g.is_overdue(due));

        g.set_completed(true);
        assert!(!g.is_overdue(today));

        let g = goal(3, 1, false);
        assert!(!g.is_overdue(today));
    }

    #[test]
    fn due_date_index_groups_by_end_date() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut a = goal(1, 0, false);
        a.id = "goal-1".to_string();
        a.end_date = Some(due);
        let mut b = goal(1, 0, false);
        b.id = "goal-2".to_string();
        b.end_date = Some(due);
        let c = goal(1, 0, false);

        let goals = vec![a, b, c];
        let index = due_date_index(&goals);
        assert_eq!(index.len(), 1);
        let on_day = &index[&due];
        assert_eq!(on_day.len(), 2);
        assert_eq!(on_day[0].id, "goal-1");
        assert_eq!(on_day[1].id, "goal-2");
    }
}
