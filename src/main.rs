//! Study Tracker - Main Entry Point
//!
//! Thin command-line frontend over the `study_tracker` library. All state
//! lives in the data file; every command loads it, applies at most one
//! mutation and prints a plain-text result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use study_tracker::{
    GoalEdit, LessonEdit, NewGoal, StudyTracker, formatting, local_date_today, parse_date,
};

/// Personal study tracker: subjects, chapters and lessons with goals,
/// progress and streaks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the study data file
    #[arg(long, default_value = "study.toml")]
    file: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show overall and per-subject progress
    Overview,
    /// List all goals with achieved/overdue markers
    Goals,
    /// Show goals grouped by due date
    Calendar,
    /// Show the current day-completion streak
    Streak,
    /// List preparation notes
    Preps,
    /// Add a subject
    AddSubject { name: String },
    /// Rename a subject
    RenameSubject { id: String, name: String },
    /// Delete a subject with all its chapters and lessons
    DeleteSubject { id: String },
    /// Add a chapter to a subject
    AddChapter { subject_id: String, name: String },
    /// Rename a chapter
    RenameChapter { id: String, name: String },
    /// Delete a chapter with all its lessons
    DeleteChapter { id: String },
    /// Add a lesson to a chapter
    AddLesson { chapter_id: String, name: String },
    /// Edit a lesson's name and/or notes
    EditLesson {
        lesson_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a lesson
    DeleteLesson { id: String },
    /// Mark a lesson as completed (or back to in-progress with --undo)
    CompleteLesson {
        lesson_id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Add a goal for a subject
    AddGoal {
        subject_id: String,
        title: String,
        /// Target number of repetitions (default 1)
        #[arg(long)]
        quantity: Option<u32>,
        /// Start date, YYYY-MM-DD (default today)
        #[arg(long)]
        start: Option<String>,
        /// Due date, YYYY-MM-DD (default one week from today)
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Advance a goal by one unit
    Bump { goal_id: String },
    /// Force a goal's completion state
    CompleteGoal {
        goal_id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Change a goal's target quantity
    SetQuantity { goal_id: String, quantity: u32 },
    /// Delete a goal
    DeleteGoal { id: String },
    /// Add a preparation note for a subject
    AddPrep {
        subject_id: String,
        title: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Edit a preparation note's title and/or notes
    EditPrep {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a preparation note
    DeletePrep { id: String },
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;
    let args = Args::parse();

    let mut tracker = StudyTracker::open(&args.file)?;
    match args.command {
        Command::Overview => print!("{}", formatting::format_overview(tracker.data())),
        Command::Goals => println!(
            "{}",
            formatting::format_goals(tracker.data(), local_date_today())
        ),
        Command::Calendar => println!("{}", formatting::format_calendar(tracker.data())),
        Command::Streak => println!("Current streak: {} day(s)", tracker.current_streak()),
        Command::Preps => println!("{}", formatting::format_preparations(tracker.data())),
        Command::AddSubject { name } => {
            let id = tracker.add_subject(&name)?;
            println!("Subject added with ID: {}", id);
        }
        Command::RenameSubject { id, name } => {
            tracker.rename_subject(&id, &name)?;
            println!("Subject {} renamed", id);
        }
        Command::DeleteSubject { id } => {
            if tracker.delete_subject(&id)? {
                println!("Subject {} deleted", id);
            } else {
                println!("Subject {} was already gone", id);
            }
        }
        Command::AddChapter { subject_id, name } => {
            let id = tracker.add_chapter(&subject_id, &name)?;
            println!("Chapter added with ID: {}", id);
        }
        Command::RenameChapter { id, name } => {
            tracker.rename_chapter(&id, &name)?;
            println!("Chapter {} renamed", id);
        }
        Command::DeleteChapter { id } => {
            if tracker.delete_chapter(&id)? {
                println!("Chapter {} deleted", id);
            } else {
                println!("Chapter {} was already gone", id);
            }
        }
        Command::AddLesson { chapter_id, name } => {
            let id = tracker.add_lesson(&chapter_id, &name)?;
            println!("Lesson added with ID: {}", id);
        }
        Command::EditLesson {
            lesson_id,
            name,
            notes,
        } => {
            tracker.update_lesson(
                &lesson_id,
                LessonEdit {
                    name,
                    notes,
                    ..Default::default()
                },
            )?;
            println!("Lesson {} updated", lesson_id);
        }
        Command::DeleteLesson { id } => {
            if tracker.delete_lesson(&id)? {
                println!("Lesson {} deleted", id);
            } else {
                println!("Lesson {} was already gone", id);
            }
        }
        Command::CompleteLesson { lesson_id, undo } => {
            tracker.set_lesson_completed(&lesson_id, !undo)?;
            println!(
                "Lesson {} marked as {}",
                lesson_id,
                if undo { "in progress" } else { "completed" }
            );
        }
        Command::AddGoal {
            subject_id,
            title,
            quantity,
            start,
            end,
            notes,
        } => {
            let start_date = start.as_deref().map(parse_date).transpose()?;
            let end_date = end.as_deref().map(parse_date).transpose()?;
            let id = tracker.add_goal(NewGoal {
                title,
                subject_id,
                quantity,
                start_date,
                end_date,
                notes,
            })?;
            println!("Goal added with ID: {}", id);
        }
        Command::Bump { goal_id } => {
            tracker.increment_goal(&goal_id)?;
            if let Some(goal) = tracker.find_goal(&goal_id) {
                println!(
                    "Goal {} at {}/{}{}",
                    goal_id,
                    goal.progress,
                    goal.quantity,
                    if goal.completed { ", completed" } else { "" }
                );
            }
        }
        Command::CompleteGoal { goal_id, undo } => {
            tracker.set_goal_completed(&goal_id, !undo)?;
            println!(
                "Goal {} marked as {}",
                goal_id,
                if undo { "incomplete" } else { "completed" }
            );
        }
        Command::SetQuantity { goal_id, quantity } => {
            tracker.edit_goal(
                &goal_id,
                GoalEdit {
                    quantity: Some(quantity),
                    ..Default::default()
                },
            )?;
            println!("Goal {} quantity set to {}", goal_id, quantity);
        }
        Command::DeleteGoal { id } => {
            if tracker.delete_goal(&id)? {
                println!("Goal {} deleted", id);
            } else {
                println!("Goal {} was already gone", id);
            }
        }
        Command::AddPrep {
            subject_id,
            title,
            notes,
        } => {
            let id = tracker.add_preparation(&subject_id, &title, &notes)?;
            println!("Preparation added with ID: {}", id);
        }
        Command::EditPrep { id, title, notes } => {
            tracker.edit_preparation(&id, title.as_deref(), notes.as_deref())?;
            println!("Preparation {} updated", id);
        }
        Command::DeletePrep { id } => {
            if tracker.delete_preparation(&id)? {
                println!("Preparation {} deleted", id);
            } else {
                println!("Preparation {} was already gone", id);
            }
        }
    }

    Ok(())
}
