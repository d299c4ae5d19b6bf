//! Some utility functions

use crate::app::WeekView;
use crate::task::Task;

/// How task due dates are displayed
const DISPLAY_DATETIME_FORMAT: &str = "%a %b %-d %Y, %H:%M";

/// A debug utility that pretty-prints weeks
pub fn print_weeks(weeks: &[WeekView<'_>]) {
    for week in weeks {
        let fold = if week.open { "▾" } else { "▸" };
        println!("{} {}\t{} Open, {} Completed ({}%)",
            fold, week.label, week.progress.open(), week.progress.completed(), week.progress.percent());
        if week.open {
            for task in week.tasks() {
                print_task(task);
            }
        }
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    println!("    {} {}\t[{}] {}\t{}",
        completion, task.title(), task.priority(), task.datetime().format(DISPLAY_DATETIME_FORMAT), task.id());
    if task.description().is_empty() == false {
        println!("        {}", task.description());
    }
}

