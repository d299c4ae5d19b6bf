//! Grouping of tasks by calendar week, and per-week progress
//!
//! Weeks start on Mondays. A week is identified by the date of its Monday.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::task::Task;

/// How a week boundary is displayed in labels, e.g. `Mar 4`
const LABEL_DATE_FORMAT: &str = "%b %-d";


/// Returns the Monday that starts the week `datetime` belongs to.
///
/// Sundays belong to the week that started 6 days earlier.
pub fn week_start(datetime: &NaiveDateTime) -> NaiveDate {
    let date = datetime.date();
    let days_since_monday = date.weekday().num_days_from_monday();
    date - Duration::days(i64::from(days_since_monday))
}

/// Tasks that belong to the same week
#[derive(Clone, Debug, PartialEq)]
pub struct WeekBucket<'a> {
    key: NaiveDate,
    tasks: Vec<&'a Task>,
}

impl<'a> WeekBucket<'a> {
    /// The Monday this week starts on
    pub fn key(&self) -> NaiveDate {
        self.key
    }

    /// The ISO date of the key, e.g. `2024-03-04`
    pub fn key_string(&self) -> String {
        self.key.format("%Y-%m-%d").to_string()
    }

    /// The Sunday this week ends on
    pub fn last_day(&self) -> NaiveDate {
        self.key + Duration::days(6)
    }

    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// E.g. `Mar 4 - Mar 10`
    pub fn date_range_label(&self) -> String {
        format!("{} - {}",
            self.key.format(LABEL_DATE_FORMAT),
            self.last_day().format(LABEL_DATE_FORMAT))
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.tasks.iter().copied())
    }
}

/// Partition tasks by week.
///
/// Buckets are returned in the order their first task was met, and tasks keep their relative order inside a bucket.
/// No bucket is ever empty.
pub fn group_by_week<'a, I>(tasks: I) -> Vec<WeekBucket<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets: Vec<WeekBucket<'a>> = Vec::new();
    let mut index_of: HashMap<NaiveDate, usize> = HashMap::new();

    for task in tasks {
        let key = week_start(task.datetime());
        match index_of.get(&key) {
            Some(&i) => buckets[i].tasks.push(task),
            None => {
                index_of.insert(key, buckets.len());
                buckets.push(WeekBucket { key, tasks: vec![task] });
            },
        }
    }
    buckets
}


/// How many tasks of a group are completed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    completed: usize,
    total: usize,
}

impl Progress {
    pub fn of<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().fold(Self::default(), |acc, task| Self {
            completed: acc.completed + usize::from(task.completed()),
            total: acc.total + 1,
        })
    }

    pub fn completed(&self) -> usize { self.completed }
    pub fn total(&self) -> usize     { self.total }

    /// Tasks that are still in progress
    pub fn open(&self) -> usize {
        self.total - self.completed
    }

    /// `round(100 * completed / total)`, halves rounding up. An empty group is at 0%
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rounded = (200 * self.completed + self.total) / (2 * self.total);
        rounded as u8
    }
}
