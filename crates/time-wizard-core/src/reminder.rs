//! Reminder evaluation.
//!
//! A task is *active* while the present moment lies strictly inside its
//! reminder window `(start, start + remind_for)`, where `start` is its
//! `remind_on` expression resolved against the present wall-clock day.
//! Both bounds are exclusive.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::recurrence::{self, WallClock};
use crate::task::{Task, TaskId};

/// Reminder window of one task on one day.
#[derive(Debug, Clone)]
pub struct ReminderWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub stop: DateTime<Tz>,
}

impl<Tz: TimeZone> ReminderWindow<Tz> {
    pub fn contains(&self, now: &DateTime<Tz>) -> bool {
        self.start < *now && *now < self.stop
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderEvaluator;

impl ReminderEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Window of `task` for the day containing `now`, in `now`'s time zone.
    ///
    /// `None` when the expression does not resolve today.
    pub fn window<Tz: TimeZone>(
        &self,
        task: &Task,
        now: &DateTime<Tz>,
    ) -> Option<ReminderWindow<Tz>> {
        let clock = WallClock::from_datetime(now);
        let start = recurrence::resolve_in(&task.remind_on, &clock, &now.timezone())?;
        let length = TimeDelta::try_seconds(i64::try_from(task.remind_for).ok()?)?;
        let stop = start.clone().checked_add_signed(length)?;
        Some(ReminderWindow { start, stop })
    }

    pub fn is_active<Tz: TimeZone>(&self, task: &Task, now: &DateTime<Tz>) -> bool {
        self.window(task, now).is_some_and(|w| w.contains(now))
    }

    /// Tasks whose reminder window contains `now`, in input order.
    pub fn active_tasks<'a, Tz: TimeZone>(
        &self,
        tasks: &'a [Task],
        now: &DateTime<Tz>,
    ) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.is_active(t, now)).collect()
    }

    /// Ids of the currently active tasks. Never mutates `tasks`.
    pub fn poll<Tz: TimeZone>(&self, tasks: &[Task], now: &DateTime<Tz>) -> BTreeSet<TaskId> {
        self.active_tasks(tasks, now).into_iter().map(|t| t.id).collect()
    }
}
