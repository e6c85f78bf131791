use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Rest,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Work => Mode::Rest,
            Mode::Rest => Mode::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Rest => "Rest",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Durations (seconds) and defaults that seed a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub work_duration: u64,
    pub rest_duration: u64,
    pub tick_enabled: bool,
}

impl TimerConfig {
    pub fn duration(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::Rest => self.rest_duration,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: 25 * 60,
            rest_duration: 5 * 60,
            tick_enabled: true,
        }
    }
}

/// Everything that changes during a pomodoro session.
///
/// Mutated only by [`super::PomodoroEngine`]; `remaining_secs` is back at the
/// full duration of the new mode as soon as a countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub paused: bool,
    /// Cleared by the user to silence a ringing alarm.
    pub alarm_armed: bool,
    pub alarm_ringing: bool,
    pub tick_enabled: bool,
    /// Active task ids seen by the previous reminder poll.
    pub active_task_ids: BTreeSet<TaskId>,
    /// Sub-ticks accumulated towards the next full second.
    pub sub_ticks: u8,
}

impl TimerState {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            mode: Mode::Work,
            remaining_secs: config.work_duration,
            paused: false,
            alarm_armed: false,
            alarm_ringing: false,
            tick_enabled: config.tick_enabled,
            active_task_ids: BTreeSet::new(),
            sub_ticks: 0,
        }
    }

    /// `"<Work|Rest> HH:MM:SS"`.
    pub fn display(&self) -> String {
        format!("{} {}", self.mode, format_counter(self.remaining_secs))
    }
}

/// `HH:MM:SS`; hours are not wrapped.
pub fn format_counter(secs: u64) -> String {
    let (hours, rest) = (secs / 3600, secs % 3600);
    format!("{:02}:{:02}:{:02}", hours, rest / 60, rest % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_formatting() {
        assert_eq!(format_counter(0), "00:00:00");
        assert_eq!(format_counter(25 * 60), "00:25:00");
        assert_eq!(format_counter(3661), "01:01:01");
        assert_eq!(format_counter(100 * 3600), "100:00:00");
    }

    #[test]
    fn new_state_starts_in_work() {
        let cfg = TimerConfig {
            work_duration: 90,
            rest_duration: 30,
            tick_enabled: false,
        };
        let state = TimerState::new(&cfg);
        assert_eq!(state.mode, Mode::Work);
        assert_eq!(state.remaining_secs, 90);
        assert!(!state.paused && !state.alarm_armed && !state.alarm_ringing);
        assert!(!state.tick_enabled);
        assert!(state.active_task_ids.is_empty());
        assert_eq!(state.display(), "Work 00:01:30");
    }
}
