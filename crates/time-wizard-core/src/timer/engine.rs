//! Pomodoro engine.
//!
//! A work/rest state machine driven by sub-ticks. It has no thread or timer
//! of its own: the caller invokes `tick()` once per sub-tick (100ms) and
//! forwards keystroke commands through `handle()`.
//!
//! ## State Transitions
//!
//! ```text
//! Work <-> Rest    (countdown reaches zero: switch cue; or manual toggle: no cue)
//! ```
//!
//! Every sub-tick also polls the reminder evaluator. The alarm is
//! edge-triggered: it starts ringing whenever the active task set differs
//! from the previous poll, including when the last active task drops out.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(config.timer_config(), store)?;
//! loop {
//!     let tick = engine.tick(&Local::now());
//!     // render tick.display, play tick.cues
//! }
//! ```

use chrono::{DateTime, TimeZone, Utc};

use super::command::SessionCommand;
use super::state::{Mode, TimerConfig, TimerState};
use crate::audio::Cue;
use crate::error::Result;
use crate::events::Event;
use crate::reminder::ReminderEvaluator;
use crate::task::{Task, TaskStore};

/// Sub-ticks that make up one second of countdown.
pub const SUB_TICKS_PER_SECOND: u8 = 10;

/// Outcome of a single sub-tick.
#[derive(Debug, Clone)]
pub struct Tick {
    /// `"<Work|Rest> HH:MM:SS"`, rendered every sub-tick.
    pub display: String,
    /// Cues to play, in order.
    pub cues: Vec<Cue>,
    pub events: Vec<Event>,
}

pub struct PomodoroEngine<S> {
    config: TimerConfig,
    state: TimerState,
    store: S,
    tasks: Vec<Task>,
    evaluator: ReminderEvaluator,
}

impl<S: TaskStore> PomodoroEngine<S> {
    /// Create an engine in `Work` mode and load the initial task list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot produce the initial tasks.
    pub fn new(config: TimerConfig, store: S) -> Result<Self> {
        let tasks = store.load_tasks()?;
        Ok(Self {
            config,
            state: TimerState::new(&config),
            store,
            tasks,
            evaluator: ReminderEvaluator::new(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn display(&self) -> String {
        self.state.display()
    }

    // ── Ticking ──────────────────────────────────────────────────────

    /// Advance by one sub-tick.
    ///
    /// Every tenth sub-tick completes a second: the countdown drops by one
    /// unless paused, and a cue is selected (alarm over tick). Reminders are
    /// polled on every sub-tick, paused or not.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Tick {
        let at = now.with_timezone(&Utc);
        let mut cues = Vec::new();
        let mut events = Vec::new();

        self.state.sub_ticks += 1;
        let full_second = self.state.sub_ticks >= SUB_TICKS_PER_SECOND;
        if full_second {
            self.state.sub_ticks = 0;
            if !self.state.paused {
                self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
                if self.state.remaining_secs == 0 {
                    cues.push(Cue::Switch);
                    events.push(self.switch_mode(false, at));
                }
            }
        }

        if let Some(event) = self.poll_reminders(now, at) {
            events.push(event);
        }

        if full_second {
            cues.extend(self.cue());
        }

        Tick {
            display: self.display(),
            cues,
            events,
        }
    }

    /// Cue for the current second, alarm first.
    pub fn cue(&self) -> Option<Cue> {
        if self.state.alarm_ringing && self.state.alarm_armed {
            Some(Cue::Alarm)
        } else if self.state.tick_enabled && self.state.mode == Mode::Work {
            Some(Cue::Tick)
        } else {
            None
        }
    }

    fn poll_reminders<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        at: DateTime<Utc>,
    ) -> Option<Event> {
        let active = self.evaluator.poll(&self.tasks, now);
        if active == self.state.active_task_ids {
            return None;
        }
        self.state.alarm_ringing = true;
        self.state.alarm_armed = true;
        let event = Event::RemindersChanged {
            active: active.iter().copied().collect(),
            at,
        };
        self.state.active_task_ids = active;
        Some(event)
    }

    fn switch_mode(&mut self, manual: bool, at: DateTime<Utc>) -> Event {
        let from = self.state.mode;
        let to = from.toggled();
        self.state.mode = to;
        self.state.remaining_secs = self.config.duration(to);
        Event::ModeSwitched {
            from,
            to,
            manual,
            at,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a session command. `Quit` is the caller's business.
    pub fn handle(&mut self, command: SessionCommand) -> Option<Event> {
        match command {
            SessionCommand::TogglePause => Some(self.toggle_pause()),
            SessionCommand::ToggleMode => Some(self.toggle_mode()),
            SessionCommand::Reload => self.reload(),
            SessionCommand::SilenceAlarm => Some(self.silence_alarm()),
            SessionCommand::ToggleTick => Some(self.toggle_tick()),
            SessionCommand::Quit => None,
        }
    }

    pub fn toggle_pause(&mut self) -> Event {
        self.state.paused = !self.state.paused;
        let remaining_secs = self.state.remaining_secs;
        let at = Utc::now();
        if self.state.paused {
            Event::Paused { remaining_secs, at }
        } else {
            Event::Resumed { remaining_secs, at }
        }
    }

    /// Flip mode and restart the countdown without a switch cue.
    pub fn toggle_mode(&mut self) -> Event {
        self.switch_mode(true, Utc::now())
    }

    /// Re-read tasks from the store.
    ///
    /// On failure the previous task list stays in effect.
    pub fn reload(&mut self) -> Option<Event> {
        match self.store.load_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                Some(Event::TasksReloaded {
                    count: self.tasks.len(),
                    at: Utc::now(),
                })
            }
            Err(e) => {
                tracing::warn!("task reload failed, keeping {} tasks: {e}", self.tasks.len());
                None
            }
        }
    }

    /// Disarm the alarm; `alarm_ringing` is left alone.
    pub fn silence_alarm(&mut self) -> Event {
        self.state.alarm_armed = false;
        Event::AlarmSilenced { at: Utc::now() }
    }

    pub fn toggle_tick(&mut self) -> Event {
        self.state.tick_enabled = !self.state.tick_enabled;
        Event::TickToggled {
            enabled: self.state.tick_enabled,
            at: Utc::now(),
        }
    }
}
