//! # Time Wizard Core Library
//!
//! Business logic for `time-wizard`, a kanban task board combined with an
//! interactive pomodoro timer. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Recurrence**: resolves phrases like `every monday 09:00` into
//!   timestamps for the current day
//! - **Reminders**: decides which tasks are inside their reminder window
//! - **Timer Engine**: a sub-tick driven work/rest state machine that the
//!   caller ticks every 100ms; it polls reminders and picks audio cues
//! - **Storage**: TOML configuration and the JSON kanban file
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: Core timer state machine
//! - [`ReminderEvaluator`]: Active-task detection
//! - [`KanbanStore`]: Boards and tasks on disk, also a [`TaskStore`]
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod recurrence;
pub mod reminder;
pub mod storage;
pub mod task;
pub mod timer;

pub use audio::{CommandPlayer, Cue, CuePlayer, SilentPlayer};
pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use recurrence::WallClock;
pub use reminder::{ReminderEvaluator, ReminderWindow};
pub use storage::{Config, Kanban, KanbanStore, TaskFields};
pub use task::{MemoryStore, Task, TaskId, TaskStore};
pub use timer::{Mode, PomodoroEngine, SessionCommand, Tick, TimerConfig, TimerState};
