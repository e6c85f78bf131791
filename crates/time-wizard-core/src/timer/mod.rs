mod command;
mod engine;
mod state;

pub use command::SessionCommand;
pub use engine::{PomodoroEngine, Tick, SUB_TICKS_PER_SECOND};
pub use state::{format_counter, Mode, TimerConfig, TimerState};
