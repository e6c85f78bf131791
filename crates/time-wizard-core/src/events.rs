use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskId;
use crate::timer::Mode;

/// Every state change of a pomodoro session produces an Event.
/// The terminal controller logs them; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// `manual` is false when the countdown ran out.
    ModeSwitched {
        from: Mode,
        to: Mode,
        manual: bool,
        at: DateTime<Utc>,
    },
    /// The set of active reminders differs from the previous poll.
    RemindersChanged {
        active: Vec<TaskId>,
        at: DateTime<Utc>,
    },
    TasksReloaded {
        count: usize,
        at: DateTime<Utc>,
    },
    AlarmSilenced {
        at: DateTime<Utc>,
    },
    TickToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
}
