/// A keystroke-level request from the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    TogglePause,
    Quit,
    ToggleMode,
    Reload,
    SilenceAlarm,
    ToggleTick,
}

impl SessionCommand {
    /// Key bindings shown once when a session starts.
    pub const HELP: [&'static str; 2] = [
        "(q) Quit        (t) Toggle Mode     (space) Pause/Resume",
        "   (k) Toggle tick    (r) Reload    (s) Turn Off Alarm",
    ];

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            ' ' => Some(Self::TogglePause),
            'q' => Some(Self::Quit),
            't' => Some(Self::ToggleMode),
            'r' => Some(Self::Reload),
            's' => Some(Self::SilenceAlarm),
            'k' => Some(Self::ToggleTick),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(SessionCommand::from_key(' '), Some(SessionCommand::TogglePause));
        assert_eq!(SessionCommand::from_key('q'), Some(SessionCommand::Quit));
        assert_eq!(SessionCommand::from_key('t'), Some(SessionCommand::ToggleMode));
        assert_eq!(SessionCommand::from_key('r'), Some(SessionCommand::Reload));
        assert_eq!(SessionCommand::from_key('s'), Some(SessionCommand::SilenceAlarm));
        assert_eq!(SessionCommand::from_key('k'), Some(SessionCommand::ToggleTick));
        assert_eq!(SessionCommand::from_key('Q'), None);
        assert_eq!(SessionCommand::from_key('x'), None);
    }
}
