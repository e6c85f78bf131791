//! Interactive pomodoro session.
//!
//! Owns raw terminal mode and the 100ms cooperative loop: each iteration
//! ticks the engine, plays cues, overwrites the display line and only then
//! looks for a pending keystroke.

use std::io::{self, Write};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use time_wizard_core::{CuePlayer, Event, PomodoroEngine, SessionCommand, TaskStore};
use tokio::time::MissedTickBehavior;

/// One loop iteration.
pub const SUB_TICK: Duration = Duration::from_millis(100);

/// Width the display line is padded to, so shorter text erases longer text.
const LINE_WIDTH: usize = 30;

/// Keeps the terminal in raw, no-echo mode while alive.
///
/// The previous mode is restored on drop, which also covers early returns
/// and panics.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// # Errors
    /// Returns an error if the terminal cannot be switched to raw mode.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::error!("failed to restore terminal mode: {e}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Ctrl-C typed while in raw mode.
    Interrupt,
}

/// Non-blocking keystroke source.
pub trait KeySource {
    /// `Ok(None)` when nothing is pending.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;
}

/// Reads keys from the terminal via crossterm.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let TermEvent::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                if modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                    return Ok(Some(Key::Interrupt));
                }
                return Ok(Some(Key::Char(c)));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<S, P, W> {
    engine: PomodoroEngine<S>,
    player: P,
    out: W,
}

impl<S: TaskStore, P: CuePlayer, W: Write> Session<S, P, W> {
    pub fn new(engine: PomodoroEngine<S>, player: P, out: W) -> Self {
        Self {
            engine,
            player,
            out,
        }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        for line in SessionCommand::HELP {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    /// Tick, render, then handle at most one pending key.
    pub fn step<Tz: TimeZone, K: KeySource>(
        &mut self,
        now: &DateTime<Tz>,
        keys: &mut K,
    ) -> io::Result<Flow> {
        let tick = self.engine.tick(now);
        for cue in tick.cues {
            self.player.play(cue);
        }
        tick.events.iter().for_each(log_event);
        self.render(&tick.display)?;

        let command = match keys.poll_key()? {
            None => return Ok(Flow::Continue),
            Some(Key::Interrupt) => SessionCommand::Quit,
            Some(Key::Char(c)) => match SessionCommand::from_key(c) {
                Some(command) => command,
                None => return Ok(Flow::Continue),
            },
        };

        if command == SessionCommand::Quit {
            return Ok(Flow::Quit);
        }
        if let Some(event) = self.engine.handle(command) {
            log_event(&event);
        }
        Ok(Flow::Continue)
    }

    fn render(&mut self, display: &str) -> io::Result<()> {
        write!(self.out, "\r{display:<width$}", width = LINE_WIDTH)?;
        self.out.flush()
    }

    /// Run until quit or SIGINT. Terminal restoration is the caller's
    /// [`RawModeGuard`].
    pub async fn run<K: KeySource>(&mut self, keys: &mut K) -> io::Result<()> {
        let mut interval = tokio::time::interval(SUB_TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if self.step(&Local::now(), keys)? == Flow::Quit {
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    tracing::debug!("interrupted");
                    break;
                }
            }
        }
        Ok(())
    }
}

fn log_event(event: &Event) {
    tracing::debug!(?event, "session event");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use time_wizard_core::{Cue, MemoryStore, Mode, TimerConfig};

    struct Scripted(VecDeque<Option<Key>>);

    impl KeySource for Scripted {
        fn poll_key(&mut self) -> io::Result<Option<Key>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    fn session() -> Session<MemoryStore, Recorder, Vec<u8>> {
        let config = TimerConfig {
            work_duration: 2,
            rest_duration: 1,
            tick_enabled: true,
        };
        let engine = PomodoroEngine::new(config, MemoryStore::default()).unwrap();
        Session::new(engine, Recorder::default(), Vec::new())
    }

    fn now() -> DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn output(s: &Session<MemoryStore, Recorder, Vec<u8>>) -> String {
        String::from_utf8(s.out.clone()).unwrap()
    }

    #[test]
    fn renders_before_reading_keys() {
        let mut s = session();
        let mut keys = Scripted(VecDeque::from([Some(Key::Char('q'))]));
        assert_eq!(s.step(&now(), &mut keys).unwrap(), Flow::Quit);
        assert_eq!(output(&s), format!("\r{:<30}", "Work 00:00:02"));
    }

    #[test]
    fn interrupt_quits() {
        let mut s = session();
        let mut keys = Scripted(VecDeque::from([Some(Key::Interrupt)]));
        assert_eq!(s.step(&now(), &mut keys).unwrap(), Flow::Quit);
    }

    #[test]
    fn no_input_and_unknown_keys_continue() {
        let mut s = session();
        let mut keys = Scripted(VecDeque::from([None, Some(Key::Char('x'))]));
        assert_eq!(s.step(&now(), &mut keys).unwrap(), Flow::Continue);
        assert_eq!(s.step(&now(), &mut keys).unwrap(), Flow::Continue);
        assert_eq!(s.engine.state().mode, Mode::Work);
    }

    #[test]
    fn keys_reach_the_engine() {
        let mut s = session();
        let mut keys = Scripted(VecDeque::from([
            Some(Key::Char(' ')),
            Some(Key::Char('t')),
            Some(Key::Char('k')),
        ]));
        for _ in 0..3 {
            s.step(&now(), &mut keys).unwrap();
        }
        let state = s.engine.state();
        assert!(state.paused);
        assert_eq!(state.mode, Mode::Rest);
        assert!(!state.tick_enabled);
    }

    #[test]
    fn cues_are_played_and_line_overwritten() {
        let mut s = session();
        let mut keys = Scripted(VecDeque::new());
        for _ in 0..20 {
            s.step(&now(), &mut keys).unwrap();
        }
        assert_eq!(s.player.0, vec![Cue::Tick, Cue::Switch]);
        assert!(output(&s).ends_with(&format!("\r{:<30}", "Rest 00:00:01")));
        assert!(!output(&s).contains('\n'));
    }

    #[test]
    fn banner_lists_bindings() {
        let mut s = session();
        s.banner().unwrap();
        let out = output(&s);
        assert!(out.contains("(q) Quit"));
        assert!(out.contains("(s) Turn Off Alarm"));
    }
}
