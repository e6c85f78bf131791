//! Audio cues.
//!
//! Cues are fire-and-forget: an external player process is spawned and never
//! waited on, and any failure is logged and dropped.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Tick,
    Alarm,
    Switch,
}

/// Sink for audio cues.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);

    fn play_tick(&mut self) {
        self.play(Cue::Tick);
    }

    fn play_alarm(&mut self) {
        self.play(Cue::Alarm);
    }

    fn play_switch(&mut self) {
        self.play(Cue::Switch);
    }
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&mut self, _cue: Cue) {}
}

/// Plays sound files by spawning `program args.. <file>`.
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    tick_file: PathBuf,
    alarm_file: PathBuf,
    switch_file: PathBuf,
    children: Vec<Child>,
}

impl CommandPlayer {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        tick_file: PathBuf,
        alarm_file: PathBuf,
        switch_file: PathBuf,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            tick_file,
            alarm_file,
            switch_file,
            children: Vec::new(),
        }
    }

    pub fn file(&self, cue: Cue) -> &PathBuf {
        match cue {
            Cue::Tick => &self.tick_file,
            Cue::Alarm => &self.alarm_file,
            Cue::Switch => &self.switch_file,
        }
    }

    /// Reap players that have exited so they don't linger as zombies.
    fn reap(&mut self) {
        self.children
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl CuePlayer for CommandPlayer {
    fn play(&mut self, cue: Cue) {
        self.reap();
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(self.file(cue))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => self.children.push(child),
            Err(e) => tracing::debug!(?cue, program = %self.program, "cue player failed: {e}"),
        }
    }
}
