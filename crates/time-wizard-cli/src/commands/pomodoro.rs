use std::io;

use time_wizard_core::storage::data_dir;
use time_wizard_core::{Config, CuePlayer, KanbanStore, PomodoroEngine, SilentPlayer};

use crate::terminal::{RawModeGuard, Session, TerminalKeys};

pub fn run(mute: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = KanbanStore::open()?;
    let engine = PomodoroEngine::new(config.timer_config(), store)?;
    let player: Box<dyn CuePlayer> = if mute {
        Box::new(SilentPlayer)
    } else {
        Box::new(config.cue_player(&data_dir()?))
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut session = Session::new(engine, player, io::stdout());
    // Printed before raw mode so newlines still return the carriage.
    session.banner()?;

    let result = {
        let _raw = RawModeGuard::acquire()?;
        runtime.block_on(session.run(&mut TerminalKeys))
    };
    println!();
    result?;
    Ok(())
}
