pub mod board;
pub mod config;
pub mod kanban;
pub mod pomodoro;
pub mod remind;
pub mod resolve;
pub mod task;
