//! Task management commands for CLI.

use clap::Subcommand;
use time_wizard_core::{Kanban, KanbanStore, Task, TaskFields};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List all tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Explicit task id (default: highest id + 1)
        #[arg(long)]
        id: Option<u32>,
        /// Board id or name
        #[arg(long)]
        board: Option<String>,
        /// Recurrence expression, e.g. "every monday 09:00"
        #[arg(long)]
        remind_on: Option<String>,
        /// Reminder length in seconds (default: 1800)
        #[arg(long)]
        remind_for: Option<u64>,
    },
    /// Edit a task
    Edit {
        /// Task ID
        id: u32,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// Board id or name
        #[arg(long)]
        board: Option<String>,
        /// Recurrence expression
        #[arg(long)]
        remind_on: Option<String>,
        /// Reminder length in seconds
        #[arg(long)]
        remind_for: Option<u64>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: u32,
    },
}

/// `id. name  board  remind_on  remind_for`, tab separated.
pub fn task_line(kanban: &Kanban, task: &Task) -> String {
    let board = task
        .board_id
        .and_then(|id| kanban.boards.get(&id))
        .map(String::as_str)
        .unwrap_or("");
    format!(
        "{}. \t {} \t {} \t {} \t {}",
        task.id, task.name, board, task.remind_on, task.remind_for
    )
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KanbanStore::open()?;

    match action {
        TaskAction::List { json } => {
            let kanban = store.load()?;
            let tasks = kanban.tasks();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in &tasks {
                    println!("{}", task_line(&kanban, task));
                }
            }
        }
        TaskAction::Add {
            name,
            id,
            board,
            remind_on,
            remind_for,
        } => {
            let fields = TaskFields {
                name: Some(name),
                board,
                remind_on,
                remind_for,
            };
            let id = store.update(|k| k.add_task(id, fields))?;
            println!("Task created: {id}");
        }
        TaskAction::Edit {
            id,
            name,
            board,
            remind_on,
            remind_for,
        } => {
            let fields = TaskFields {
                name,
                board,
                remind_on,
                remind_for,
            };
            store.update(|k| k.edit_task(id, fields))?;
            println!("Task updated: {id}");
        }
        TaskAction::Delete { id } => {
            store.update(|k| k.delete_task(id))?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
