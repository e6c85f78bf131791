use chrono::Local;
use serde::Serialize;
use time_wizard_core::recurrence::CANONICAL_FORMAT;
use time_wizard_core::{KanbanStore, ReminderEvaluator, TaskStore};

#[derive(Serialize)]
struct ActiveReminder<'a> {
    id: u32,
    name: &'a str,
    remind_on: &'a str,
    until: String,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = KanbanStore::open()?.load_tasks()?;
    let now = Local::now();
    let evaluator = ReminderEvaluator::new();

    let active: Vec<ActiveReminder> = evaluator
        .active_tasks(&tasks, &now)
        .into_iter()
        .filter_map(|task| {
            let window = evaluator.window(task, &now)?;
            Some(ActiveReminder {
                id: task.id,
                name: &task.name,
                remind_on: &task.remind_on,
                until: window.stop.format(CANONICAL_FORMAT).to_string(),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&active)?);
    } else {
        for reminder in &active {
            println!("{}. {} (until {})", reminder.id, reminder.name, reminder.until);
        }
    }
    Ok(())
}
