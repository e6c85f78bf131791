use time_wizard_core::KanbanStore;

/// Print each non-empty board followed by its tasks.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let kanban = KanbanStore::open()?.load()?;
    for column in kanban.columns() {
        println!("{}", column.name);
        for task in &column.tasks {
            if task.remind_on.is_empty() {
                println!("  {}. {}", task.id, task.name);
            } else {
                println!("  {}. {} ({})", task.id, task.name, task.remind_on);
            }
        }
    }
    Ok(())
}
