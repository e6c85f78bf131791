use clap::Subcommand;
use time_wizard_core::KanbanStore;

#[derive(Subcommand)]
pub enum BoardAction {
    /// List boards
    List,
    /// Add a board
    Add {
        /// Board name
        name: String,
        /// Explicit board id (default: highest id + 1)
        #[arg(long)]
        id: Option<u32>,
    },
    /// Rename a board
    Rename {
        /// Board ID
        id: u32,
        /// New name
        name: String,
    },
    /// Delete a board; its tasks are kept
    Delete {
        /// Board ID
        id: u32,
    },
}

pub fn run(action: BoardAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = KanbanStore::open()?;

    match action {
        BoardAction::List => {
            for (id, name) in &store.load()?.boards {
                println!("{id}. \t {name}");
            }
        }
        BoardAction::Add { name, id } => {
            let id = store.update(|k| k.add_board(id, name))?;
            println!("Board created: {id}");
        }
        BoardAction::Rename { id, name } => {
            store.update(|k| k.rename_board(id, name))?;
            println!("Board renamed: {id}");
        }
        BoardAction::Delete { id } => {
            store.update(|k| k.delete_board(id))?;
            println!("Board deleted: {id}");
        }
    }
    Ok(())
}
