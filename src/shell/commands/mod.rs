//! Individual command implementations.

mod add;
mod delete;
mod export;
mod help;
mod import;
mod list;
mod quit;
mod random;
mod tags;
mod update;

pub use add::AddCommand;
pub use delete::DeleteCommand;
pub use export::ExportCommand;
pub use help::HelpCommand;
pub use import::ImportCommand;
pub use list::ListCommand;
pub use quit::{QuitCommand, farewell};
pub use random::RandomCommand;
pub use tags::TagsCommand;
pub use update::UpdateCommand;

use std::sync::Arc;

use super::command::CommandRegistry;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(UpdateCommand));
    registry.register(Arc::new(DeleteCommand));
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(RandomCommand));
    registry.register(Arc::new(TagsCommand));
    registry.register(Arc::new(ImportCommand));
    registry.register(Arc::new(ExportCommand));
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(QuitCommand));
}
