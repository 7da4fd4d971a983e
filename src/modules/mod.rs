pub mod book;

use isbn_kernel::{settings::Settings, ModuleRegistry};

/// Register all service modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    registry.register(book::create_module(&settings.openlibrary)?)?;
    Ok(())
}
