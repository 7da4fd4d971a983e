//! Application bootstrap shared by the `isbn-lookup` binary and `isbn-cli serve`.

use anyhow::Context;
use isbn_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Register and start all modules, serve HTTP until shutdown, then stop modules.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings).context("failed to register modules")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served =
        isbn_http::start_server(&registry, &settings, isbn_http::shutdown_signal()).await;

    // Modules are stopped even when the server exits with an error.
    let stopped = registry.stop_modules().await;
    served.and(stopped)
}
