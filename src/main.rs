use anyhow::Context;
use isbn_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    isbn_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = settings.environment.as_str(),
        upstream = %settings.openlibrary.base_url,
        "isbn-lookup bootstrap starting"
    );

    isbn_lookup::app::serve(settings).await
}
