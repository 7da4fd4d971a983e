use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use isbn_kernel::settings::Settings;
use isbn_lookup::{BookLookup, HttpClient};

#[derive(Debug, Parser)]
#[command(name = "isbn-cli", version, about = "Open Library backed ISBN lookup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Look up a single ISBN and print the record as JSON
    Lookup {
        /// Forwarded to Open Library as-is
        isbn: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load settings")?;
    isbn_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            isbn_lookup::app::serve(settings).await
        }
        Command::Lookup { isbn } => {
            let client = HttpClient::from_settings(&settings.openlibrary)?;
            let lookup = BookLookup::new(Arc::new(client), settings.openlibrary.base_url.clone());

            let record = lookup.lookup(&isbn).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["isbn-cli", "serve", "--port", "9001"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9001));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lookup_requires_an_isbn() {
        assert!(Cli::try_parse_from(["isbn-cli", "lookup"]).is_err());
    }
}
