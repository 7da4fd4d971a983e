//! ISBN lookup against the Open Library Books API.

pub mod client;
pub mod error;
pub mod lookup;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use isbn_http::error::AppError;
use isbn_kernel::{settings::OpenLibrarySettings, InitCtx, Module};
use serde_json::json;

pub use client::{HttpClient, UpstreamClient};
pub use error::LookupError;
pub use lookup::BookLookup;
pub use models::BookRecord;

/// Serves `GET /{isbn}/` under `/api/book` and `/book`
pub struct BookModule {
    lookup: BookLookup,
}

impl BookModule {
    pub fn new(lookup: BookLookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Module for BookModule {
    fn name(&self) -> &'static str {
        "book"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ctx.settings.environment.as_str(),
            upstream = self.lookup.base_url(),
            timeout_ms = ctx.settings.openlibrary.timeout_ms,
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/{isbn}/", get(get_book))
            .route("/{isbn}", get(get_book))
            .with_state(self.lookup.clone())
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["/book"]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/{isbn}/": {
                    "get": {
                        "summary": "Look up a book by ISBN",
                        "tags": ["Book"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "description": "ISBN-10 or ISBN-13, forwarded to Open Library unvalidated",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Book metadata",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookRecord" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Open Library has no record for this ISBN",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Upstream request failed or returned unexpected data",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookRecord": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "authors": { "type": "array", "items": { "type": "string" } },
                            "publishers": { "type": "array", "items": { "type": "string" } },
                            "publish_date": { "type": "string" },
                            "isbn_10": { "type": "array", "items": { "type": "string" } },
                            "isbn_13": { "type": "array", "items": { "type": "string" } },
                            "cover": {
                                "type": "string",
                                "description": "Large cover image URL, empty when unavailable"
                            }
                        },
                        "required": [
                            "title", "authors", "publishers", "publish_date",
                            "isbn_10", "isbn_13", "cover"
                        ]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

async fn get_book(
    State(lookup): State<BookLookup>,
    Path(isbn): Path<String>,
) -> Result<Json<BookRecord>, AppError> {
    let record = lookup.lookup(&isbn).await?;
    Ok(Json(record))
}

/// Create the book module backed by the real Open Library client
pub fn create_module(settings: &OpenLibrarySettings) -> anyhow::Result<Arc<dyn Module>> {
    let client = HttpClient::from_settings(settings)?;
    let lookup = BookLookup::new(Arc::new(client), settings.base_url.clone());
    Ok(Arc::new(BookModule::new(lookup)))
}
