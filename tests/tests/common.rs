use tracing::Level;

use keyseek::{Catalog, Collection, CollectionConfig, Document, Page, Schema, SignedTokenCodec};
use keyseek_storage_memory::MemoryStorageEngine;
use std::sync::Arc;

pub use anyhow::Result;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

pub const SECRET: &str = "a_secret";

#[allow(unused)]
pub async fn open(schema: Schema) -> Result<Collection> { open_with(schema, CollectionConfig::default()).await }

#[allow(unused)]
pub async fn open_with(schema: Schema, config: CollectionConfig) -> Result<Collection> {
    let engine = MemoryStorageEngine::new();
    let catalog = Arc::new(Catalog::register(schema, config)?);
    Ok(Collection::open(&engine, catalog, Arc::new(SignedTokenCodec::new(SECRET))).await?)
}

/// String value of `field`, if it holds one.
#[allow(unused)]
pub fn text<'a>(doc: &'a Document, field: &str) -> Option<&'a str> { doc.value(field).and_then(|v| v.as_str()) }

/// `field` of every row, with `-` standing in for null or undefined.
#[allow(unused)]
pub fn column(page: &Page, field: &str) -> Vec<String> { page.data.iter().map(|doc| text(doc, field).unwrap_or("-").to_string()).collect() }
