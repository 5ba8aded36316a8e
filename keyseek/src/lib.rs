//! # Keyseek
//!
//! Keyseek sits in front of an ordered document store and adds case-insensitive sortable fields,
//! multi-key sorts and stable cursor (keyset) pagination. Each page comes back with cursors for its
//! first and last rows; passing one to `after` or `before` resumes iteration exactly at that row,
//! with ties broken by id and nulls ordered consistently.
//!
//! ## Core Concepts
//!
//! - **Catalog**: the resolved field table of one entity type (which fields sort, which compare
//!   case-insensitively through a lower-cased shadow field)
//! - **Collection**: a handle pairing a catalog with a storage collection and a cursor token codec
//! - **Query**: criteria plus sort, limit, projection and cursor bounds, compiled into a storage selection
//! - **Page**: the rows of one execution with first/last cursors and freshness watermarks
//!
//! ## Example
//!
//! ```rust
//! # use keyseek::{Catalog, Collection, CollectionConfig, Criteria, Document, FieldDescriptor, Schema, SignedTokenCodec};
//! # use keyseek_storage_memory::MemoryStorageEngine;
//! # use std::sync::Arc;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::new("user").field(FieldDescriptor::string("username").sortable());
//! let catalog = Arc::new(Catalog::register(schema, CollectionConfig::default())?);
//! let users = Collection::open(&MemoryStorageEngine::new(), catalog, Arc::new(SignedTokenCodec::new("secret"))).await?;
//!
//! for name in ["carol", "Alice", "bob"] {
//!     users.save(Document::new().with("username", name)).await?;
//! }
//!
//! let first = users.find(Criteria::all())?.sort("username")?.limit(2).exec().await?;
//! let token = users.encode_cursor(first.last_cursor.as_ref().expect("non-empty page"))?;
//!
//! let next = users.find(Criteria::all())?.sort("username")?.limit(2).after_token(&token)?.exec().await?;
//! assert_eq!(next.data[0].value("username").and_then(|v| v.as_str()), Some("carol"));
//! # Ok(())
//! # }
//! ```

pub use keyql;
pub use keyseek_core::codec::{CursorError, SignedTokenCodec, TokenCodec, MAX_TOKEN_LEN};
pub use keyseek_core::error::{MutationError, QueryError, SchemaError, StorageError};
pub use keyseek_core::storage::{StorageCollection, StorageEngine};
pub use keyseek_core::{
    CaseSensitivity, Catalog, Collection, CollectionConfig, Criteria, Cursor, Direction, Document, EntityId, FieldDescriptor, FieldType, Page,
    Query, Schema, SortInput, SortSpec, Value,
};
pub use keyseek_core::document::Fields;
pub use keyql::ast::OrderDirection;
