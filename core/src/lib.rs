pub mod codec;
pub mod collation;
pub mod collection;
pub mod config;
pub mod criteria;
pub mod cursor;
pub mod document;
pub mod envelope;
pub mod error;
pub mod id;
pub mod keyset;
pub mod query;
pub mod schema;
pub mod selection;
pub mod sort;
pub mod storage;
pub mod value;

pub use collection::Collection;
pub use config::CollectionConfig;
pub use criteria::Criteria;
pub use cursor::Cursor;
pub use document::Document;
pub use envelope::Page;
pub use id::EntityId;
pub use keyset::Direction;
pub use query::Query;
pub use schema::{CaseSensitivity, Catalog, FieldDescriptor, FieldType, Schema};
pub use sort::{SortInput, SortSpec};
pub use value::Value;

pub use keyql;
