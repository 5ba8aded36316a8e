use crate::codec::CursorError;
use crate::value::ValueType;
use keyql::error::ParseError;
use thiserror::Error;

/// Raised while registering a schema into a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field declared twice: {0}")]
    DuplicateField(String),
    #[error("field {field} collides with the shadow of {source_field}")]
    ShadowCollision { field: String, source_field: String },
    #[error("field {0} is reserved for the entity id")]
    ReservedField(String),
    #[error("freshness field {field} must be a timestamp, declared {found}")]
    FreshnessType { field: String, found: ValueType },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl StorageError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self { StorageError::Backend(Box::new(err)) }
}

/// Error type for building and executing queries. Everything but `Storage` is raised before any I/O.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("field is not sortable: {0}")]
    InvalidSortField(String),

    #[error("malformed sort specification: {0}")]
    SortSyntax(#[from] ParseError),

    #[error("invalid cursor: {0}")]
    InvalidCursor(#[from] CursorError),

    #[error("field {field} expects a string, found {found}")]
    TypeCoercion { field: String, found: ValueType },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("field {field} expects a string, found {found}")]
    TypeCoercion { field: String, found: ValueType },

    #[error("field {field} is declared {expected}, found {found}")]
    FieldType { field: String, expected: ValueType, found: ValueType },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("query error: {0}")]
    Query(QueryError),
}

impl From<QueryError> for MutationError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Storage(err) => MutationError::Storage(err),
            QueryError::TypeCoercion { field, found } => MutationError::TypeCoercion { field, found },
            other => MutationError::Query(other),
        }
    }
}
