use serde::{Deserialize, Serialize};

/// Per-collection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Case-insensitive default for sortable string fields that do not override it.
    pub ignore_case: bool,
    /// Timestamp field stamped on every save and used for `since`/`until` and page watermarks.
    pub updated_field: String,
    pub id_field: String,
    pub shadow_prefix: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self { ignore_case: true, updated_field: "updated".to_string(), id_field: "id".to_string(), shadow_prefix: "_".to_string() }
    }
}

impl CollectionConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn with_updated_field(mut self, field: impl Into<String>) -> Self {
        self.updated_field = field.into();
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_shadow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.shadow_prefix = prefix.into();
        self
    }

    pub fn shadow_name(&self, field: &str) -> String { format!("{}{}", self.shadow_prefix, field) }
}
