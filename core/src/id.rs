use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ulid::Ulid;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("entity ids are 16 bytes")]
    InvalidLength,
}

/// Unique, totally ordered document identifier. Serves as the final tie-break of every sort.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntityId(Ulid);

impl EntityId {
    pub fn new() -> Self { EntityId(Ulid::new()) }

    pub fn from_ulid(ulid: Ulid) -> Self { EntityId(ulid) }

    pub fn from_bytes(bytes: [u8; 16]) -> Self { EntityId(Ulid::from_bytes(bytes)) }

    pub fn to_bytes(&self) -> [u8; 16] { self.0.to_bytes() }

    pub fn to_ulid(&self) -> Ulid { self.0 }

    pub fn from_base64<T: AsRef<[u8]>>(input: T) -> Result<Self, IdError> {
        let decoded = general_purpose::URL_SAFE_NO_PAD.decode(input)?;
        let bytes: [u8; 16] = decoded[..].try_into().map_err(|_| IdError::InvalidLength)?;
        Ok(EntityId(Ulid::from_bytes(bytes)))
    }

    pub fn to_base64(&self) -> String { general_purpose::URL_SAFE_NO_PAD.encode(self.0.to_bytes()) }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.to_base64()) }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "EntityId({})", self.0) }
}

impl TryFrom<&str> for EntityId {
    type Error = IdError;
    fn try_from(id: &str) -> Result<Self, Self::Error> { Self::from_base64(id) }
}

impl From<Ulid> for EntityId {
    fn from(ulid: Ulid) -> Self { EntityId(ulid) }
}

impl From<EntityId> for Ulid {
    fn from(id: EntityId) -> Self { id.0 }
}

impl Default for EntityId {
    fn default() -> Self { Self::new() }
}
