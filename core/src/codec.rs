//! Opaque cursor tokens.
//!
//! `SignedTokenCodec` frames a token as `base64url(json payload) "." base64url(hmac-sha256 tag)`.

use crate::cursor::Cursor;
use crate::value::Value;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::warn;

pub const MAX_TOKEN_LEN: usize = 8 * 1024;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("token of {len} bytes exceeds the {max} byte limit")]
    TooLong { len: usize, max: usize },
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token signature mismatch")]
    BadSignature,
    #[error("field {0} holds a non-finite float")]
    NonFinite(String),
    #[error("cursor does not carry field {0}")]
    MissingField(String),
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

pub trait TokenCodec: Send + Sync {
    fn encode(&self, cursor: &Cursor) -> Result<String, CursorError>;
    fn decode(&self, token: &str) -> Result<Cursor, CursorError>;
}

pub struct SignedTokenCodec {
    key: Vec<u8>,
}

impl SignedTokenCodec {
    pub fn new(key: impl AsRef<[u8]>) -> Self { Self { key: key.as_ref().to_vec() } }

    fn mac(&self, payload: &[u8]) -> Result<HmacSha256, CursorError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.key).map_err(|e| CursorError::InvalidKey(e.to_string()))?;
        mac.update(payload);
        Ok(mac)
    }
}

impl std::fmt::Debug for SignedTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("SignedTokenCodec").finish_non_exhaustive() }
}

fn check_finite(field: &str, value: Option<&Value>) -> Result<(), CursorError> {
    match value {
        Some(Value::F64(f)) if !f.is_finite() => Err(CursorError::NonFinite(field.to_string())),
        _ => Ok(()),
    }
}

impl TokenCodec for SignedTokenCodec {
    fn encode(&self, cursor: &Cursor) -> Result<String, CursorError> {
        for (field, value) in cursor.fields() {
            check_finite(field, value)?;
        }
        check_finite("freshness", cursor.freshness())?;

        let json = serde_json::to_vec(cursor).map_err(|e| CursorError::Malformed(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let tag = URL_SAFE_NO_PAD.encode(self.mac(payload.as_bytes())?.finalize().into_bytes());
        let token = format!("{}.{}", payload, tag);
        if token.len() > MAX_TOKEN_LEN {
            return Err(CursorError::TooLong { len: token.len(), max: MAX_TOKEN_LEN });
        }
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<Cursor, CursorError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(CursorError::TooLong { len: token.len(), max: MAX_TOKEN_LEN });
        }
        let (payload, tag) = token.split_once('.').ok_or_else(|| CursorError::Malformed("missing signature".into()))?;
        let tag = URL_SAFE_NO_PAD.decode(tag).map_err(|e| CursorError::Malformed(e.to_string()))?;
        if self.mac(payload.as_bytes())?.verify_slice(&tag).is_err() {
            warn!("rejected cursor token with a bad signature");
            return Err(CursorError::BadSignature);
        }
        let json = URL_SAFE_NO_PAD.decode(payload).map_err(|e| CursorError::Malformed(e.to_string()))?;
        serde_json::from_slice(&json).map_err(|e| CursorError::Malformed(e.to_string()))
    }
}
