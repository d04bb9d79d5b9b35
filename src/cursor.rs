//! Opaque connection cursors
//!
//! A cursor is the base64 encoding of `"{tag}:{key}"`. The tag names the
//! connection the cursor was issued by, so a cursor from one connection is
//! never mistaken for a position in another.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

/// Cursor that could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed cursor: {0}")]
pub struct MalformedCursor(pub String);

/// Decoded cursor contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCursor {
    pub tag: String,
    pub key: String,
}

/// Cursor encoding/decoding
pub struct CursorCodec;

impl CursorCodec {
    /// Encode a record key under a connection tag
    pub fn encode(tag: &str, key: &str) -> String {
        BASE64.encode(format!("{tag}:{key}").as_bytes())
    }

    /// Decode cursor back into its tag and key
    ///
    /// The payload is split on the first `:`, so keys may contain colons.
    pub fn decode(cursor: &str) -> Result<DecodedCursor, MalformedCursor> {
        let bytes = BASE64
            .decode(cursor.as_bytes())
            .map_err(|e| MalformedCursor(e.to_string()))?;
        let payload = String::from_utf8(bytes)
            .map_err(|e| MalformedCursor(e.to_string()))?;
        let (tag, key) = payload
            .split_once(':')
            .ok_or_else(|| MalformedCursor("missing tag separator".to_string()))?;

        Ok(DecodedCursor {
            tag: tag.to_string(),
            key: key.to_string(),
        })
    }

    /// Decode cursor and require it to belong to `tag`
    pub fn decode_key(tag: &str, cursor: &str) -> Result<String, MalformedCursor> {
        let decoded = Self::decode(cursor)?;
        if decoded.tag != tag {
            return Err(MalformedCursor(format!(
                "cursor issued by `{}` used on `{}`",
                decoded.tag, tag
            )));
        }
        Ok(decoded.key)
    }
}
