//! The external key view: a borrowed byte slice plus a flavor describing how
//! to turn it into the byte sequence actually stored and matched against.

use std::borrow::Cow;

use crate::error::Error;

/// Whether a key is a NUL-terminated text string or an arbitrary binary
/// string.
///
/// `Text` keys get an implicit trailing `0x00` appended before they're
/// stored, so that no text key is ever a byte-for-byte prefix of another —
/// the same trick C string keys get "for free" from their terminator, and
/// the reason a binary key and a text key with the same visible bytes
/// compare as different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Binary,
}

/// A borrowed view of a caller-supplied key.
#[derive(Debug, Clone, Copy)]
pub struct Key<'a> {
    bytes: &'a [u8],
    kind: KeyKind,
}

impl<'a> Key<'a> {
    pub fn text(bytes: &'a [u8]) -> Self {
        Key {
            bytes,
            kind: KeyKind::Text,
        }
    }

    pub fn binary(bytes: &'a [u8]) -> Self {
        Key {
            bytes,
            kind: KeyKind::Binary,
        }
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The byte sequence actually stored/matched against: the raw bytes for
    /// `Binary`, or the raw bytes plus a trailing NUL for `Text`.
    ///
    /// Normalization happens exactly once, at the external boundary; every
    /// internal operation works on the returned bytes directly from then on.
    pub fn effective_bytes(&self) -> Result<Cow<'a, [u8]>, Error> {
        if self.bytes.is_empty() {
            return Err(Error::InvalidKey);
        }
        match self.kind {
            KeyKind::Binary => Ok(Cow::Borrowed(self.bytes)),
            KeyKind::Text => {
                let mut owned = Vec::with_capacity(self.bytes.len() + 1);
                owned.extend_from_slice(self.bytes);
                owned.push(0);
                Ok(Cow::Owned(owned))
            }
        }
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(s: &'a str) -> Self {
        Key::text(s.as_bytes())
    }
}
