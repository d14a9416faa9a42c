//! Shared result/error model for every implementation variant.
//!
//! All variants report the same error for the same input, so callers get
//! architecture-independent diagnostics: the kind of the first malformed
//! sequence and the offset (in source code units) of its first unit.

use thiserror::Error;

/// Classification of the first malformed sequence found in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input ends in the middle of a multi-unit sequence.
    TruncatedSequence,
    /// A unit that cannot start any sequence (e.g. a stray UTF-8
    /// continuation byte, or a 0xF8..=0xFF lead).
    InvalidLeadUnit,
    /// A continuation unit is missing its `10xxxxxx` marker.
    InvalidContinuationUnit,
    /// The decoded value is outside the legal envelope for its encoded
    /// length: overlong forms, surrogates in UTF-8/UTF-32, values beyond
    /// U+10FFFF.
    OverlongOrOutOfRange,
    /// UTF-16 only: a high surrogate without a following low surrogate,
    /// or a low surrogate with no preceding high surrogate.
    LoneSurrogate,
}

impl ErrorKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ErrorKind::TruncatedSequence => "truncated sequence",
            ErrorKind::InvalidLeadUnit => "invalid lead unit",
            ErrorKind::InvalidContinuationUnit => "invalid continuation unit",
            ErrorKind::OverlongOrOutOfRange => "overlong or out-of-range value",
            ErrorKind::LoneSurrogate => "lone surrogate",
        }
    }
}

/// First malformed sequence in a source buffer.
///
/// `offset` is counted in source code units (bytes for UTF-8, `u16`s for
/// UTF-16, `u32`s for UTF-32) and always points at the *first* unit of
/// the offending sequence, scanning left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{} at offset {offset}", .kind.as_str())]
pub struct ConversionError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl ConversionError {
    #[inline]
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Re-base an error produced by scanning a sub-slice that starts
    /// `base` units into the original buffer.
    #[inline]
    pub(crate) fn rebase(self, base: usize) -> Self {
        Self {
            kind: self.kind,
            offset: self.offset + base,
        }
    }
}

/// `Ok` carries units written (conversions) or `()` (validation).
pub type ConversionResult<T> = Result<T, ConversionError>;
