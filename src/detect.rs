//! Best-effort encoding detection for untagged byte buffers.
//!
//! A hint, not an authority: byte-order marks win outright, otherwise
//! every encoding whose rules the buffer satisfies is reported as a
//! candidate. Callers must still validate under the encoding they pick.

use crate::dispatch;

/// The encodings this crate can transcode between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Utf32Le => "UTF-32LE",
            Encoding::Utf32Be => "UTF-32BE",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Encoding::Utf8 => 1 << 0,
            Encoding::Utf16Le => 1 << 1,
            Encoding::Utf16Be => 1 << 2,
            Encoding::Utf32Le => 1 << 3,
            Encoding::Utf32Be => 1 << 4,
        }
    }
}

const ALL: [Encoding; 5] = [
    Encoding::Utf8,
    Encoding::Utf16Le,
    Encoding::Utf16Be,
    Encoding::Utf32Le,
    Encoding::Utf32Be,
];

/// Set of candidate encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingSet(u8);

impl EncodingSet {
    pub fn empty() -> Self {
        Self(0)
    }

    fn with(mut self, e: Encoding) -> Self {
        self.0 |= e.bit();
        self
    }

    pub fn contains(&self, e: Encoding) -> bool {
        self.0 & e.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Encoding> + '_ {
        ALL.into_iter().filter(|e| self.contains(*e))
    }
}

/// Reassemble the byte stream as `u16` units with the original storage
/// bytes preserved, so the `*_le` / `*_be` entry points read them the
/// same way they sat in the buffer.
fn u16_units(buffer: &[u8]) -> Vec<u16> {
    buffer
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn u32_units(buffer: &[u8], big_endian: bool) -> Vec<u32> {
    buffer
        .chunks_exact(4)
        .map(|c| {
            let quad = [c[0], c[1], c[2], c[3]];
            if big_endian {
                u32::from_be_bytes(quad)
            } else {
                u32::from_le_bytes(quad)
            }
        })
        .collect()
}

pub(crate) fn detect_encodings(buffer: &[u8]) -> EncodingSet {
    // A byte-order mark is decisive. UTF-32LE must be probed before
    // UTF-16LE: FF FE 00 00 starts with the UTF-16LE mark.
    if buffer.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        return EncodingSet::empty().with(Encoding::Utf32Le);
    }
    if buffer.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        return EncodingSet::empty().with(Encoding::Utf32Be);
    }
    if buffer.starts_with(&[0xFF, 0xFE]) {
        return EncodingSet::empty().with(Encoding::Utf16Le);
    }
    if buffer.starts_with(&[0xFE, 0xFF]) {
        return EncodingSet::empty().with(Encoding::Utf16Be);
    }
    if buffer.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return EncodingSet::empty().with(Encoding::Utf8);
    }

    let engine = dispatch::active();
    let mut set = EncodingSet::empty();
    if engine.validate_utf8(buffer) {
        set = set.with(Encoding::Utf8);
    }
    if buffer.len() % 2 == 0 {
        let units = u16_units(buffer);
        if engine.validate_utf16le(&units) {
            set = set.with(Encoding::Utf16Le);
        }
        if engine.validate_utf16be(&units) {
            set = set.with(Encoding::Utf16Be);
        }
    }
    if buffer.len() % 4 == 0 {
        if engine.validate_utf32(&u32_units(buffer, false)) {
            set = set.with(Encoding::Utf32Le);
        }
        if engine.validate_utf32(&u32_units(buffer, true)) {
            set = set.with(Encoding::Utf32Be);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins() {
        let set = detect_encodings(&[0xEF, 0xBB, 0xBF, b'h', b'i']);
        assert!(set.contains(Encoding::Utf8));
        assert_eq!(set.iter().count(), 1);

        let set = detect_encodings(&[0xFF, 0xFE, 0x41, 0x00]);
        assert!(set.contains(Encoding::Utf16Le));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn utf32le_bom_beats_utf16le_prefix() {
        let set = detect_encodings(&[0xFF, 0xFE, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00]);
        assert!(set.contains(Encoding::Utf32Le));
        assert!(!set.contains(Encoding::Utf16Le));
    }

    #[test]
    fn ascii_is_ambiguous() {
        // Four ASCII bytes satisfy UTF-8 and both UTF-16 readings.
        let set = detect_encodings(b"abcd");
        assert!(set.contains(Encoding::Utf8));
        assert!(set.contains(Encoding::Utf16Le));
        assert!(set.contains(Encoding::Utf16Be));
        // As UTF-32 the value 0x64636261 is far beyond U+10FFFF.
        assert!(!set.contains(Encoding::Utf32Le));
    }

    #[test]
    fn garbage_matches_nothing() {
        let set = detect_encodings(&[0xFF, 0xFF, 0xFF]);
        assert!(!set.contains(Encoding::Utf8));
        // Odd length rules out the 16- and 32-bit encodings too.
        assert!(set.is_empty());
    }

    #[test]
    fn utf16le_text_without_bom() {
        let units: Vec<u8> = "hello"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        let set = detect_encodings(&units);
        assert!(set.contains(Encoding::Utf16Le));
    }
}
