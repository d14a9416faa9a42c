//! **yutf** — SIMD-accelerated Unicode validation and transcoding.
//!
//! Validates and transcodes buffers between UTF-8, UTF-16 (LE/BE) and
//! UTF-32, and computes exact output sizes ahead of conversion. One
//! implementation variant per CPU instruction-set family (AVX-512, AVX2,
//! SSE2, NEON, portable scalar); the best one the host supports is
//! picked once, lazily, and every entry point below is a thin forwarder
//! through it.
//!
//! ```
//! let text = "naïve 🦀";
//! assert!(yutf::validate_utf8(text.as_bytes()));
//!
//! let mut utf16 = vec![0u16; yutf::utf16_length_from_utf8(text.as_bytes())];
//! let written = yutf::convert_utf8_to_utf16le(text.as_bytes(), &mut utf16).unwrap();
//! assert_eq!(&utf16[..written], text.encode_utf16().collect::<Vec<_>>().as_slice());
//! ```
//!
//! Every call is stateless: arbitrarily many threads may validate and
//! convert concurrently with no coordination. The only process-wide
//! writes are the one-time variant selection and the one-time lookup
//! table build, both immutable afterwards.

pub mod arena;
mod cpu;
mod detect;
mod dispatch;
mod error;
pub mod par;
mod scalar;
mod simd;

pub use detect::{Encoding, EncodingSet};
pub use dispatch::{active_implementation, implementations, Descriptor};
pub use error::{ConversionError, ConversionResult, ErrorKind};

use dispatch::active;

/* ===================================================================== */
/*                             Validation                                */
/* ===================================================================== */

/// Whether `src` is well-formed UTF-8.
pub fn validate_utf8(src: &[u8]) -> bool {
    active().validate_utf8(src)
}

/// Like [`validate_utf8`], but reports the kind and offset of the first
/// malformed sequence. Both flavors agree exactly on where validity
/// ends.
pub fn validate_utf8_with_errors(src: &[u8]) -> ConversionResult<()> {
    active().validate_utf8_with_errors(src)
}

/// Whether `src` is well-formed UTF-16 with little-endian code units.
pub fn validate_utf16le(src: &[u16]) -> bool {
    active().validate_utf16le(src)
}

/// Whether `src` is well-formed UTF-16 with big-endian code units.
pub fn validate_utf16be(src: &[u16]) -> bool {
    active().validate_utf16be(src)
}

pub fn validate_utf16le_with_errors(src: &[u16]) -> ConversionResult<()> {
    active().validate_utf16le_with_errors(src)
}

pub fn validate_utf16be_with_errors(src: &[u16]) -> ConversionResult<()> {
    active().validate_utf16be_with_errors(src)
}

/// Whether every unit of `src` is a Unicode scalar value.
pub fn validate_utf32(src: &[u32]) -> bool {
    active().validate_utf32(src)
}

pub fn validate_utf32_with_errors(src: &[u32]) -> ConversionResult<()> {
    active().validate_utf32_with_errors(src)
}

/* ===================================================================== */
/*                      Counting & length estimation                     */
/* ===================================================================== */
/*
 * The counting and length functions assume well-formed input (validate
 * first when provenance is untrusted). They run the same masks as the
 * batch converters, so for any well-formed buffer the matching
 * `convert_*` writes exactly the estimated number of units.
 */

/// Number of code points in well-formed UTF-8.
pub fn count_utf8(src: &[u8]) -> usize {
    active().count_utf8(src)
}

/// Number of code points in well-formed UTF-16LE.
pub fn count_utf16le(src: &[u16]) -> usize {
    active().count_utf16le(src)
}

/// Number of code points in well-formed UTF-16BE.
pub fn count_utf16be(src: &[u16]) -> usize {
    active().count_utf16be(src)
}

/// Exact UTF-16 units [`convert_utf8_to_utf16le`] will write.
pub fn utf16_length_from_utf8(src: &[u8]) -> usize {
    active().utf16_length_from_utf8(src)
}

/// Exact UTF-32 units [`convert_utf8_to_utf32`] will write.
pub fn utf32_length_from_utf8(src: &[u8]) -> usize {
    active().utf32_length_from_utf8(src)
}

/// Exact UTF-8 bytes [`convert_utf16le_to_utf8`] will write.
pub fn utf8_length_from_utf16le(src: &[u16]) -> usize {
    active().utf8_length_from_utf16le(src)
}

/// Exact UTF-8 bytes [`convert_utf16be_to_utf8`] will write.
pub fn utf8_length_from_utf16be(src: &[u16]) -> usize {
    active().utf8_length_from_utf16be(src)
}

pub fn utf32_length_from_utf16le(src: &[u16]) -> usize {
    active().utf32_length_from_utf16le(src)
}

pub fn utf32_length_from_utf16be(src: &[u16]) -> usize {
    active().utf32_length_from_utf16be(src)
}

/// Exact UTF-8 bytes [`convert_utf32_to_utf8`] will write.
pub fn utf8_length_from_utf32(src: &[u32]) -> usize {
    active().utf8_length_from_utf32(src)
}

/// Exact UTF-16 units [`convert_utf32_to_utf16le`] will write.
pub fn utf16_length_from_utf32(src: &[u32]) -> usize {
    active().utf16_length_from_utf32(src)
}

/* ===================================================================== */
/*                       Transcoding, validating                         */
/* ===================================================================== */
/*
 * The validating converters reject exactly the inputs the validators
 * reject, at the same offset. `dst` must hold at least the unit count
 * reported by the matching length function for this source; an
 * undersized destination is a caller contract violation and panics.
 * On success the return is the number of units written.
 */

pub fn convert_utf8_to_utf16le(src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
    active().convert_utf8_to_utf16le(src, dst)
}

pub fn convert_utf8_to_utf16be(src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
    active().convert_utf8_to_utf16be(src, dst)
}

pub fn convert_utf8_to_utf32(src: &[u8], dst: &mut [u32]) -> ConversionResult<usize> {
    active().convert_utf8_to_utf32(src, dst)
}

pub fn convert_utf16le_to_utf8(src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
    active().convert_utf16le_to_utf8(src, dst)
}

pub fn convert_utf16be_to_utf8(src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
    active().convert_utf16be_to_utf8(src, dst)
}

pub fn convert_utf16le_to_utf32(src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
    active().convert_utf16le_to_utf32(src, dst)
}

pub fn convert_utf16be_to_utf32(src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
    active().convert_utf16be_to_utf32(src, dst)
}

pub fn convert_utf32_to_utf8(src: &[u32], dst: &mut [u8]) -> ConversionResult<usize> {
    active().convert_utf32_to_utf8(src, dst)
}

pub fn convert_utf32_to_utf16le(src: &[u32], dst: &mut [u16]) -> ConversionResult<usize> {
    active().convert_utf32_to_utf16le(src, dst)
}

pub fn convert_utf32_to_utf16be(src: &[u32], dst: &mut [u16]) -> ConversionResult<usize> {
    active().convert_utf32_to_utf16be(src, dst)
}

/* ===================================================================== */
/*                      Transcoding, assume-valid                        */
/* ===================================================================== */
/*
 * The `convert_valid_*` family skips validation entirely; the caller
 * vouches for the input. On malformed input the output is unspecified
 * (and a truncated tail may panic), but no undefined behavior occurs.
 */

pub fn convert_valid_utf8_to_utf16le(src: &[u8], dst: &mut [u16]) -> usize {
    active().convert_valid_utf8_to_utf16le(src, dst)
}

pub fn convert_valid_utf8_to_utf16be(src: &[u8], dst: &mut [u16]) -> usize {
    active().convert_valid_utf8_to_utf16be(src, dst)
}

pub fn convert_valid_utf8_to_utf32(src: &[u8], dst: &mut [u32]) -> usize {
    active().convert_valid_utf8_to_utf32(src, dst)
}

pub fn convert_valid_utf16le_to_utf8(src: &[u16], dst: &mut [u8]) -> usize {
    active().convert_valid_utf16le_to_utf8(src, dst)
}

pub fn convert_valid_utf16be_to_utf8(src: &[u16], dst: &mut [u8]) -> usize {
    active().convert_valid_utf16be_to_utf8(src, dst)
}

pub fn convert_valid_utf16le_to_utf32(src: &[u16], dst: &mut [u32]) -> usize {
    active().convert_valid_utf16le_to_utf32(src, dst)
}

pub fn convert_valid_utf16be_to_utf32(src: &[u16], dst: &mut [u32]) -> usize {
    active().convert_valid_utf16be_to_utf32(src, dst)
}

pub fn convert_valid_utf32_to_utf8(src: &[u32], dst: &mut [u8]) -> usize {
    active().convert_valid_utf32_to_utf8(src, dst)
}

pub fn convert_valid_utf32_to_utf16le(src: &[u32], dst: &mut [u16]) -> usize {
    active().convert_valid_utf32_to_utf16le(src, dst)
}

pub fn convert_valid_utf32_to_utf16be(src: &[u32], dst: &mut [u16]) -> usize {
    active().convert_valid_utf32_to_utf16be(src, dst)
}

/* ===================================================================== */
/*                          Utility operations                           */
/* ===================================================================== */

/// Swap the byte order of every UTF-16 unit (LE ⇄ BE). Values are not
/// interpreted; malformed input passes through unchanged apart from the
/// swap. `dst` must be at least as long as `src`.
pub fn change_endianness_utf16(src: &[u16], dst: &mut [u16]) {
    active().change_endianness_utf16(src, dst)
}

/// Candidate encodings for an untagged byte buffer. A hint only; see
/// [`EncodingSet`].
pub fn detect_encodings(buffer: &[u8]) -> EncodingSet {
    detect::detect_encodings(buffer)
}

/* ===================================================================== */
/*                               Tests                                   */
/* ===================================================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn encode_utf8(cp: u32, buf: &mut [u8; 4]) -> usize {
        char::from_u32(cp).unwrap().encode_utf8(buf).len()
    }

    #[test]
    fn roundtrip_every_scalar_value() {
        // Every code point, through all three encodings and back.
        let mut utf8 = [0u8; 4];
        let mut utf16 = [0u16; 2];
        let mut utf32 = [0u32; 1];
        let mut back = [0u32; 1];
        for cp in (0..=0x10FFFFu32).filter(|cp| !(0xD800..=0xDFFF).contains(cp)) {
            let n8 = encode_utf8(cp, &mut utf8);
            assert!(validate_utf8(&utf8[..n8]), "U+{cp:04X}");

            let n32 = convert_utf8_to_utf32(&utf8[..n8], &mut utf32).unwrap();
            assert_eq!((n32, utf32[0]), (1, cp), "U+{cp:04X}");

            let n16 = convert_utf8_to_utf16le(&utf8[..n8], &mut utf16).unwrap();
            assert_eq!(n16, utf16_length_from_utf8(&utf8[..n8]));
            assert!(validate_utf16le(&utf16[..n16]));

            let m = convert_utf16le_to_utf32(&utf16[..n16], &mut back).unwrap();
            assert_eq!((m, back[0]), (1, cp), "U+{cp:04X}");
        }
    }

    #[test]
    fn known_conversions_and_rejections() {
        // "A" → UTF-32.
        let mut u32buf = [0u32; 1];
        assert_eq!(convert_utf8_to_utf32(b"A", &mut u32buf), Ok(1));
        assert_eq!(u32buf[0], 0x41);

        // € → UTF-16LE.
        let mut u16buf = [0u16; 2];
        assert_eq!(
            convert_utf8_to_utf16le(&[0xE2, 0x82, 0xAC], &mut u16buf),
            Ok(1)
        );
        assert_eq!(u16buf[0], 0x20AC);

        // 😀 → surrogate pair.
        assert_eq!(
            convert_utf8_to_utf16le(&[0xF0, 0x9F, 0x98, 0x80], &mut u16buf),
            Ok(2)
        );
        assert_eq!(u16buf, [0xD83D, 0xDE00]);

        // Overlong NUL.
        let err = validate_utf8_with_errors(&[0xC0, 0x80]).unwrap_err();
        assert_eq!((err.kind(), err.offset()), (ErrorKind::OverlongOrOutOfRange, 0));

        // Truncated three-byte sequence.
        let err = validate_utf8_with_errors(&[0xE0, 0x80]).unwrap_err();
        assert_eq!((err.kind(), err.offset()), (ErrorKind::TruncatedSequence, 0));

        // Lone high surrogate.
        let err = validate_utf16le_with_errors(&[0xD800]).unwrap_err();
        assert_eq!((err.kind(), err.offset()), (ErrorKind::LoneSurrogate, 0));
    }

    #[quickcheck]
    fn count_and_convert_agree(s: String) -> bool {
        let b = s.as_bytes();
        let mut utf16 = vec![0u16; utf16_length_from_utf8(b)];
        let mut utf32 = vec![0u32; utf32_length_from_utf8(b)];
        let n16 = convert_utf8_to_utf16le(b, &mut utf16).unwrap();
        let n32 = convert_utf8_to_utf32(b, &mut utf32).unwrap();
        n16 == utf16.len()
            && n32 == utf32.len()
            && n32 == count_utf8(b)
            && utf16 == s.encode_utf16().collect::<Vec<_>>()
            && utf32 == s.chars().map(|c| c as u32).collect::<Vec<_>>()
    }

    #[quickcheck]
    fn valid_and_checked_converters_agree(s: String) -> bool {
        let b = s.as_bytes();
        let mut checked = vec![0u16; utf16_length_from_utf8(b)];
        let mut assumed = vec![0u16; utf16_length_from_utf8(b)];
        let n1 = convert_utf8_to_utf16le(b, &mut checked).unwrap();
        let n2 = convert_valid_utf8_to_utf16le(b, &mut assumed);
        n1 == n2 && checked == assumed
    }

    #[quickcheck]
    fn validate_and_convert_reject_identically(bytes: Vec<u8>) -> bool {
        let validation = validate_utf8_with_errors(&bytes);
        let mut dst = vec![0u16; bytes.len() + 1];
        let conversion = convert_utf8_to_utf16le(&bytes, &mut dst);
        match (validation, conversion) {
            (Ok(()), Ok(_)) => true,
            (Err(v), Err(c)) => v == c,
            _ => false,
        }
    }

    #[quickcheck]
    fn utf16_roundtrip(s: String) -> bool {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut utf8 = vec![0u8; utf8_length_from_utf16le(&units)];
        let n = convert_utf16le_to_utf8(&units, &mut utf8).unwrap();
        n == utf8.len() && utf8 == s.as_bytes()
    }

    #[quickcheck]
    fn endianness_swap_roundtrip(units: Vec<u16>) -> bool {
        let mut swapped = vec![0u16; units.len()];
        let mut back = vec![0u16; units.len()];
        change_endianness_utf16(&units, &mut swapped);
        change_endianness_utf16(&swapped, &mut back);
        back == units
    }

    #[quickcheck]
    fn utf16_be_mirrors_le(s: String) -> bool {
        let le: Vec<u16> = s.encode_utf16().map(|u| u.to_le()).collect();
        let mut be = vec![0u16; le.len()];
        change_endianness_utf16(&le, &mut be);
        validate_utf16be(&be)
            && count_utf16be(&be) == count_utf16le(&le)
            && utf8_length_from_utf16be(&be) == utf8_length_from_utf16le(&le)
    }

    #[test]
    fn concurrent_calls_match_sequential() {
        let corpus = "shared corpus é中🦀 repeated for every thread ".repeat(512);
        let expected: Vec<u16> = corpus.encode_utf16().collect();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..16 {
                        let b = corpus.as_bytes();
                        assert!(validate_utf8(b));
                        let mut out = vec![0u16; utf16_length_from_utf8(b)];
                        let n = convert_utf8_to_utf16le(b, &mut out).unwrap();
                        assert_eq!(&out[..n], expected.as_slice());
                    }
                });
            }
        });
    }

    #[test]
    fn active_implementation_is_reported() {
        let name = active_implementation();
        assert!(implementations().iter().any(|d| d.name == name));
    }
}
