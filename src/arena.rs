//! Exact-sized allocating conversion wrappers.
//!
//! Convenience layer over the span-in/span-out engine: each function
//! sizes its output with the matching length estimator, converts through
//! the dispatcher, and hands back either an owned buffer or a slice
//! living in a caller-provided `bumpalo` arena. No codec logic lives
//! here.

use bumpalo::Bump;

use crate::error::ConversionResult;

/* ===================================================================== */
/*                           Owned outputs                               */
/* ===================================================================== */

pub fn utf8_to_utf16le(src: &[u8]) -> ConversionResult<Vec<u16>> {
    let mut out = vec![0u16; crate::utf16_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf16le(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf8_to_utf16be(src: &[u8]) -> ConversionResult<Vec<u16>> {
    let mut out = vec![0u16; crate::utf16_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf16be(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf8_to_utf32(src: &[u8]) -> ConversionResult<Vec<u32>> {
    let mut out = vec![0u32; crate::utf32_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf32(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf16le_to_utf8(src: &[u16]) -> ConversionResult<String> {
    let mut out = vec![0u8; crate::utf8_length_from_utf16le(src)];
    let n = crate::convert_utf16le_to_utf8(src, &mut out)?;
    out.truncate(n);
    // The validating conversion only ever emits well-formed UTF-8.
    Ok(unsafe { String::from_utf8_unchecked(out) })
}

pub fn utf16be_to_utf8(src: &[u16]) -> ConversionResult<String> {
    let mut out = vec![0u8; crate::utf8_length_from_utf16be(src)];
    let n = crate::convert_utf16be_to_utf8(src, &mut out)?;
    out.truncate(n);
    Ok(unsafe { String::from_utf8_unchecked(out) })
}

pub fn utf16le_to_utf32(src: &[u16]) -> ConversionResult<Vec<u32>> {
    let mut out = vec![0u32; crate::utf32_length_from_utf16le(src)];
    let n = crate::convert_utf16le_to_utf32(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf16be_to_utf32(src: &[u16]) -> ConversionResult<Vec<u32>> {
    let mut out = vec![0u32; crate::utf32_length_from_utf16be(src)];
    let n = crate::convert_utf16be_to_utf32(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf32_to_utf8(src: &[u32]) -> ConversionResult<String> {
    let mut out = vec![0u8; crate::utf8_length_from_utf32(src)];
    let n = crate::convert_utf32_to_utf8(src, &mut out)?;
    out.truncate(n);
    Ok(unsafe { String::from_utf8_unchecked(out) })
}

pub fn utf32_to_utf16le(src: &[u32]) -> ConversionResult<Vec<u16>> {
    let mut out = vec![0u16; crate::utf16_length_from_utf32(src)];
    let n = crate::convert_utf32_to_utf16le(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

pub fn utf32_to_utf16be(src: &[u32]) -> ConversionResult<Vec<u16>> {
    let mut out = vec![0u16; crate::utf16_length_from_utf32(src)];
    let n = crate::convert_utf32_to_utf16be(src, &mut out)?;
    out.truncate(n);
    Ok(out)
}

/* ===================================================================== */
/*                            Arena outputs                              */
/* ===================================================================== */

pub fn utf8_to_utf16le_bump<'a>(src: &[u8], bump: &'a Bump) -> ConversionResult<&'a [u16]> {
    let mut out = bumpalo::vec![in bump; 0u16; crate::utf16_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf16le(src, &mut out)?;
    out.truncate(n);
    Ok(out.into_bump_slice())
}

pub fn utf8_to_utf16be_bump<'a>(src: &[u8], bump: &'a Bump) -> ConversionResult<&'a [u16]> {
    let mut out = bumpalo::vec![in bump; 0u16; crate::utf16_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf16be(src, &mut out)?;
    out.truncate(n);
    Ok(out.into_bump_slice())
}

pub fn utf8_to_utf32_bump<'a>(src: &[u8], bump: &'a Bump) -> ConversionResult<&'a [u32]> {
    let mut out = bumpalo::vec![in bump; 0u32; crate::utf32_length_from_utf8(src)];
    let n = crate::convert_utf8_to_utf32(src, &mut out)?;
    out.truncate(n);
    Ok(out.into_bump_slice())
}

pub fn utf16le_to_utf8_bump<'a>(src: &[u16], bump: &'a Bump) -> ConversionResult<&'a str> {
    let mut out = bumpalo::vec![in bump; 0u8; crate::utf8_length_from_utf16le(src)];
    let n = crate::convert_utf16le_to_utf8(src, &mut out)?;
    out.truncate(n);
    let slice = out.into_bump_slice();
    Ok(unsafe { core::str::from_utf8_unchecked(slice) })
}

pub fn utf16be_to_utf8_bump<'a>(src: &[u16], bump: &'a Bump) -> ConversionResult<&'a str> {
    let mut out = bumpalo::vec![in bump; 0u8; crate::utf8_length_from_utf16be(src)];
    let n = crate::convert_utf16be_to_utf8(src, &mut out)?;
    out.truncate(n);
    let slice = out.into_bump_slice();
    Ok(unsafe { core::str::from_utf8_unchecked(slice) })
}

pub fn utf32_to_utf8_bump<'a>(src: &[u32], bump: &'a Bump) -> ConversionResult<&'a str> {
    let mut out = bumpalo::vec![in bump; 0u8; crate::utf8_length_from_utf32(src)];
    let n = crate::convert_utf32_to_utf8(src, &mut out)?;
    out.truncate(n);
    let slice = out.into_bump_slice();
    Ok(unsafe { core::str::from_utf8_unchecked(slice) })
}

/* ===================================================================== */
/*                               Tests                                   */
/* ===================================================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn owned_roundtrip() {
        let s = "Hello, 世界! 🦀 café";
        let utf16 = utf8_to_utf16le(s.as_bytes()).unwrap();
        assert_eq!(utf16, s.encode_utf16().collect::<Vec<_>>());
        assert_eq!(utf16le_to_utf8(&utf16).unwrap(), s);

        let utf32 = utf8_to_utf32(s.as_bytes()).unwrap();
        assert_eq!(utf32, s.chars().map(|c| c as u32).collect::<Vec<_>>());
        assert_eq!(utf32_to_utf8(&utf32).unwrap(), s);
    }

    #[test]
    fn bump_outputs_match_owned() {
        let s = "arena path 漢字 🦀";
        let bump = Bump::new();
        let utf16 = utf8_to_utf16le_bump(s.as_bytes(), &bump).unwrap();
        assert_eq!(utf16, utf8_to_utf16le(s.as_bytes()).unwrap().as_slice());
        assert_eq!(utf16le_to_utf8_bump(utf16, &bump).unwrap(), s);
    }

    #[test]
    fn exact_sizing_no_reallocation() {
        let s = "sized exactly: é中🦀";
        let out = utf8_to_utf16le(s.as_bytes()).unwrap();
        assert_eq!(out.len(), out.capacity());
    }

    #[test]
    fn errors_propagate() {
        let err = utf8_to_utf16le(&[0x41, 0xE0, 0x80]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedSequence);
        assert_eq!(err.offset(), 1);

        let bump = Bump::new();
        assert!(utf16le_to_utf8_bump(&[0xD800], &bump).is_err());
    }

    #[test]
    fn utf32_to_utf16_pairs() {
        let out = utf32_to_utf16le(&[0x1F600]).unwrap();
        assert_eq!(out, vec![0xD83D, 0xDE00]);
    }
}
