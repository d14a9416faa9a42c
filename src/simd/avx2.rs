//! x86-64 256-bit variant (AVX2).
//!
//! Same loop shapes as the 128-bit variant with the scan width doubled;
//! the windowed UTF-8 decode still consumes 16-byte windows (the table
//! is window-width-fixed), so the 256-bit win is in the ASCII bulk
//! paths, the counting masks and the endianness swap.

#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::*;

use crate::dispatch::Engine;
use crate::error::ConversionResult;
use crate::scalar::{utf16, utf32, utf8, Be, Endian, Le};
use crate::simd::window;

pub(crate) const BLOCK: usize = 32;
const BLOCK16: usize = 16;
const BLOCK32: usize = 8;

#[inline(always)]
fn needs_swap<E: Endian>() -> bool {
    E::write(0x00FF) != 0x00FF
}

/* ===================================================================== */
/*                        Register primitives                            */
/* ===================================================================== */

#[inline(always)]
unsafe fn load(src: &[u8], at: usize) -> __m256i {
    _mm256_loadu_si256(src.as_ptr().add(at).cast())
}

#[inline(always)]
unsafe fn load16(src: &[u16], at: usize) -> __m256i {
    _mm256_loadu_si256(src.as_ptr().add(at).cast())
}

#[inline(always)]
unsafe fn load32(src: &[u32], at: usize) -> __m256i {
    _mm256_loadu_si256(src.as_ptr().add(at).cast())
}

#[inline(always)]
unsafe fn swap16(v: __m256i) -> __m256i {
    _mm256_or_si256(_mm256_slli_epi16(v, 8), _mm256_srli_epi16(v, 8))
}

#[target_feature(enable = "avx2")]
unsafe fn ascii_block(src: &[u8], at: usize) -> bool {
    _mm256_movemask_epi8(load(src, at)) == 0
}

#[target_feature(enable = "avx2")]
unsafe fn continuation_mask_block(src: &[u8], at: usize) -> u32 {
    let v = load(src, at);
    let tagged = _mm256_and_si256(v, _mm256_set1_epi8(0xC0u8 as i8));
    let cont = _mm256_cmpeq_epi8(tagged, _mm256_set1_epi8(0x80u8 as i8));
    _mm256_movemask_epi8(cont) as u32
}

#[target_feature(enable = "avx2")]
unsafe fn four_byte_lead_mask_block(src: &[u8], at: usize) -> u32 {
    let v = load(src, at);
    let flipped = _mm256_xor_si256(v, _mm256_set1_epi8(0x80u8 as i8));
    let m = _mm256_cmpgt_epi8(flipped, _mm256_set1_epi8(0x6F));
    _mm256_movemask_epi8(m) as u32
}

/// 16-byte continuation movemask feeding the windowed decoder.
#[target_feature(enable = "avx2")]
unsafe fn continuation_mask_window(src: &[u8], at: usize) -> u32 {
    let v = _mm_loadu_si128(src.as_ptr().add(at).cast());
    let tagged = _mm_and_si128(v, _mm_set1_epi8(0xC0u8 as i8));
    let cont = _mm_cmpeq_epi8(tagged, _mm_set1_epi8(0x80u8 as i8));
    _mm_movemask_epi8(cont) as u32 & 0xFFFF
}

#[target_feature(enable = "avx2")]
unsafe fn ascii_window(src: &[u8], at: usize) -> bool {
    _mm_movemask_epi8(_mm_loadu_si128(src.as_ptr().add(at).cast())) == 0
}

/// Zero-extend 32 ASCII bytes into 32 UTF-16 units.
#[target_feature(enable = "avx2")]
unsafe fn widen_ascii_to_utf16<E: Endian>(src: &[u8], at: usize, dst: &mut [u16], out: usize) {
    assert!(out + BLOCK <= dst.len());
    let lo = _mm_loadu_si128(src.as_ptr().add(at).cast());
    let hi = _mm_loadu_si128(src.as_ptr().add(at + 16).cast());
    let mut a = _mm256_cvtepu8_epi16(lo);
    let mut b = _mm256_cvtepu8_epi16(hi);
    if needs_swap::<E>() {
        a = swap16(a);
        b = swap16(b);
    }
    _mm256_storeu_si256(dst.as_mut_ptr().add(out).cast(), a);
    _mm256_storeu_si256(dst.as_mut_ptr().add(out + 16).cast(), b);
}

/// Zero-extend 32 ASCII bytes into 32 UTF-32 units.
#[target_feature(enable = "avx2")]
unsafe fn widen_ascii_to_utf32(src: &[u8], at: usize, dst: &mut [u32], out: usize) {
    assert!(out + BLOCK <= dst.len());
    let p = dst.as_mut_ptr();
    for k in 0..4 {
        let q = _mm_loadl_epi64(src.as_ptr().add(at + 8 * k).cast());
        _mm256_storeu_si256(p.add(out + 8 * k).cast(), _mm256_cvtepu8_epi32(q));
    }
}

#[target_feature(enable = "avx2")]
unsafe fn all_ascii16<E: Endian>(src: &[u16], at: usize) -> bool {
    let mut v = load16(src, at);
    if needs_swap::<E>() {
        v = swap16(v);
    }
    let over = _mm256_subs_epu16(v, _mm256_set1_epi16(0x7F));
    let zero = _mm256_cmpeq_epi16(over, _mm256_setzero_si256());
    _mm256_movemask_epi8(zero) == -1i32
}

#[target_feature(enable = "avx2")]
unsafe fn surrogate_mask16<E: Endian>(src: &[u16], at: usize) -> u32 {
    let mut v = load16(src, at);
    if needs_swap::<E>() {
        v = swap16(v);
    }
    let tagged = _mm256_and_si256(v, _mm256_set1_epi16(0xF800u16 as i16));
    let surr = _mm256_cmpeq_epi16(tagged, _mm256_set1_epi16(0xD800u16 as i16));
    _mm256_movemask_epi8(surr) as u32
}

#[target_feature(enable = "avx2")]
unsafe fn low_surrogate_mask16<E: Endian>(src: &[u16], at: usize) -> u32 {
    let mut v = load16(src, at);
    if needs_swap::<E>() {
        v = swap16(v);
    }
    let tagged = _mm256_and_si256(v, _mm256_set1_epi16(0xFC00u16 as i16));
    let low = _mm256_cmpeq_epi16(tagged, _mm256_set1_epi16(0xDC00u16 as i16));
    _mm256_movemask_epi8(low) as u32
}

/// Pack 16 ASCII UTF-16 units into 16 bytes (lane-crossing fixup via
/// permute).
#[target_feature(enable = "avx2")]
unsafe fn narrow_ascii16_to_utf8<E: Endian>(src: &[u16], at: usize, dst: &mut [u8], out: usize) {
    assert!(out + BLOCK16 <= dst.len());
    let mut v = load16(src, at);
    if needs_swap::<E>() {
        v = swap16(v);
    }
    let packed = _mm256_packus_epi16(v, _mm256_setzero_si256());
    let fixed = _mm256_permute4x64_epi64(packed, 0b11011000);
    _mm_storeu_si128(dst.as_mut_ptr().add(out).cast(), _mm256_castsi256_si128(fixed));
}

/// Zero-extend 16 surrogate-free UTF-16 units into 16 UTF-32 units.
#[target_feature(enable = "avx2")]
unsafe fn widen_bmp16_to_utf32<E: Endian>(src: &[u16], at: usize, dst: &mut [u32], out: usize) {
    assert!(out + BLOCK16 <= dst.len());
    let mut lo = _mm_loadu_si128(src.as_ptr().add(at).cast());
    let mut hi = _mm_loadu_si128(src.as_ptr().add(at + 8).cast());
    if needs_swap::<E>() {
        lo = _mm_or_si128(_mm_slli_epi16(lo, 8), _mm_srli_epi16(lo, 8));
        hi = _mm_or_si128(_mm_slli_epi16(hi, 8), _mm_srli_epi16(hi, 8));
    }
    let p = dst.as_mut_ptr();
    _mm256_storeu_si256(p.add(out).cast(), _mm256_cvtepu16_epi32(lo));
    _mm256_storeu_si256(p.add(out + 8).cast(), _mm256_cvtepu16_epi32(hi));
}

#[target_feature(enable = "avx2")]
unsafe fn illegal_mask32(src: &[u32], at: usize) -> u32 {
    let v = load32(src, at);
    let sign = _mm256_set1_epi32(0x8000_0000u32 as i32);
    let too_big = _mm256_cmpgt_epi32(
        _mm256_xor_si256(v, sign),
        _mm256_set1_epi32(0x8010_FFFFu32 as i32),
    );
    let tagged = _mm256_and_si256(v, _mm256_set1_epi32(0xFFFF_F800u32 as i32));
    let surrogate = _mm256_cmpeq_epi32(tagged, _mm256_set1_epi32(0xD800));
    _mm256_movemask_epi8(_mm256_or_si256(too_big, surrogate)) as u32
}

#[target_feature(enable = "avx2")]
unsafe fn ascii_block32(src: &[u32], at: usize) -> bool {
    let v = load32(src, at);
    let sign = _mm256_set1_epi32(0x8000_0000u32 as i32);
    let over = _mm256_cmpgt_epi32(
        _mm256_xor_si256(v, sign),
        _mm256_set1_epi32(0x8000_007Fu32 as i32),
    );
    _mm256_movemask_epi8(over) == 0
}

/* ===================================================================== */
/*                              UTF-8 ops                                */
/* ===================================================================== */

#[target_feature(enable = "avx2")]
unsafe fn validate_utf8(src: &[u8]) -> ConversionResult<()> {
    let mut i = 0;
    while i < src.len() {
        if i + BLOCK <= src.len() && ascii_block(src, i) {
            i += BLOCK;
            continue;
        }
        i += utf8::ascii_run(src, i);
        if i >= src.len() {
            break;
        }
        let (_, len) = utf8::decode_sequence(src, i)?;
        i += len;
    }
    Ok(())
}

#[target_feature(enable = "avx2")]
unsafe fn count_utf8(src: &[u8]) -> usize {
    let mut i = 0;
    let mut n = 0;
    while i + BLOCK <= src.len() {
        n += BLOCK - continuation_mask_block(src, i).count_ones() as usize;
        i += BLOCK;
    }
    n + utf8::count(&src[i..])
}

#[target_feature(enable = "avx2")]
unsafe fn utf16_length_from_utf8(src: &[u8]) -> usize {
    let mut i = 0;
    let mut n = 0;
    while i + BLOCK <= src.len() {
        n += BLOCK - continuation_mask_block(src, i).count_ones() as usize
            + four_byte_lead_mask_block(src, i).count_ones() as usize;
        i += BLOCK;
    }
    n + utf8::utf16_length(&src[i..])
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_utf8_to_utf16<E: Endian>(
    src: &[u8],
    dst: &mut [u16],
) -> ConversionResult<usize> {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK <= src.len() && ascii_block(src, i) {
            widen_ascii_to_utf16::<E>(src, i, dst, out);
            i += BLOCK;
            out += BLOCK;
            continue;
        }
        if i + window::WINDOW <= src.len() {
            if ascii_window(src, i) {
                // Sub-block ASCII: take the narrow bulk path.
                for j in 0..window::WINDOW {
                    dst[out + j] = E::write(src[i + j] as u16);
                }
                i += window::WINDOW;
                out += window::WINDOW;
                continue;
            }
            let mask = window::end_mask(continuation_mask_window(src, i));
            if let Some((consumed, written)) =
                window::decode_to_utf16::<E>(&src[i..], mask, dst, out)
            {
                i += consumed;
                out += written;
                continue;
            }
        }
        let (len, written) = utf8::step_to_utf16::<E>(src, i, dst, out)?;
        i += len;
        out += written;
    }
    Ok(out)
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_valid_utf8_to_utf16<E: Endian>(src: &[u8], dst: &mut [u16]) -> usize {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK <= src.len() && ascii_block(src, i) {
            widen_ascii_to_utf16::<E>(src, i, dst, out);
            i += BLOCK;
            out += BLOCK;
            continue;
        }
        if i + window::WINDOW <= src.len() {
            let mask = window::end_mask(continuation_mask_window(src, i));
            if let Some((consumed, written)) =
                window::decode_valid_to_utf16::<E>(&src[i..], mask, dst, out)
            {
                i += consumed;
                out += written;
                continue;
            }
        }
        let (len, written) = utf8::step_valid_to_utf16::<E>(src, i, dst, out);
        i += len;
        out += written;
    }
    out
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_utf8_to_utf32(src: &[u8], dst: &mut [u32]) -> ConversionResult<usize> {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK <= src.len() && ascii_block(src, i) {
            widen_ascii_to_utf32(src, i, dst, out);
            i += BLOCK;
            out += BLOCK;
            continue;
        }
        if i + window::WINDOW <= src.len() {
            let mask = window::end_mask(continuation_mask_window(src, i));
            if let Some((consumed, written)) = window::decode_to_utf32(&src[i..], mask, dst, out) {
                i += consumed;
                out += written;
                continue;
            }
        }
        let (len, written) = utf8::step_to_utf32(src, i, dst, out)?;
        i += len;
        out += written;
    }
    Ok(out)
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_valid_utf8_to_utf32(src: &[u8], dst: &mut [u32]) -> usize {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK <= src.len() && ascii_block(src, i) {
            widen_ascii_to_utf32(src, i, dst, out);
            i += BLOCK;
            out += BLOCK;
            continue;
        }
        if i + window::WINDOW <= src.len() {
            let mask = window::end_mask(continuation_mask_window(src, i));
            if let Some((consumed, written)) = window::decode_valid_to_utf32(&src[i..], mask, dst, out)
            {
                i += consumed;
                out += written;
                continue;
            }
        }
        let (len, written) = utf8::step_valid_to_utf32(src, i, dst, out);
        i += len;
        out += written;
    }
    out
}

/* ===================================================================== */
/*                             UTF-16 ops                                */
/* ===================================================================== */

#[target_feature(enable = "avx2")]
unsafe fn validate_utf16<E: Endian>(src: &[u16]) -> ConversionResult<()> {
    let mut i = 0;
    while i < src.len() {
        if i + BLOCK16 <= src.len() && surrogate_mask16::<E>(src, i) == 0 {
            i += BLOCK16;
            continue;
        }
        let (_, units) = utf16::decode_pair::<E>(src, i)?;
        i += units;
    }
    Ok(())
}

#[target_feature(enable = "avx2")]
unsafe fn count_utf16<E: Endian>(src: &[u16]) -> usize {
    let mut i = 0;
    let mut n = 0;
    while i + BLOCK16 <= src.len() {
        n += BLOCK16 - low_surrogate_mask16::<E>(src, i).count_ones() as usize / 2;
        i += BLOCK16;
    }
    n + utf16::count::<E>(&src[i..])
}

#[target_feature(enable = "avx2")]
unsafe fn utf8_length_from_utf16<E: Endian>(src: &[u16]) -> usize {
    let mut i = 0;
    let mut n = 0;
    while i + BLOCK16 <= src.len() {
        if all_ascii16::<E>(src, i) {
            n += BLOCK16;
        } else {
            n += utf16::utf8_length::<E>(&src[i..i + BLOCK16]);
        }
        i += BLOCK16;
    }
    n + utf16::utf8_length::<E>(&src[i..])
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_utf16_to_utf8<E: Endian>(
    src: &[u16],
    dst: &mut [u8],
) -> ConversionResult<usize> {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK16 <= src.len() && all_ascii16::<E>(src, i) {
            narrow_ascii16_to_utf8::<E>(src, i, dst, out);
            i += BLOCK16;
            out += BLOCK16;
            continue;
        }
        let (cp, units) = utf16::decode_pair::<E>(src, i)?;
        out += utf8::put_utf8(cp, dst, out);
        i += units;
    }
    Ok(out)
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_valid_utf16_to_utf8<E: Endian>(src: &[u16], dst: &mut [u8]) -> usize {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK16 <= src.len() && all_ascii16::<E>(src, i) {
            narrow_ascii16_to_utf8::<E>(src, i, dst, out);
            i += BLOCK16;
            out += BLOCK16;
            continue;
        }
        let (cp, units) = utf16::decode_pair_unchecked::<E>(src, i);
        out += utf8::put_utf8(cp, dst, out);
        i += units;
    }
    out
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_utf16_to_utf32<E: Endian>(
    src: &[u16],
    dst: &mut [u32],
) -> ConversionResult<usize> {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK16 <= src.len() && surrogate_mask16::<E>(src, i) == 0 {
            widen_bmp16_to_utf32::<E>(src, i, dst, out);
            i += BLOCK16;
            out += BLOCK16;
            continue;
        }
        let (cp, units) = utf16::decode_pair::<E>(src, i)?;
        dst[out] = cp;
        out += 1;
        i += units;
    }
    Ok(out)
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_valid_utf16_to_utf32<E: Endian>(src: &[u16], dst: &mut [u32]) -> usize {
    let mut i = 0;
    let mut out = 0;
    while i < src.len() {
        if i + BLOCK16 <= src.len() && surrogate_mask16::<E>(src, i) == 0 {
            widen_bmp16_to_utf32::<E>(src, i, dst, out);
            i += BLOCK16;
            out += BLOCK16;
            continue;
        }
        let (cp, units) = utf16::decode_pair_unchecked::<E>(src, i);
        dst[out] = cp;
        out += 1;
        i += units;
    }
    out
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn change_endianness_utf16(src: &[u16], dst: &mut [u16]) {
    assert!(dst.len() >= src.len());
    let mut i = 0;
    while i + BLOCK16 <= src.len() {
        let v = swap16(load16(src, i));
        _mm256_storeu_si256(dst.as_mut_ptr().add(i).cast(), v);
        i += BLOCK16;
    }
    utf16::change_endianness(&src[i..], &mut dst[i..]);
}

/* ===================================================================== */
/*                             UTF-32 ops                                */
/* ===================================================================== */

#[target_feature(enable = "avx2")]
unsafe fn validate_utf32(src: &[u32]) -> ConversionResult<()> {
    let mut i = 0;
    while i + BLOCK32 <= src.len() {
        if illegal_mask32(src, i) != 0 {
            break;
        }
        i += BLOCK32;
    }
    utf32::validate_with_errors(&src[i..]).map_err(|e| e.rebase(i))
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_utf32_to_utf8(src: &[u32], dst: &mut [u8]) -> ConversionResult<usize> {
    let mut i = 0;
    let mut out = 0;
    let mut lanes = [0u32; BLOCK32];
    while i < src.len() {
        if i + BLOCK32 <= src.len() && ascii_block32(src, i) {
            assert!(out + BLOCK32 <= dst.len());
            _mm256_storeu_si256(lanes.as_mut_ptr().cast(), load32(src, i));
            for (j, &cp) in lanes.iter().enumerate() {
                dst[out + j] = cp as u8;
            }
            i += BLOCK32;
            out += BLOCK32;
            continue;
        }
        let cp = src[i];
        if !utf32::is_legal(cp) {
            return Err(crate::error::ConversionError::new(
                crate::error::ErrorKind::OverlongOrOutOfRange,
                i,
            ));
        }
        out += utf8::put_utf8(cp, dst, out);
        i += 1;
    }
    Ok(out)
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn convert_valid_utf32_to_utf8(src: &[u32], dst: &mut [u8]) -> usize {
    let mut i = 0;
    let mut out = 0;
    let mut lanes = [0u32; BLOCK32];
    while i < src.len() {
        if i + BLOCK32 <= src.len() && ascii_block32(src, i) {
            assert!(out + BLOCK32 <= dst.len());
            _mm256_storeu_si256(lanes.as_mut_ptr().cast(), load32(src, i));
            for (j, &cp) in lanes.iter().enumerate() {
                dst[out + j] = cp as u8;
            }
            i += BLOCK32;
            out += BLOCK32;
            continue;
        }
        out += utf8::put_utf8(src[i], dst, out);
        i += 1;
    }
    out
}

/* ===================================================================== */
/*                                Engine                                 */
/* ===================================================================== */

pub(crate) struct Avx2Engine;

pub(crate) static ENGINE: Avx2Engine = Avx2Engine;

impl Engine for Avx2Engine {
    fn name(&self) -> &'static str {
        "avx2"
    }

    fn validate_utf8(&self, src: &[u8]) -> bool {
        unsafe { validate_utf8(src).is_ok() }
    }

    fn validate_utf8_with_errors(&self, src: &[u8]) -> ConversionResult<()> {
        unsafe { validate_utf8(src) }
    }

    fn validate_utf16le(&self, src: &[u16]) -> bool {
        unsafe { validate_utf16::<Le>(src).is_ok() }
    }

    fn validate_utf16be(&self, src: &[u16]) -> bool {
        unsafe { validate_utf16::<Be>(src).is_ok() }
    }

    fn validate_utf16le_with_errors(&self, src: &[u16]) -> ConversionResult<()> {
        unsafe { validate_utf16::<Le>(src) }
    }

    fn validate_utf16be_with_errors(&self, src: &[u16]) -> ConversionResult<()> {
        unsafe { validate_utf16::<Be>(src) }
    }

    fn validate_utf32(&self, src: &[u32]) -> bool {
        unsafe { validate_utf32(src).is_ok() }
    }

    fn validate_utf32_with_errors(&self, src: &[u32]) -> ConversionResult<()> {
        unsafe { validate_utf32(src) }
    }

    fn count_utf8(&self, src: &[u8]) -> usize {
        unsafe { count_utf8(src) }
    }

    fn count_utf16le(&self, src: &[u16]) -> usize {
        unsafe { count_utf16::<Le>(src) }
    }

    fn count_utf16be(&self, src: &[u16]) -> usize {
        unsafe { count_utf16::<Be>(src) }
    }

    fn utf16_length_from_utf8(&self, src: &[u8]) -> usize {
        unsafe { utf16_length_from_utf8(src) }
    }

    fn utf32_length_from_utf8(&self, src: &[u8]) -> usize {
        unsafe { count_utf8(src) }
    }

    fn utf8_length_from_utf16le(&self, src: &[u16]) -> usize {
        unsafe { utf8_length_from_utf16::<Le>(src) }
    }

    fn utf8_length_from_utf16be(&self, src: &[u16]) -> usize {
        unsafe { utf8_length_from_utf16::<Be>(src) }
    }

    fn utf32_length_from_utf16le(&self, src: &[u16]) -> usize {
        unsafe { count_utf16::<Le>(src) }
    }

    fn utf32_length_from_utf16be(&self, src: &[u16]) -> usize {
        unsafe { count_utf16::<Be>(src) }
    }

    fn convert_utf8_to_utf16le(&self, src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
        unsafe { convert_utf8_to_utf16::<Le>(src, dst) }
    }

    fn convert_utf8_to_utf16be(&self, src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
        unsafe { convert_utf8_to_utf16::<Be>(src, dst) }
    }

    fn convert_utf8_to_utf32(&self, src: &[u8], dst: &mut [u32]) -> ConversionResult<usize> {
        unsafe { convert_utf8_to_utf32(src, dst) }
    }

    fn convert_utf16le_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
        unsafe { convert_utf16_to_utf8::<Le>(src, dst) }
    }

    fn convert_utf16be_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
        unsafe { convert_utf16_to_utf8::<Be>(src, dst) }
    }

    fn convert_utf16le_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
        unsafe { convert_utf16_to_utf32::<Le>(src, dst) }
    }

    fn convert_utf16be_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
        unsafe { convert_utf16_to_utf32::<Be>(src, dst) }
    }

    fn convert_utf32_to_utf8(&self, src: &[u32], dst: &mut [u8]) -> ConversionResult<usize> {
        unsafe { convert_utf32_to_utf8(src, dst) }
    }

    fn convert_valid_utf8_to_utf16le(&self, src: &[u8], dst: &mut [u16]) -> usize {
        unsafe { convert_valid_utf8_to_utf16::<Le>(src, dst) }
    }

    fn convert_valid_utf8_to_utf16be(&self, src: &[u8], dst: &mut [u16]) -> usize {
        unsafe { convert_valid_utf8_to_utf16::<Be>(src, dst) }
    }

    fn convert_valid_utf8_to_utf32(&self, src: &[u8], dst: &mut [u32]) -> usize {
        unsafe { convert_valid_utf8_to_utf32(src, dst) }
    }

    fn convert_valid_utf16le_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> usize {
        unsafe { convert_valid_utf16_to_utf8::<Le>(src, dst) }
    }

    fn convert_valid_utf16be_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> usize {
        unsafe { convert_valid_utf16_to_utf8::<Be>(src, dst) }
    }

    fn convert_valid_utf16le_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> usize {
        unsafe { convert_valid_utf16_to_utf32::<Le>(src, dst) }
    }

    fn convert_valid_utf16be_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> usize {
        unsafe { convert_valid_utf16_to_utf32::<Be>(src, dst) }
    }

    fn convert_valid_utf32_to_utf8(&self, src: &[u32], dst: &mut [u8]) -> usize {
        unsafe { convert_valid_utf32_to_utf8(src, dst) }
    }

    fn change_endianness_utf16(&self, src: &[u16], dst: &mut [u16]) {
        unsafe { change_endianness_utf16(src, dst) }
    }
}

/* ===================================================================== */
/*                               Tests                                   */
/* ===================================================================== */
