//! Implementation variants and the process-wide dispatcher.
//!
//! Every public entry point routes through the one variant selected on
//! first use: the highest-priority instruction-set family that is both
//! compiled in and reported by the host CPU. Selection is memoized in a
//! `OnceLock` — write-once, read lock-free, never re-detected.
//!
//! The [`Engine`] trait is the full operation set. Default methods are
//! the portable scalar routines, so the scalar variant is an empty impl
//! and every vector variant overrides exactly the operations its
//! register family accelerates. Whatever a variant does not override is
//! shared with scalar by construction, which is half of the
//! variant-equivalence story; the other half is that the vector batch
//! paths re-enter the scalar decoder on anything irregular.

use std::sync::OnceLock;

use crate::cpu::{self, Isa};
use crate::error::ConversionResult;
use crate::scalar::{utf16, utf32, utf8, Be, Le};

macro_rules! debug_println {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-yutf-internal") || std::env::var("DEBUG").is_ok() {
            eprintln!($($arg)*);
        }
    };
}

/// Full operation set of one implementation variant.
pub(crate) trait Engine: Send + Sync {
    fn name(&self) -> &'static str;

    /* ── validation ─────────────────────────────────────────────────── */

    fn validate_utf8(&self, src: &[u8]) -> bool {
        utf8::validate(src)
    }

    fn validate_utf8_with_errors(&self, src: &[u8]) -> ConversionResult<()> {
        utf8::validate_with_errors(src)
    }

    fn validate_utf16le(&self, src: &[u16]) -> bool {
        utf16::validate::<Le>(src)
    }

    fn validate_utf16be(&self, src: &[u16]) -> bool {
        utf16::validate::<Be>(src)
    }

    fn validate_utf16le_with_errors(&self, src: &[u16]) -> ConversionResult<()> {
        utf16::validate_with_errors::<Le>(src)
    }

    fn validate_utf16be_with_errors(&self, src: &[u16]) -> ConversionResult<()> {
        utf16::validate_with_errors::<Be>(src)
    }

    fn validate_utf32(&self, src: &[u32]) -> bool {
        utf32::validate(src)
    }

    fn validate_utf32_with_errors(&self, src: &[u32]) -> ConversionResult<()> {
        utf32::validate_with_errors(src)
    }

    /* ── counting & length estimation ───────────────────────────────── */

    fn count_utf8(&self, src: &[u8]) -> usize {
        utf8::count(src)
    }

    fn count_utf16le(&self, src: &[u16]) -> usize {
        utf16::count::<Le>(src)
    }

    fn count_utf16be(&self, src: &[u16]) -> usize {
        utf16::count::<Be>(src)
    }

    fn utf16_length_from_utf8(&self, src: &[u8]) -> usize {
        utf8::utf16_length(src)
    }

    fn utf32_length_from_utf8(&self, src: &[u8]) -> usize {
        utf8::utf32_length(src)
    }

    fn utf8_length_from_utf16le(&self, src: &[u16]) -> usize {
        utf16::utf8_length::<Le>(src)
    }

    fn utf8_length_from_utf16be(&self, src: &[u16]) -> usize {
        utf16::utf8_length::<Be>(src)
    }

    fn utf32_length_from_utf16le(&self, src: &[u16]) -> usize {
        utf16::utf32_length::<Le>(src)
    }

    fn utf32_length_from_utf16be(&self, src: &[u16]) -> usize {
        utf16::utf32_length::<Be>(src)
    }

    fn utf8_length_from_utf32(&self, src: &[u32]) -> usize {
        utf32::utf8_length(src)
    }

    fn utf16_length_from_utf32(&self, src: &[u32]) -> usize {
        utf32::utf16_length(src)
    }

    /* ── transcoding, validating ────────────────────────────────────── */

    fn convert_utf8_to_utf16le(&self, src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
        utf8::convert_to_utf16::<Le>(src, dst)
    }

    fn convert_utf8_to_utf16be(&self, src: &[u8], dst: &mut [u16]) -> ConversionResult<usize> {
        utf8::convert_to_utf16::<Be>(src, dst)
    }

    fn convert_utf8_to_utf32(&self, src: &[u8], dst: &mut [u32]) -> ConversionResult<usize> {
        utf8::convert_to_utf32(src, dst)
    }

    fn convert_utf16le_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
        utf16::convert_to_utf8::<Le>(src, dst)
    }

    fn convert_utf16be_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> ConversionResult<usize> {
        utf16::convert_to_utf8::<Be>(src, dst)
    }

    fn convert_utf16le_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
        utf16::convert_to_utf32::<Le>(src, dst)
    }

    fn convert_utf16be_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> ConversionResult<usize> {
        utf16::convert_to_utf32::<Be>(src, dst)
    }

    fn convert_utf32_to_utf8(&self, src: &[u32], dst: &mut [u8]) -> ConversionResult<usize> {
        utf32::convert_to_utf8(src, dst)
    }

    fn convert_utf32_to_utf16le(&self, src: &[u32], dst: &mut [u16]) -> ConversionResult<usize> {
        utf32::convert_to_utf16::<Le>(src, dst)
    }

    fn convert_utf32_to_utf16be(&self, src: &[u32], dst: &mut [u16]) -> ConversionResult<usize> {
        utf32::convert_to_utf16::<Be>(src, dst)
    }

    /* ── transcoding, assume-valid ──────────────────────────────────── */

    fn convert_valid_utf8_to_utf16le(&self, src: &[u8], dst: &mut [u16]) -> usize {
        utf8::convert_valid_to_utf16::<Le>(src, dst)
    }

    fn convert_valid_utf8_to_utf16be(&self, src: &[u8], dst: &mut [u16]) -> usize {
        utf8::convert_valid_to_utf16::<Be>(src, dst)
    }

    fn convert_valid_utf8_to_utf32(&self, src: &[u8], dst: &mut [u32]) -> usize {
        utf8::convert_valid_to_utf32(src, dst)
    }

    fn convert_valid_utf16le_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> usize {
        utf16::convert_valid_to_utf8::<Le>(src, dst)
    }

    fn convert_valid_utf16be_to_utf8(&self, src: &[u16], dst: &mut [u8]) -> usize {
        utf16::convert_valid_to_utf8::<Be>(src, dst)
    }

    fn convert_valid_utf16le_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> usize {
        utf16::convert_valid_to_utf32::<Le>(src, dst)
    }

    fn convert_valid_utf16be_to_utf32(&self, src: &[u16], dst: &mut [u32]) -> usize {
        utf16::convert_valid_to_utf32::<Be>(src, dst)
    }

    fn convert_valid_utf32_to_utf8(&self, src: &[u32], dst: &mut [u8]) -> usize {
        utf32::convert_valid_to_utf8(src, dst)
    }

    fn convert_valid_utf32_to_utf16le(&self, src: &[u32], dst: &mut [u16]) -> usize {
        utf32::convert_valid_to_utf16::<Le>(src, dst)
    }

    fn convert_valid_utf32_to_utf16be(&self, src: &[u32], dst: &mut [u16]) -> usize {
        utf32::convert_valid_to_utf16::<Be>(src, dst)
    }

    /* ── endianness ─────────────────────────────────────────────────── */

    fn change_endianness_utf16(&self, src: &[u16], dst: &mut [u16]) {
        utf16::change_endianness(src, dst);
    }
}

/// Portable scalar variant: the trait defaults, nothing more.
pub(crate) struct ScalarEngine;

impl Engine for ScalarEngine {
    fn name(&self) -> &'static str {
        Isa::Scalar.name()
    }
}

pub(crate) static SCALAR: ScalarEngine = ScalarEngine;

/// The variant for `isa`, if compiled into this build.
fn engine_for(isa: Isa) -> Option<&'static dyn Engine> {
    match isa {
        #[cfg(target_arch = "x86_64")]
        Isa::Avx512 => Some(&crate::simd::avx512::ENGINE),
        #[cfg(target_arch = "x86_64")]
        Isa::Avx2 => Some(&crate::simd::avx2::ENGINE),
        #[cfg(target_arch = "x86_64")]
        Isa::Sse2 => Some(&crate::simd::sse2::ENGINE),
        #[cfg(target_arch = "aarch64")]
        Isa::Neon => Some(&crate::simd::neon::ENGINE),
        Isa::Scalar => Some(&SCALAR),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn select() -> &'static dyn Engine {
    if cfg!(feature = "force-scalar") {
        debug_println!("yutf: selection pinned to scalar by feature flag");
        return &SCALAR;
    }
    for isa in cpu::PRIORITY {
        if isa.available() {
            if let Some(engine) = engine_for(isa) {
                debug_println!("yutf: selected implementation `{}`", engine.name());
                return engine;
            }
        }
    }
    // The walk always terminates at scalar; this line is unreachable.
    &SCALAR
}

static ACTIVE: OnceLock<&'static dyn Engine> = OnceLock::new();

/// The selected variant, resolved once for the process lifetime.
#[inline]
pub(crate) fn active() -> &'static dyn Engine {
    *ACTIVE.get_or_init(select)
}

/// One descriptor per known instruction-set family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    pub compiled: bool,
    pub available: bool,
    /// Position in the capability ranking, 0 = most capable.
    pub priority: usize,
}

/// Descriptors for all known families, most capable first.
pub fn implementations() -> Vec<Descriptor> {
    cpu::PRIORITY
        .iter()
        .enumerate()
        .map(|(priority, &isa)| Descriptor {
            name: isa.name(),
            compiled: isa.compiled(),
            available: isa.available(),
            priority,
        })
        .collect()
}

/// Name of the variant all public entry points route through.
pub fn active_implementation() -> &'static str {
    active().name()
}

/// Every variant usable on this host, for equivalence testing.
#[cfg(test)]
pub(crate) fn usable_engines() -> Vec<&'static dyn Engine> {
    cpu::PRIORITY
        .iter()
        .filter(|isa| isa.available())
        .filter_map(|&isa| engine_for(isa))
        .collect()
}

/* ===================================================================== */
/*                               Tests                                   */
/* ===================================================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn selection_is_stable() {
        let a = active() as *const dyn Engine;
        let b = active() as *const dyn Engine;
        assert_eq!(a as *const (), b as *const ());
    }

    #[test]
    fn selected_variant_is_listed_available() {
        let name = active_implementation();
        let descriptors = implementations();
        let descriptor = descriptors.iter().find(|d| d.name == name).unwrap();
        assert!(descriptor.compiled && descriptor.available);
    }

    #[test]
    fn priority_order_is_respected() {
        if cfg!(feature = "force-scalar") {
            assert_eq!(active_implementation(), "scalar");
            return;
        }
        let first = implementations()
            .into_iter()
            .find(|d| d.available)
            .unwrap();
        assert_eq!(active_implementation(), first.name);
    }

    fn sample_buffers() -> Vec<Vec<u8>> {
        let mut cases: Vec<Vec<u8>> = vec![
            b"".to_vec(),
            b"pure ascii, and enough of it to cross several vector blocks".to_vec(),
            "éèêë très usité, la journée entière répétée".as_bytes().to_vec(),
            "日本語のテキストが続く長い行です。日本語のテキスト".as_bytes().to_vec(),
            "🦀🦀🦀 emoji 🚀 mixed with ascii and 漢字 and é 🦀🦀".as_bytes().to_vec(),
        ];
        // Malformed inputs, error at varying offsets.
        cases.push(vec![0x41, 0xC0, 0x80]);
        cases.push(vec![0xE0, 0x80]);
        cases.push([b"well formed prefix ".as_slice(), &[0xED, 0xA0, 0x80]].concat());
        cases.push([&[b'a'; 40][..], &[0xF4, 0x90, 0x80, 0x80], &[b'b'; 10][..]].concat());
        cases.push([&[b'x'; 13][..], &[0x80], &[b'y'; 20][..]].concat());
        cases
    }

    #[test]
    fn variants_agree_on_utf8_to_utf16() {
        let engines = usable_engines();
        assert!(!engines.is_empty());
        for case in sample_buffers() {
            let reference_valid = SCALAR.validate_utf8(&case);
            let reference_err = SCALAR.validate_utf8_with_errors(&case);
            for engine in &engines {
                assert_eq!(engine.validate_utf8(&case), reference_valid, "{}", engine.name());
                assert_eq!(
                    engine.validate_utf8_with_errors(&case),
                    reference_err,
                    "{}",
                    engine.name()
                );
                let mut a = vec![0u16; case.len() + 1];
                let mut b = vec![0u16; case.len() + 1];
                let ra = SCALAR.convert_utf8_to_utf16le(&case, &mut a);
                let rb = engine.convert_utf8_to_utf16le(&case, &mut b);
                assert_eq!(ra, rb, "{}", engine.name());
                if let Ok(n) = ra {
                    assert_eq!(a[..n], b[..n], "{}", engine.name());
                }
            }
        }
    }

    #[test]
    fn variants_agree_on_counts_and_lengths() {
        let engines = usable_engines();
        for case in sample_buffers() {
            if !SCALAR.validate_utf8(&case) {
                continue;
            }
            for engine in &engines {
                assert_eq!(engine.count_utf8(&case), SCALAR.count_utf8(&case));
                assert_eq!(
                    engine.utf16_length_from_utf8(&case),
                    SCALAR.utf16_length_from_utf8(&case)
                );
                assert_eq!(
                    engine.utf32_length_from_utf8(&case),
                    SCALAR.utf32_length_from_utf8(&case)
                );
            }
        }
    }

    #[test]
    fn variants_agree_on_utf16() {
        let engines = usable_engines();
        let mut cases: Vec<Vec<u16>> = vec![
            "ascii only, long enough for the vector path to engage".encode_utf16().collect(),
            "mixed 漢字 and 🦀 and é across many blocks 漢字 🦀".encode_utf16().collect(),
        ];
        cases.push(vec![0xD800]);
        cases.push([&[0x41u16; 19][..], &[0xDC00], &[0x42; 5][..]].concat());
        cases.push([&[0x41u16; 8][..], &[0xD83D, 0x0041]].concat());
        for case in cases {
            let reference = SCALAR.validate_utf16le_with_errors(&case);
            for engine in &engines {
                assert_eq!(
                    engine.validate_utf16le_with_errors(&case),
                    reference,
                    "{}",
                    engine.name()
                );
                let mut a = vec![0u8; case.len() * 3 + 4];
                let mut b = vec![0u8; case.len() * 3 + 4];
                let ra = SCALAR.convert_utf16le_to_utf8(&case, &mut a);
                let rb = engine.convert_utf16le_to_utf8(&case, &mut b);
                assert_eq!(ra, rb, "{}", engine.name());
                if let Ok(n) = ra {
                    assert_eq!(a[..n], b[..n], "{}", engine.name());
                }
            }
        }
        // A lone high surrogate at end of input, pinned down explicitly.
        for engine in &engines {
            let err = engine.validate_utf16le_with_errors(&[0xD800]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::LoneSurrogate);
            assert_eq!(err.offset(), 0);
        }
    }

    #[test]
    fn variants_agree_on_utf32() {
        let engines = usable_engines();
        let mut cases: Vec<Vec<u32>> = vec![
            (0x20..0x7F).collect(),
            "長い混在テキスト🦀with ascii".chars().map(|c| c as u32).collect(),
        ];
        cases.push([&[0x41u32; 11][..], &[0xD800], &[0x42; 3][..]].concat());
        cases.push(vec![0x110000]);
        for case in cases {
            let reference = SCALAR.validate_utf32_with_errors(&case);
            for engine in &engines {
                assert_eq!(engine.validate_utf32_with_errors(&case), reference, "{}", engine.name());
                let mut a = vec![0u8; case.len() * 4];
                let mut b = vec![0u8; case.len() * 4];
                let ra = SCALAR.convert_utf32_to_utf8(&case, &mut a);
                let rb = engine.convert_utf32_to_utf8(&case, &mut b);
                assert_eq!(ra, rb, "{}", engine.name());
                if let Ok(n) = ra {
                    assert_eq!(a[..n], b[..n], "{}", engine.name());
                }
            }
        }
    }

    #[test]
    fn variants_agree_on_endianness_swap() {
        let engines = usable_engines();
        let src: Vec<u16> = (0..97u16).map(|i| i.wrapping_mul(0x0123).wrapping_add(7)).collect();
        let mut reference = vec![0u16; src.len()];
        SCALAR.change_endianness_utf16(&src, &mut reference);
        for engine in &engines {
            let mut out = vec![0u16; src.len()];
            engine.change_endianness_utf16(&src, &mut out);
            assert_eq!(out, reference, "{}", engine.name());
        }
    }
}
