//! Parallel bulk operations for large buffers.
//!
//! Work splits into per-thread ranges the same way the rest of the crate
//! splits batches: every boundary is snapped forward to the next byte
//! that can start a code point, so no sequence straddles two workers and
//! chunk-local results compose into exactly the sequential answer.
//! Below [`PAR_THRESHOLD`] the sequential call wins outright and is used
//! as is.

use rayon::prelude::*;

use crate::dispatch;
use crate::error::ConversionResult;
use crate::scalar::utf8;

/// Buffers smaller than this are not worth fanning out.
pub const PAR_THRESHOLD: usize = 1 << 20;

/// Even split into `jobs` ranges, remainder to the first ranges, then
/// each start snapped off continuation bytes.
fn utf8_ranges(src: &[u8], jobs: usize) -> Vec<(usize, usize)> {
    let base = src.len() / jobs;
    let rem = src.len() % jobs;
    let mut bounds: Vec<usize> = (0..=jobs)
        .map(|i| i * base + i.min(rem))
        .collect();
    for b in bounds[1..jobs].iter_mut() {
        while *b < src.len() && src[*b] & 0xC0 == 0x80 {
            *b += 1;
        }
    }
    bounds.windows(2).map(|w| (w[0], w[1].max(w[0]))).collect()
}

/// Parallel [`crate::validate_utf8`]; same answer, many cores.
pub fn validate_utf8(src: &[u8]) -> bool {
    if src.len() < PAR_THRESHOLD {
        return crate::validate_utf8(src);
    }
    let engine = dispatch::active();
    utf8_ranges(src, rayon::current_num_threads())
        .into_par_iter()
        .all(|(start, end)| engine.validate_utf8(&src[start..end]))
}

/// Parallel [`crate::validate_utf8_with_errors`]; reports the same
/// first-offset error as the sequential scan.
pub fn validate_utf8_with_errors(src: &[u8]) -> ConversionResult<()> {
    if src.len() < PAR_THRESHOLD {
        return crate::validate_utf8_with_errors(src);
    }
    let engine = dispatch::active();
    let first = utf8_ranges(src, rayon::current_num_threads())
        .into_par_iter()
        .filter_map(|(start, end)| {
            engine
                .validate_utf8_with_errors(&src[start..end])
                .err()
                .map(|e| e.rebase(start))
        })
        .min_by_key(|e| e.offset());
    match first {
        Some(err) => {
            // A malformed region ending exactly at a chunk edge reads as
            // truncated inside the chunk; re-diagnose the winning offset
            // against the full buffer so the kind matches the
            // sequential scan too.
            Err(utf8::decode_sequence(src, err.offset())
                .err()
                .unwrap_or(err))
        }
        None => Ok(()),
    }
}

/// Parallel [`crate::count_utf8`]. Input is assumed well-formed, so the
/// per-chunk counts are position-independent and simply sum.
pub fn count_utf8(src: &[u8]) -> usize {
    if src.len() < PAR_THRESHOLD {
        return crate::count_utf8(src);
    }
    let engine = dispatch::active();
    utf8_ranges(src, rayon::current_num_threads())
        .into_par_iter()
        .map(|(start, end)| engine.count_utf8(&src[start..end]))
        .sum()
}

/* ===================================================================== */
/*                               Tests                                   */
/* ===================================================================== */

#[cfg(test)]
mod tests {
    use super::*;

    fn big_corpus() -> Vec<u8> {
        "ascii filler é中🦀 across the whole buffer 漢字 and more ascii "
            .repeat(40_000)
            .into_bytes()
    }

    #[test]
    fn ranges_never_split_sequences() {
        let corpus = big_corpus();
        for jobs in [1, 2, 3, 7, 16] {
            let ranges = utf8_ranges(&corpus, jobs);
            assert_eq!(ranges.first().unwrap().0, 0);
            assert_eq!(ranges.last().unwrap().1, corpus.len());
            for w in ranges.windows(2) {
                assert_eq!(w[0].1, w[1].0);
            }
            for &(start, _) in &ranges {
                assert!(start == corpus.len() || corpus[start] & 0xC0 != 0x80);
            }
        }
    }

    #[test]
    fn parallel_matches_sequential_on_valid_input() {
        let corpus = big_corpus();
        assert!(corpus.len() >= PAR_THRESHOLD);
        assert!(validate_utf8(&corpus));
        assert!(validate_utf8_with_errors(&corpus).is_ok());
        assert_eq!(count_utf8(&corpus), crate::count_utf8(&corpus));
    }

    #[test]
    fn parallel_reports_first_error_offset() {
        let mut corpus = big_corpus();
        let a = corpus.len() / 3;
        let b = 2 * corpus.len() / 3;
        // Plant two errors; only the earlier one may be reported.
        corpus[b] = 0xFF;
        corpus[a] = 0xFF;
        let sequential = crate::validate_utf8_with_errors(&corpus).unwrap_err();
        let parallel = validate_utf8_with_errors(&corpus).unwrap_err();
        assert_eq!(parallel, sequential);
        assert!(!validate_utf8(&corpus));
    }

    #[test]
    fn small_inputs_take_the_sequential_path() {
        assert!(validate_utf8("tiny 🦀".as_bytes()));
        assert_eq!(count_utf8("tiny 🦀".as_bytes()), 6);
    }
}
