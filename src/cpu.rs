//! Runtime CPU capability detection.
//!
//! Probed once, lazily, and cached for the process lifetime: instruction
//! sets do not change at run time, so there is no re-detection path.

use std::sync::OnceLock;

/// Instruction-set families this crate ships a codec variant for,
/// ordered from most to least capable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Isa {
    /// x86-64 512-bit vectors (AVX-512F + AVX-512BW).
    Avx512,
    /// x86-64 256-bit vectors (AVX2).
    Avx2,
    /// x86-64 128-bit vectors (SSE2, baseline on x86-64).
    Sse2,
    /// AArch64 128-bit vectors (NEON, mandatory on aarch64).
    Neon,
    /// Portable scalar fallback, always available.
    Scalar,
}

impl Isa {
    pub fn name(self) -> &'static str {
        match self {
            Isa::Avx512 => "avx512",
            Isa::Avx2 => "avx2",
            Isa::Sse2 => "sse2",
            Isa::Neon => "neon",
            Isa::Scalar => "scalar",
        }
    }

    /// Whether this family's variant is compiled into the current build.
    pub fn compiled(self) -> bool {
        match self {
            Isa::Avx512 | Isa::Avx2 | Isa::Sse2 => cfg!(target_arch = "x86_64"),
            Isa::Neon => cfg!(target_arch = "aarch64"),
            Isa::Scalar => true,
        }
    }

    /// Whether the host CPU supports this family's required feature set.
    pub fn available(self) -> bool {
        self.compiled() && features().has(self)
    }
}

/// All families, descending capability. The dispatcher walks this list.
pub const PRIORITY: [Isa; 5] = [Isa::Avx512, Isa::Avx2, Isa::Sse2, Isa::Neon, Isa::Scalar];

/// Host feature flags relevant to variant selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFeatures {
    pub sse2: bool,
    pub avx2: bool,
    pub avx512f: bool,
    pub avx512bw: bool,
    pub neon: bool,
}

impl CpuFeatures {
    fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self {
                sse2: true, // baseline on x86-64
                avx2: std::arch::is_x86_feature_detected!("avx2"),
                avx512f: std::arch::is_x86_feature_detected!("avx512f"),
                avx512bw: std::arch::is_x86_feature_detected!("avx512bw"),
                neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                neon: true, // mandatory on aarch64
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    fn has(&self, isa: Isa) -> bool {
        match isa {
            Isa::Avx512 => self.avx512f && self.avx512bw,
            Isa::Avx2 => self.avx2,
            Isa::Sse2 => self.sse2,
            Isa::Neon => self.neon,
            Isa::Scalar => true,
        }
    }
}

static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Host CPU features, probed on first call.
pub fn features() -> &'static CpuFeatures {
    FEATURES.get_or_init(CpuFeatures::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_always_present() {
        assert!(Isa::Scalar.compiled());
        assert!(Isa::Scalar.available());
    }

    #[test]
    fn available_implies_compiled() {
        for isa in PRIORITY {
            if isa.available() {
                assert!(isa.compiled(), "{} available but not compiled", isa.name());
            }
        }
    }

    #[test]
    fn detection_is_idempotent() {
        let a = features() as *const CpuFeatures;
        let b = features() as *const CpuFeatures;
        assert_eq!(a, b);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn sse2_baseline_on_x86_64() {
        assert!(Isa::Sse2.available());
    }
}
