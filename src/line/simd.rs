//! # Vector Minpos Kernels for u16 Lines
//!
//! ## Design
//!
//! A u16 line of 8 keys fills exactly one 128-bit register, which is what
//! SSE4.1's `PHMINPOSUW` (`_mm_minpos_epu16`) scans in one instruction: it
//! returns the minimum in bits 0..16 and the lowest index holding it in bits
//! 16..19. Wider lines first fold their vectors with `_mm_min_epu16`, take
//! the minimum of the folded vector, then locate its first occurrence with a
//! compare mask:
//!
//! ```text
//! line (32 x u16):  [ v0 ][ v1 ][ v2 ][ v3 ]      4 x __m128i
//!                      \    /      \    /
//!                      min_epu16   min_epu16
//!                           \       /
//!                           min_epu16 ──> minpos_epu16 ──> min
//!
//! cmpeq(v_i, splat(min)) ──> movemask ──> first set bit / 2 ──> pos
//! ```
//!
//! On aarch64 the same shape uses `vminq_u16`, `vminvq_u16` and a narrowed
//! `vceqq_u16` mask.
//!
//! ## Selection
//!
//! Kernels compile only when the target feature is enabled for the build.
//! `minpos_u16` picks one by line width using const arithmetic that the
//! compiler folds away, and falls back to [`scalar::minpos`] otherwise.
//!
//! ## Safety
//!
//! Every load reads exactly one 8-lane chunk of the borrowed line, and the
//! kernels exist only when the instructions they use are part of the build
//! target.

use super::{scalar, Line, MinPos};
#[cfg(any(
    all(target_arch = "x86_64", target_feature = "sse4.1"),
    target_arch = "aarch64"
))]
use crate::config::{MAX_SIMD_LINE, SSE_U16_LANES};

/// Name of the kernel compiled into this build.
pub const fn active_kernel() -> &'static str {
    if cfg!(all(target_arch = "x86_64", target_feature = "sse4.1")) {
        "sse4.1"
    } else if cfg!(target_arch = "aarch64") {
        "neon"
    } else {
        "scalar"
    }
}

/// Minpos over a u16 line using the widest kernel available for `D`.
#[inline]
pub fn minpos_u16<const D: usize>(line: &Line<u16, D>) -> MinPos<u16> {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        if let Ok(line8) = <&[u16; SSE_U16_LANES]>::try_from(line.as_slice()) {
            return sse41::minpos8(line8);
        }
        if D % SSE_U16_LANES == 0 && D <= MAX_SIMD_LINE {
            return sse41::minpos_wide(line);
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if D % SSE_U16_LANES == 0 && D <= MAX_SIMD_LINE {
            return neon::minpos_wide(line);
        }
    }

    scalar::minpos(line)
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
mod sse41 {
    use std::arch::x86_64::*;

    use super::{scalar, MinPos, SSE_U16_LANES};

    #[inline]
    pub fn minpos8(line: &[u16; 8]) -> MinPos<u16> {
        // SAFETY: SSE4.1 is enabled for this build; the unaligned load reads
        // the 16 bytes of `line` and nothing else.
        let bits = unsafe {
            let v = _mm_loadu_si128(line.as_ptr() as *const __m128i);
            _mm_cvtsi128_si32(_mm_minpos_epu16(v)) as u32
        };
        MinPos {
            min: bits as u16,
            pos: ((bits >> 16) & 0x7) as usize,
        }
    }

    /// `D` must be a non-zero multiple of 8.
    #[inline]
    pub fn minpos_wide<const D: usize>(line: &[u16; D]) -> MinPos<u16> {
        debug_assert!(D >= SSE_U16_LANES && D % SSE_U16_LANES == 0);

        // SAFETY: SSE4.1 is enabled for this build; each load reads one
        // exact 8-lane chunk of `line`.
        unsafe {
            let mut acc = _mm_set1_epi16(-1);
            for chunk in line.chunks_exact(SSE_U16_LANES) {
                let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
                acc = _mm_min_epu16(acc, v);
            }
            let min = _mm_cvtsi128_si32(_mm_minpos_epu16(acc)) as u16;

            let target = _mm_set1_epi16(min as i16);
            for (i, chunk) in line.chunks_exact(SSE_U16_LANES).enumerate() {
                let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
                // Two mask bits per u16 lane.
                let mask = _mm_movemask_epi8(_mm_cmpeq_epi16(v, target)) as u32;
                if mask != 0 {
                    return MinPos {
                        min,
                        pos: i * SSE_U16_LANES + (mask.trailing_zeros() / 2) as usize,
                    };
                }
            }
        }

        scalar::minpos(line)
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use std::arch::aarch64::*;

    use super::{scalar, MinPos, SSE_U16_LANES};

    /// `D` must be a non-zero multiple of 8.
    #[inline]
    pub fn minpos_wide<const D: usize>(line: &[u16; D]) -> MinPos<u16> {
        debug_assert!(D >= SSE_U16_LANES && D % SSE_U16_LANES == 0);

        // SAFETY: NEON is part of every aarch64 target; each load reads one
        // exact 8-lane chunk of `line`.
        unsafe {
            let mut acc = vdupq_n_u16(u16::MAX);
            for chunk in line.chunks_exact(SSE_U16_LANES) {
                acc = vminq_u16(acc, vld1q_u16(chunk.as_ptr()));
            }
            let min = vminvq_u16(acc);

            let target = vdupq_n_u16(min);
            for (i, chunk) in line.chunks_exact(SSE_U16_LANES).enumerate() {
                let eq = vceqq_u16(vld1q_u16(chunk.as_ptr()), target);
                // One mask byte per u16 lane.
                let mask = vget_lane_u64::<0>(vreinterpret_u64_u8(vmovn_u16(eq)));
                if mask != 0 {
                    return MinPos {
                        min,
                        pos: i * SSE_U16_LANES + (mask.trailing_zeros() / 8) as usize,
                    };
                }
            }
        }

        scalar::minpos(line)
    }
}
