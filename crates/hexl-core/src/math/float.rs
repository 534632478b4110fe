// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bit-level classification of IEEE-754 floats, shared by all three widths.

use super::F16;

/// Bit-level view of an IEEE-754 binary float.
///
/// Implemented for [`F16`], `f32` and `f64` so that the comparison engine and
/// the value formatter can be written once for every width.
pub trait IeeeFloat: Copy {
    /// Total width in bits.
    const BITS: u32;
    /// Number of explicit mantissa bits.
    const MANTISSA_BITS: u32;

    /// The raw bit pattern, zero-extended to 64 bits.
    fn raw_bits(self) -> u64;

    /// Builds a value from a raw bit pattern held in the low bits of `bits`.
    fn from_raw_bits(bits: u64) -> Self;

    /// Exact widening to `f64`.
    fn to_f64(self) -> f64;

    /// The sign bit mask.
    #[inline]
    fn sign_mask() -> u64 {
        1 << (Self::BITS - 1)
    }

    /// The exponent field mask.
    #[inline]
    fn exponent_mask() -> u64 {
        (Self::sign_mask() - 1) & !Self::mantissa_mask()
    }

    /// The mantissa field mask.
    #[inline]
    fn mantissa_mask() -> u64 {
        (1 << Self::MANTISSA_BITS) - 1
    }

    /// Whether the sign bit is set (also for zeros and NaNs).
    #[inline]
    fn sign_bit(self) -> bool {
        self.raw_bits() & Self::sign_mask() != 0
    }

    /// Whether the value is a NaN.
    #[inline]
    fn is_nan(self) -> bool {
        let bits = self.raw_bits();
        bits & Self::exponent_mask() == Self::exponent_mask() && bits & Self::mantissa_mask() != 0
    }

    /// Whether the value is an infinity of either sign.
    #[inline]
    fn is_inf(self) -> bool {
        let bits = self.raw_bits();
        bits & Self::exponent_mask() == Self::exponent_mask() && bits & Self::mantissa_mask() == 0
    }

    /// Whether the value is a nonzero subnormal.
    #[inline]
    fn is_subnormal(self) -> bool {
        let bits = self.raw_bits();
        bits & Self::exponent_mask() == 0 && bits & Self::mantissa_mask() != 0
    }

    /// Whether the value is a zero of either sign.
    #[inline]
    fn is_zero(self) -> bool {
        self.raw_bits() & !Self::sign_mask() == 0
    }

    /// Whether a NaN has its quiet bit (the top mantissa bit) set.
    #[inline]
    fn is_quiet_nan(self) -> bool {
        self.is_nan() && self.raw_bits() & (1 << (Self::MANTISSA_BITS - 1)) != 0
    }

    /// The NaN payload: mantissa bits below the quiet bit.
    #[inline]
    fn nan_payload(self) -> u64 {
        self.raw_bits() & (Self::mantissa_mask() >> 1)
    }

    /// Replaces a subnormal with a zero of the same sign; other values pass through.
    #[inline]
    fn flush_subnormal(self) -> Self {
        if self.is_subnormal() {
            Self::from_raw_bits(self.raw_bits() & Self::sign_mask())
        } else {
            self
        }
    }

    /// Maps the sign-magnitude encoding onto a monotonic integer line.
    ///
    /// Adjacent representable values map to adjacent integers; `-0.0` sits one
    /// step below `+0.0`.
    #[inline]
    fn ordered_key(self) -> i128 {
        let magnitude = i128::from(self.raw_bits() & !Self::sign_mask());
        if self.sign_bit() {
            -magnitude - 1
        } else {
            magnitude
        }
    }
}

impl IeeeFloat for F16 {
    const BITS: u32 = 16;
    const MANTISSA_BITS: u32 = 10;

    #[inline]
    fn raw_bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn from_raw_bits(bits: u64) -> Self {
        F16::from_bits(bits as u16)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        F16::to_f64(self)
    }
}

impl IeeeFloat for f32 {
    const BITS: u32 = 32;
    const MANTISSA_BITS: u32 = 23;

    #[inline]
    fn raw_bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn from_raw_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl IeeeFloat for f64 {
    const BITS: u32 = 64;
    const MANTISSA_BITS: u32 = 52;

    #[inline]
    fn raw_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// The distance between `a` and `b` in units in the last place.
///
/// Symmetric, zero only for identical bit patterns, and one between `-0.0`
/// and `+0.0`. Meaningless for NaN operands.
pub fn abs_diff_ulps<T: IeeeFloat>(a: T, b: T) -> u64 {
    let distance = (a.ordered_key() - b.ordered_key()).unsigned_abs();
    u64::try_from(distance).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(f32::NAN.is_nan());
        assert!(IeeeFloat::is_nan(F16::NAN));
        assert!(IeeeFloat::is_inf(f64::NEG_INFINITY));
        assert!(!IeeeFloat::is_inf(f64::NAN));
        assert!(IeeeFloat::is_subnormal(f32::from_bits(1)));
        assert!(!IeeeFloat::is_subnormal(0.0f32));
        assert!(IeeeFloat::is_subnormal(F16::MIN_POSITIVE_SUBNORMAL));
        assert!(IeeeFloat::sign_bit(-0.0f64));
        assert!(IeeeFloat::is_zero(-0.0f32));
    }

    #[test]
    fn test_quiet_and_payload() {
        let qnan = f32::from_bits(0x7fc0_0005);
        let snan = f32::from_bits(0x7f80_0005);
        assert!(qnan.is_quiet_nan());
        assert!(!snan.is_quiet_nan());
        assert_eq!(qnan.nan_payload(), 5);
        assert_eq!(snan.nan_payload(), 5);
    }

    #[test]
    fn test_flush_keeps_sign() {
        let neg_sub = f64::from_bits(0x8000_0000_0000_0001);
        assert_eq!(neg_sub.flush_subnormal().to_bits(), 0x8000_0000_0000_0000);
        assert_eq!(1.5f64.flush_subnormal(), 1.5);
        assert_eq!(F16::from_bits(0x0200).flush_subnormal(), F16::ZERO);
    }

    #[test]
    fn test_ulps() {
        let one = 1.0f32;
        let next = f32::from_bits(one.to_bits() + 1);
        assert_eq!(abs_diff_ulps(one, one), 0);
        assert_eq!(abs_diff_ulps(one, next), 1);
        assert_eq!(abs_diff_ulps(next, one), 1);
        assert_eq!(abs_diff_ulps(0.0f32, -0.0f32), 1);
        assert_eq!(abs_diff_ulps(-0.0f64, 0.0f64), 1);
        let tiny = f32::from_bits(1);
        assert_eq!(abs_diff_ulps(tiny, -tiny), 3);
        assert_eq!(abs_diff_ulps(F16::ONE, F16::from_bits(0x3c04)), 4);
    }

    #[test]
    fn test_ulps_symmetric_across_widths() {
        let samples = [-3.5f64, -1e-310, -0.0, 0.0, 1e-300, 2.0, 1e300];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(abs_diff_ulps(a, b), abs_diff_ulps(b, a));
                let (a32, b32) = (a as f32, b as f32);
                assert_eq!(abs_diff_ulps(a32, b32), abs_diff_ulps(b32, a32));
            }
        }
    }

    #[test]
    fn test_extreme_distance() {
        assert_eq!(abs_diff_ulps(f64::MAX, f64::MIN), 0xffdf_ffff_ffff_ffff);
    }
}
