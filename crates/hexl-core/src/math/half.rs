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

//! IEEE-754 binary16 storage type.

use serde::{Deserialize, Serialize};
use std::fmt;

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x7c00;
const MANT_MASK: u16 = 0x03ff;

/// A half-precision float, stored as its raw bits.
///
/// Arithmetic is done by widening to `f32` (exact) and narrowing back with
/// round-to-nearest-even.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct F16(u16);

impl F16 {
    /// Positive zero.
    pub const ZERO: Self = Self(0);
    /// One.
    pub const ONE: Self = Self(0x3c00);
    /// Positive infinity.
    pub const INFINITY: Self = Self(EXP_MASK);
    /// Negative infinity.
    pub const NEG_INFINITY: Self = Self(SIGN_MASK | EXP_MASK);
    /// The default quiet NaN.
    pub const NAN: Self = Self(0x7e00);
    /// The largest finite value (65504).
    pub const MAX: Self = Self(0x7bff);
    /// The smallest positive subnormal value (2^-24).
    pub const MIN_POSITIVE_SUBNORMAL: Self = Self(0x0001);

    /// Reinterprets raw bits as a half.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Narrows an `f32` with round-to-nearest-even.
    ///
    /// Overflow produces an infinity, NaN stays NaN (payload truncated, quiet
    /// bit kept) and values below half the smallest subnormal flush to zero.
    pub fn from_f32(value: f32) -> Self {
        let x = value.to_bits();
        let sign = ((x >> 16) as u16) & SIGN_MASK;
        let exp = ((x >> 23) & 0xff) as i32;
        let man = x & 0x007f_ffff;

        if exp == 0xff {
            if man == 0 {
                return Self(sign | EXP_MASK);
            }
            let payload = (man >> 13) as u16;
            // A payload living only in the low bits must still read as NaN.
            return Self(sign | EXP_MASK | if payload == 0 { 1 } else { payload });
        }

        let half_exp = exp - 127 + 15;
        if half_exp >= 0x1f {
            return Self(sign | EXP_MASK);
        }

        if half_exp <= 0 {
            let shift = (14 - half_exp) as u32;
            if shift > 24 {
                return Self(sign);
            }
            let m = man | 0x0080_0000;
            let quotient = m >> shift;
            let remainder = m & ((1 << shift) - 1);
            let halfway = 1 << (shift - 1);
            let round_up =
                remainder > halfway || (remainder == halfway && (quotient & 1) == 1);
            return Self(sign | (quotient + u32::from(round_up)) as u16);
        }

        let bits = sign | ((half_exp as u16) << 10) | (man >> 13) as u16;
        let remainder = man & 0x1fff;
        let round_up = remainder > 0x1000 || (remainder == 0x1000 && (bits & 1) == 1);
        // A carry out of the mantissa correctly bumps the exponent, up to infinity.
        Self(bits + u16::from(round_up))
    }

    /// Widens to `f32`. Exact for every half value.
    pub fn to_f32(self) -> f32 {
        let sign = u32::from(self.0 & SIGN_MASK) << 16;
        let exp = u32::from((self.0 & EXP_MASK) >> 10);
        let man = u32::from(self.0 & MANT_MASK);
        match exp {
            0 if man == 0 => f32::from_bits(sign),
            0 => {
                let magnitude = man as f32 * (1.0 / 16_777_216.0);
                if sign != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
            0x1f => f32::from_bits(sign | 0x7f80_0000 | (man << 13)),
            _ => f32::from_bits(sign | ((exp + 112) << 23) | (man << 13)),
        }
    }

    /// Widens to `f64`. Exact for every half value.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }
}

impl From<F16> for f32 {
    fn from(h: F16) -> Self {
        h.to_f32()
    }
}

impl fmt::Debug for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F16({} / {:#06x})", self.to_f32(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_values() {
        assert_eq!(F16::from_f32(1.0), F16::ONE);
        assert_eq!(F16::from_f32(-2.0).to_bits(), 0xc000);
        assert_eq!(F16::from_f32(65504.0), F16::MAX);
        assert_eq!(F16::from_f32(0.5).to_f32(), 0.5);
        assert_eq!(F16::from_f32(-0.0).to_bits(), 0x8000);
    }

    #[test]
    fn test_overflow_and_specials() {
        assert_eq!(F16::from_f32(65520.0), F16::INFINITY);
        assert_eq!(F16::from_f32(f32::NEG_INFINITY), F16::NEG_INFINITY);
        assert!(F16::from_f32(f32::NAN).to_f32().is_nan());
        assert!(F16::from_f32(f32::from_bits(0x7f80_0001)).to_f32().is_nan());
        assert!(F16::NAN.to_f32().is_nan());
        assert_eq!(F16::INFINITY.to_f32(), f32::INFINITY);
    }

    #[test]
    fn test_subnormals() {
        let tiny = 2f32.powi(-24);
        assert_eq!(F16::from_f32(tiny), F16::MIN_POSITIVE_SUBNORMAL);
        assert_eq!(F16::MIN_POSITIVE_SUBNORMAL.to_f32(), tiny);
        // Exactly half the smallest subnormal ties to even (zero).
        assert_eq!(F16::from_f32(tiny / 2.0).to_bits(), 0);
        // Slightly more than half rounds up.
        assert_eq!(F16::from_f32(tiny * 0.75).to_bits(), 1);
        assert_eq!(F16::from_f32(tiny / 8.0).to_bits(), 0);
        assert_eq!(F16::from_bits(0x03ff).to_f32(), 1023.0 * tiny);
    }

    #[test]
    fn test_round_to_nearest_even() {
        // 1 + 2^-11 is exactly between 1.0 and the next half; ties to even (1.0).
        assert_eq!(F16::from_f32(1.0 + 2f32.powi(-11)), F16::ONE);
        // 1 + 3 * 2^-11 ties up to the even neighbour 1 + 2^-9.
        assert_eq!(F16::from_f32(1.0 + 3.0 * 2f32.powi(-11)).to_bits(), 0x3c02);
    }

    #[test]
    fn test_every_half_survives_widening() {
        for bits in 0..=u16::MAX {
            let h = F16::from_bits(bits);
            let back = F16::from_f32(h.to_f32());
            if h.to_f32().is_nan() {
                assert!(back.to_f32().is_nan());
            } else {
                assert_eq!(back, h, "bits {bits:#06x}");
            }
        }
    }
}
