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

//! Deterministic text rendering of values.
//!
//! Integers print in signed decimal, pointers in hex, and every float width
//! goes through [`write_float`]. The alternate flag (`{:#}`) appends the raw
//! hex bits of floats, which is what a reader needs to tell two values apart
//! when their decimal forms coincide.

use super::Value;
use crate::math::{IeeeFloat, F16};
use std::fmt;

/// Significant decimal digits printed for a half.
pub const F16_PRINT_DIGITS: usize = 5;
/// Significant decimal digits printed for a single.
pub const F32_PRINT_DIGITS: usize = 9;
/// Significant decimal digits printed for a double.
pub const F64_PRINT_DIGITS: usize = 17;

/// Writes a float of any width with `digits` significant digits.
///
/// NaNs print as `[+-]QNAN(payload)` or `[+-]SNAN(payload)`, infinities as
/// `+INF` / `-INF`.
pub fn write_float<T: IeeeFloat>(
    f: &mut fmt::Formatter<'_>,
    value: T,
    digits: usize,
) -> fmt::Result {
    let sign = if value.sign_bit() { '-' } else { '+' };
    if value.is_nan() {
        let kind = if value.is_quiet_nan() { "QNAN" } else { "SNAN" };
        write!(f, "{sign}{kind}({:#x})", value.nan_payload())?;
    } else if value.is_inf() {
        write!(f, "{sign}INF")?;
    } else {
        write!(f, "{:.*e}", digits.saturating_sub(1), value.to_f64())?;
    }
    if f.alternate() {
        let width = (T::BITS / 4) as usize;
        write!(f, " [0x{:0width$x}]", value.raw_bits())?;
    }
    Ok(())
}

fn write_f16(f: &mut fmt::Formatter<'_>, v: F16) -> fmt::Result {
    write_float(f, v, F16_PRINT_DIGITS)
}

fn write_f32(f: &mut fmt::Formatter<'_>, v: f32) -> fmt::Result {
    write_float(f, v, F32_PRINT_DIGITS)
}

fn write_tuple<T: Copy>(
    f: &mut fmt::Formatter<'_>,
    lanes: &[T],
    mut write_lane: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, lane) in lanes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_lane(f, *lane)?;
    }
    f.write_str(")")
}

fn write_int<T: fmt::Display>(f: &mut fmt::Formatter<'_>, v: T) -> fmt::Result {
    write!(f, "{v}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::U8(v) => write_int(f, v),
            Value::S8(v) => write_int(f, v),
            Value::U16(v) => write_int(f, v),
            Value::S16(v) => write_int(f, v),
            Value::U32(v) => write_int(f, v),
            Value::S32(v) => write_int(f, v),
            Value::U64(v) => write_int(f, v),
            Value::S64(v) => write_int(f, v),
            Value::U128(v) => write_int(f, v),
            Value::F16(v) => write_f16(f, v),
            Value::F32(v) => write_f32(f, v),
            Value::F64(v) => write_float(f, v, F64_PRINT_DIGITS),
            Value::U8x4(v) => write_tuple(f, &v, write_int),
            Value::U8x8(v) => write_tuple(f, &v, write_int),
            Value::S8x4(v) => write_tuple(f, &v, write_int),
            Value::S8x8(v) => write_tuple(f, &v, write_int),
            Value::U16x2(v) => write_tuple(f, &v, write_int),
            Value::U16x4(v) => write_tuple(f, &v, write_int),
            Value::S16x2(v) => write_tuple(f, &v, write_int),
            Value::S16x4(v) => write_tuple(f, &v, write_int),
            Value::U32x2(v) => write_tuple(f, &v, write_int),
            Value::S32x2(v) => write_tuple(f, &v, write_int),
            Value::F16x2(v) => write_tuple(f, &v, write_f16),
            Value::F16x4(v) => write_tuple(f, &v, write_f16),
            Value::F32x2(v) => write_tuple(f, &v, write_f32),
            Value::Ptr32(v) => write!(f, "0x{v:08x}"),
            Value::Ptr64(v) => write!(f, "0x{v:016x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(Value::S32(-42).to_string(), "-42");
        assert_eq!(Value::U64(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Value::S8x4([1, -2, 3, -4]).to_string(), "(1, -2, 3, -4)");
        assert_eq!(Value::Ptr32(0xbeef).to_string(), "0x0000beef");
    }

    #[test]
    fn test_floats() {
        assert_eq!(Value::F32(1.0).to_string(), "1.00000000e0");
        assert_eq!(Value::F32(-0.5).to_string(), "-5.00000000e-1");
        assert_eq!(Value::F16(F16::ONE).to_string(), "1.0000e0");
        assert_eq!(Value::F64(2.0).to_string(), "2.0000000000000000e0");
        assert_eq!(format!("{:#}", Value::F32(1.0)), "1.00000000e0 [0x3f800000]");
        assert_eq!(format!("{:#}", Value::F16(F16::ONE)), "1.0000e0 [0x3c00]");
    }

    #[test]
    fn test_specials() {
        assert_eq!(Value::F32(f32::INFINITY).to_string(), "+INF");
        assert_eq!(Value::F64(f64::NEG_INFINITY).to_string(), "-INF");
        assert_eq!(Value::F32(f32::from_bits(0x7fc0_0000)).to_string(), "+QNAN(0x0)");
        assert_eq!(Value::F32(f32::from_bits(0xff80_0003)).to_string(), "-SNAN(0x3)");
        assert_eq!(
            format!("{:#}", Value::F16(F16::NAN)),
            "+QNAN(0x0) [0x7e00]"
        );
    }

    #[test]
    fn test_packed_floats() {
        assert_eq!(
            Value::F32x2([1.0, f32::NEG_INFINITY]).to_string(),
            "(1.00000000e0, -INF)"
        );
        assert_eq!(
            format!("{:#}", Value::F32x2([1.0, 2.0])),
            "(1.00000000e0 [0x3f800000], 2.00000000e0 [0x40000000])"
        );
    }
}
