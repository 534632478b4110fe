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

//! The [`Value`] tagged union and its raw byte load/store.

use super::ValueType;
use crate::math::F16;

/// A typed scalar or packed value.
///
/// The payload is only ever interpreted through the variant, so two values
/// with equal bits but different types are different values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Signed 8-bit integer.
    S8(i8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Signed 16-bit integer.
    S16(i16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 32-bit integer.
    S32(i32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Signed 64-bit integer.
    S64(i64),
    /// 128-bit opaque bit pattern.
    U128(u128),
    /// Half-precision float.
    F16(F16),
    /// Single-precision float.
    F32(f32),
    /// Double-precision float.
    F64(f64),
    /// Four packed unsigned bytes.
    U8x4([u8; 4]),
    /// Eight packed unsigned bytes.
    U8x8([u8; 8]),
    /// Four packed signed bytes.
    S8x4([i8; 4]),
    /// Eight packed signed bytes.
    S8x8([i8; 8]),
    /// Two packed unsigned 16-bit integers.
    U16x2([u16; 2]),
    /// Four packed unsigned 16-bit integers.
    U16x4([u16; 4]),
    /// Two packed signed 16-bit integers.
    S16x2([i16; 2]),
    /// Four packed signed 16-bit integers.
    S16x4([i16; 4]),
    /// Two packed unsigned 32-bit integers.
    U32x2([u32; 2]),
    /// Two packed signed 32-bit integers.
    S32x2([i32; 2]),
    /// Two packed halves.
    F16x2([F16; 2]),
    /// Four packed halves.
    F16x4([F16; 4]),
    /// Two packed singles.
    F32x2([f32; 2]),
    /// A 32-bit address.
    Ptr32(u32),
    /// A 64-bit address.
    Ptr64(u64),
}

/// Copies `N` bytes starting at `at` into an array.
#[inline]
fn le<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

/// Writes every lane of a packed array back to back.
#[inline]
fn put_lanes<T: Copy, const N: usize, const W: usize>(
    out: &mut [u8],
    lanes: &[T; N],
    to_le: impl Fn(T) -> [u8; W],
) {
    for (i, lane) in lanes.iter().enumerate() {
        out[i * W..(i + 1) * W].copy_from_slice(&to_le(*lane));
    }
}

impl Value {
    /// The type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::U8(_) => ValueType::U8,
            Value::S8(_) => ValueType::S8,
            Value::U16(_) => ValueType::U16,
            Value::S16(_) => ValueType::S16,
            Value::U32(_) => ValueType::U32,
            Value::S32(_) => ValueType::S32,
            Value::U64(_) => ValueType::U64,
            Value::S64(_) => ValueType::S64,
            Value::U128(_) => ValueType::U128,
            Value::F16(_) => ValueType::F16,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::U8x4(_) => ValueType::U8x4,
            Value::U8x8(_) => ValueType::U8x8,
            Value::S8x4(_) => ValueType::S8x4,
            Value::S8x8(_) => ValueType::S8x8,
            Value::U16x2(_) => ValueType::U16x2,
            Value::U16x4(_) => ValueType::U16x4,
            Value::S16x2(_) => ValueType::S16x2,
            Value::S16x4(_) => ValueType::S16x4,
            Value::U32x2(_) => ValueType::U32x2,
            Value::S32x2(_) => ValueType::S32x2,
            Value::F16x2(_) => ValueType::F16x2,
            Value::F16x4(_) => ValueType::F16x4,
            Value::F32x2(_) => ValueType::F32x2,
            Value::Ptr32(_) => ValueType::Ptr32,
            Value::Ptr64(_) => ValueType::Ptr64,
        }
    }

    /// The exact width in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.value_type().size()
    }

    /// Reinterprets the first `ty.size()` bytes of `bytes` as a value of type `ty`.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than `ty.size()`.
    pub fn read_from(bytes: &[u8], ty: ValueType) -> Value {
        assert!(
            bytes.len() >= ty.size(),
            "{} bytes are too few for a {ty} value",
            bytes.len()
        );
        let b = bytes;
        match ty {
            ValueType::U8 => Value::U8(b[0]),
            ValueType::S8 => Value::S8(b[0] as i8),
            ValueType::U16 => Value::U16(u16::from_le_bytes(le(b, 0))),
            ValueType::S16 => Value::S16(i16::from_le_bytes(le(b, 0))),
            ValueType::U32 => Value::U32(u32::from_le_bytes(le(b, 0))),
            ValueType::S32 => Value::S32(i32::from_le_bytes(le(b, 0))),
            ValueType::U64 => Value::U64(u64::from_le_bytes(le(b, 0))),
            ValueType::S64 => Value::S64(i64::from_le_bytes(le(b, 0))),
            ValueType::U128 => Value::U128(u128::from_le_bytes(le(b, 0))),
            ValueType::F16 => Value::F16(F16::from_bits(u16::from_le_bytes(le(b, 0)))),
            ValueType::F32 => Value::F32(f32::from_bits(u32::from_le_bytes(le(b, 0)))),
            ValueType::F64 => Value::F64(f64::from_bits(u64::from_le_bytes(le(b, 0)))),
            ValueType::U8x4 => Value::U8x4(le(b, 0)),
            ValueType::U8x8 => Value::U8x8(le(b, 0)),
            ValueType::S8x4 => Value::S8x4(std::array::from_fn(|i| b[i] as i8)),
            ValueType::S8x8 => Value::S8x8(std::array::from_fn(|i| b[i] as i8)),
            ValueType::U16x2 => Value::U16x2(std::array::from_fn(|i| {
                u16::from_le_bytes(le(b, i * 2))
            })),
            ValueType::U16x4 => Value::U16x4(std::array::from_fn(|i| {
                u16::from_le_bytes(le(b, i * 2))
            })),
            ValueType::S16x2 => Value::S16x2(std::array::from_fn(|i| {
                i16::from_le_bytes(le(b, i * 2))
            })),
            ValueType::S16x4 => Value::S16x4(std::array::from_fn(|i| {
                i16::from_le_bytes(le(b, i * 2))
            })),
            ValueType::U32x2 => Value::U32x2(std::array::from_fn(|i| {
                u32::from_le_bytes(le(b, i * 4))
            })),
            ValueType::S32x2 => Value::S32x2(std::array::from_fn(|i| {
                i32::from_le_bytes(le(b, i * 4))
            })),
            ValueType::F16x2 => Value::F16x2(std::array::from_fn(|i| {
                F16::from_bits(u16::from_le_bytes(le(b, i * 2)))
            })),
            ValueType::F16x4 => Value::F16x4(std::array::from_fn(|i| {
                F16::from_bits(u16::from_le_bytes(le(b, i * 2)))
            })),
            ValueType::F32x2 => Value::F32x2(std::array::from_fn(|i| {
                f32::from_bits(u32::from_le_bytes(le(b, i * 4)))
            })),
            ValueType::Ptr32 => Value::Ptr32(u32::from_le_bytes(le(b, 0))),
            ValueType::Ptr64 => Value::Ptr64(u64::from_le_bytes(le(b, 0))),
        }
    }

    /// Stores the raw little-endian bytes of this value into the front of `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than [`Value::size`].
    pub fn write_to(&self, out: &mut [u8]) {
        let size = self.size();
        assert!(
            out.len() >= size,
            "{} bytes are too few for a {} value",
            out.len(),
            self.value_type()
        );
        let out = &mut out[..size];
        match *self {
            Value::U8(v) => out[0] = v,
            Value::S8(v) => out[0] = v as u8,
            Value::U16(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::S16(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U32(v) | Value::Ptr32(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::S32(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U64(v) | Value::Ptr64(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::S64(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::U128(v) => out.copy_from_slice(&v.to_le_bytes()),
            Value::F16(v) => out.copy_from_slice(&v.to_bits().to_le_bytes()),
            Value::F32(v) => out.copy_from_slice(&v.to_bits().to_le_bytes()),
            Value::F64(v) => out.copy_from_slice(&v.to_bits().to_le_bytes()),
            Value::U8x4(v) => out.copy_from_slice(&v),
            Value::U8x8(v) => out.copy_from_slice(&v),
            Value::S8x4(v) => put_lanes(out, &v, |l: i8| l.to_le_bytes()),
            Value::S8x8(v) => put_lanes(out, &v, |l: i8| l.to_le_bytes()),
            Value::U16x2(v) => put_lanes(out, &v, u16::to_le_bytes),
            Value::U16x4(v) => put_lanes(out, &v, u16::to_le_bytes),
            Value::S16x2(v) => put_lanes(out, &v, i16::to_le_bytes),
            Value::S16x4(v) => put_lanes(out, &v, i16::to_le_bytes),
            Value::U32x2(v) => put_lanes(out, &v, u32::to_le_bytes),
            Value::S32x2(v) => put_lanes(out, &v, i32::to_le_bytes),
            Value::F16x2(v) => put_lanes(out, &v, |l: F16| l.to_bits().to_le_bytes()),
            Value::F16x4(v) => put_lanes(out, &v, |l: F16| l.to_bits().to_le_bytes()),
            Value::F32x2(v) => put_lanes(out, &v, |l: f32| l.to_bits().to_le_bytes()),
        }
    }

    /// The raw bit pattern, zero-extended to 128 bits.
    pub fn bits(&self) -> u128 {
        let mut buf = [0u8; 16];
        self.write_to(&mut buf);
        u128::from_le_bytes(buf)
    }

    /// Builds a value of type `ty` from the low `ty.bits()` bits of `bits`.
    pub fn from_bits(ty: ValueType, bits: u128) -> Value {
        Value::read_from(&bits.to_le_bytes(), ty)
    }

    /// Returns lane `index` as a scalar value. A scalar is its own lane 0.
    ///
    /// # Panics
    /// Panics if `index` is not below the lane count.
    pub fn lane(&self, index: usize) -> Value {
        let ty = self.value_type();
        assert!(
            index < ty.lane_count(),
            "lane {index} out of range for a {ty} value"
        );
        let lane_ty = ty.lane_type();
        let lane_bits = lane_ty.bits();
        Value::from_bits(lane_ty, self.bits() >> (index as u32 * lane_bits))
    }

    /// Iterates over the lanes in index order.
    pub fn lanes(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.value_type().lane_count()).map(move |i| self.lane(i))
    }

    /// Assembles a value of type `ty` from its lanes.
    ///
    /// # Panics
    /// Panics if the number or type of `lanes` does not match `ty`.
    pub fn from_lanes(ty: ValueType, lanes: &[Value]) -> Value {
        assert_eq!(
            lanes.len(),
            ty.lane_count(),
            "{ty} has {} lanes",
            ty.lane_count()
        );
        let lane_bits = ty.lane_type().bits();
        let bits = lanes.iter().enumerate().fold(0u128, |acc, (i, lane)| {
            assert_eq!(lane.value_type(), ty.lane_type(), "lane {i} of a {ty} value");
            acc | (lane.bits() << (i as u32 * lane_bits))
        });
        Value::from_bits(ty, bits)
    }

    /// The value as an `f64`, for scalar numeric kinds.
    ///
    /// Floats widen exactly; 64- and 128-bit integers may round. Packed
    /// values and pointers return `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match *self {
            Value::U8(v) => Some(f64::from(v)),
            Value::S8(v) => Some(f64::from(v)),
            Value::U16(v) => Some(f64::from(v)),
            Value::S16(v) => Some(f64::from(v)),
            Value::U32(v) => Some(f64::from(v)),
            Value::S32(v) => Some(f64::from(v)),
            Value::U64(v) => Some(v as f64),
            Value::S64(v) => Some(v as f64),
            Value::U128(v) => Some(v as f64),
            Value::F16(v) => Some(v.to_f64()),
            Value::F32(v) => Some(f64::from(v)),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    u8 => U8,
    i8 => S8,
    u16 => U16,
    i16 => S16,
    u32 => U32,
    i32 => S32,
    u64 => U64,
    i64 => S64,
    u128 => U128,
    F16 => F16,
    f32 => F32,
    f64 => F64,
    [f32; 2] => F32x2,
    [F16; 2] => F16x2,
    [F16; 4] => F16x4,
}
