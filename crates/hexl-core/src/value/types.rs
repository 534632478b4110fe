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

//! The tag of a [`Value`](super::Value).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of value the oracle can load, store, print and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 8-bit integer.
    S8,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 16-bit integer.
    S16,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 32-bit integer.
    S32,
    /// Unsigned 64-bit integer.
    U64,
    /// Signed 64-bit integer.
    S64,
    /// 128-bit opaque bit pattern.
    U128,
    /// Half-precision float.
    F16,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
    /// Four packed unsigned bytes.
    U8x4,
    /// Eight packed unsigned bytes.
    U8x8,
    /// Four packed signed bytes.
    S8x4,
    /// Eight packed signed bytes.
    S8x8,
    /// Two packed unsigned 16-bit integers.
    U16x2,
    /// Four packed unsigned 16-bit integers.
    U16x4,
    /// Two packed signed 16-bit integers.
    S16x2,
    /// Four packed signed 16-bit integers.
    S16x4,
    /// Two packed unsigned 32-bit integers.
    U32x2,
    /// Two packed signed 32-bit integers.
    S32x2,
    /// Two packed halves.
    F16x2,
    /// Four packed halves.
    F16x4,
    /// Two packed singles.
    F32x2,
    /// A 32-bit (small machine model) address.
    Ptr32,
    /// A 64-bit (large machine model) address.
    Ptr64,
}

impl ValueType {
    /// Every value type, in declaration order.
    pub const ALL: [ValueType; 27] = [
        Self::U8,
        Self::S8,
        Self::U16,
        Self::S16,
        Self::U32,
        Self::S32,
        Self::U64,
        Self::S64,
        Self::U128,
        Self::F16,
        Self::F32,
        Self::F64,
        Self::U8x4,
        Self::U8x8,
        Self::S8x4,
        Self::S8x8,
        Self::U16x2,
        Self::U16x4,
        Self::S16x2,
        Self::S16x4,
        Self::U32x2,
        Self::S32x2,
        Self::F16x2,
        Self::F16x4,
        Self::F32x2,
        Self::Ptr32,
        Self::Ptr64,
    ];

    /// The type of a single lane. Scalars are their own lane type.
    pub const fn lane_type(self) -> ValueType {
        match self {
            Self::U8x4 | Self::U8x8 => Self::U8,
            Self::S8x4 | Self::S8x8 => Self::S8,
            Self::U16x2 | Self::U16x4 => Self::U16,
            Self::S16x2 | Self::S16x4 => Self::S16,
            Self::U32x2 => Self::U32,
            Self::S32x2 => Self::S32,
            Self::F16x2 | Self::F16x4 => Self::F16,
            Self::F32x2 => Self::F32,
            scalar => scalar,
        }
    }

    /// The unsigned type of the same shape. Unsigned and non-integer types
    /// map to themselves.
    pub const fn to_unsigned(self) -> ValueType {
        match self {
            Self::S8 => Self::U8,
            Self::S16 => Self::U16,
            Self::S32 => Self::U32,
            Self::S64 => Self::U64,
            Self::S8x4 => Self::U8x4,
            Self::S8x8 => Self::U8x8,
            Self::S16x2 => Self::U16x2,
            Self::S16x4 => Self::U16x4,
            Self::S32x2 => Self::U32x2,
            other => other,
        }
    }

    /// The number of lanes. Scalars have one.
    pub const fn lane_count(self) -> usize {
        match self {
            Self::U8x8 | Self::S8x8 => 8,
            Self::U8x4 | Self::S8x4 | Self::U16x4 | Self::S16x4 | Self::F16x4 => 4,
            Self::U16x2 | Self::S16x2 | Self::U32x2 | Self::S32x2 | Self::F16x2 | Self::F32x2 => 2,
            _ => 1,
        }
    }

    /// The exact width in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::U8 | Self::S8 => 1,
            Self::U16 | Self::S16 | Self::F16 => 2,
            Self::U32 | Self::S32 | Self::F32 | Self::Ptr32 => 4,
            Self::U64 | Self::S64 | Self::F64 | Self::Ptr64 => 8,
            Self::U128 => 16,
            packed => packed.lane_type().size() * packed.lane_count(),
        }
    }

    /// The width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.size() as u32 * 8
    }

    /// Whether the type holds more than one lane.
    #[inline]
    pub const fn is_packed(self) -> bool {
        self.lane_count() > 1
    }

    /// Whether the lanes are floating point.
    pub const fn is_float(self) -> bool {
        matches!(self.lane_type(), Self::F16 | Self::F32 | Self::F64)
    }

    /// Whether the lanes are signed integers.
    pub const fn is_signed(self) -> bool {
        matches!(self.lane_type(), Self::S8 | Self::S16 | Self::S32 | Self::S64)
    }

    /// The lower-case name used in diagnostics (`"u32"`, `"f16x2"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::S8 => "s8",
            Self::U16 => "u16",
            Self::S16 => "s16",
            Self::U32 => "u32",
            Self::S32 => "s32",
            Self::U64 => "u64",
            Self::S64 => "s64",
            Self::U128 => "u128",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::U8x4 => "u8x4",
            Self::U8x8 => "u8x8",
            Self::S8x4 => "s8x4",
            Self::S8x8 => "s8x8",
            Self::U16x2 => "u16x2",
            Self::U16x4 => "u16x4",
            Self::S16x2 => "s16x2",
            Self::S16x4 => "s16x4",
            Self::U32x2 => "u32x2",
            Self::S32x2 => "s32x2",
            Self::F16x2 => "f16x2",
            Self::F16x4 => "f16x4",
            Self::F32x2 => "f32x2",
            Self::Ptr32 => "ptr32",
            Self::Ptr64 => "ptr64",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(ValueType::U8.size(), 1);
        assert_eq!(ValueType::F16.size(), 2);
        assert_eq!(ValueType::Ptr32.size(), 4);
        assert_eq!(ValueType::Ptr64.size(), 8);
        assert_eq!(ValueType::U128.size(), 16);
        assert_eq!(ValueType::U8x8.size(), 8);
        assert_eq!(ValueType::S16x2.size(), 4);
        assert_eq!(ValueType::F16x4.size(), 8);
        assert_eq!(ValueType::F32x2.size(), 8);
    }

    #[test]
    fn test_packed_sizes_are_lane_products() {
        for ty in ValueType::ALL {
            assert_eq!(ty.size(), ty.lane_type().size() * ty.lane_count(), "{ty}");
            assert!(ty.size() <= 16);
        }
    }

    #[test]
    fn test_classification() {
        assert!(ValueType::F16x2.is_float());
        assert!(ValueType::F16x2.is_packed());
        assert!(!ValueType::U32.is_packed());
        assert!(ValueType::S8x4.is_signed());
        assert!(!ValueType::Ptr64.is_signed());
        assert_eq!(ValueType::S32x2.lane_type(), ValueType::S32);
        assert_eq!(ValueType::S16x4.to_unsigned(), ValueType::U16x4);
        assert_eq!(ValueType::F32.to_unsigned(), ValueType::F32);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = ValueType::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ValueType::ALL.len());
    }
}
