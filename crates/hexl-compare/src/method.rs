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

//! Numeric-equivalence methods and their default tolerances.

use hexl_core::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal digits of absolute precision expected from a half result.
pub const F16_DECIMAL_DIGITS: i32 = 3;
/// Decimal digits of absolute precision expected from a single result.
pub const F32_DECIMAL_DIGITS: i32 = 6;
/// Decimal digits of absolute precision expected from a double result.
pub const F64_DECIMAL_DIGITS: i32 = 12;
/// Default tolerance of the ULPS method, for every width.
pub const DEFAULT_ULPS: f64 = 1.0;
/// Default tolerance of the RELATIVE method, for every width.
pub const DEFAULT_RELATIVE: f64 = 0.01;

/// How a floating-point result is judged against its expected value.
///
/// Integer, bit and pointer results are always compared exactly, whatever
/// the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMethod {
    /// Absolute difference, `|expected - actual| <= precision`.
    Decimal,
    /// Distance in units in the last place, `ulps <= precision`.
    #[default]
    Ulps,
    /// Relative difference, `|expected - actual| / |expected| <= precision`.
    Relative,
    /// Absolute difference after sRGB-to-linear conversion of both
    /// operands, `diff < precision`.
    Image,
}

impl ComparisonMethod {
    /// The lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Ulps => "ulps",
            Self::Relative => "relative",
            Self::Image => "image",
        }
    }

    /// The tolerance used when none is configured, or `None` for types that
    /// are always compared exactly.
    ///
    /// Packed float types use the tolerance of their lane type.
    pub fn default_precision(self, ty: ValueType) -> Option<f64> {
        let digits = match ty.lane_type() {
            ValueType::F16 => F16_DECIMAL_DIGITS,
            ValueType::F32 => F32_DECIMAL_DIGITS,
            ValueType::F64 => F64_DECIMAL_DIGITS,
            _ => return None,
        };
        Some(match self {
            Self::Decimal | Self::Image => 10f64.powi(-digits),
            Self::Ulps => DEFAULT_ULPS,
            Self::Relative => DEFAULT_RELATIVE,
        })
    }
}

impl fmt::Display for ComparisonMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
