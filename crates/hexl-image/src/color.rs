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

//! Decoded texel colors.

use crate::format::TexelKind;
use hexl_core::math::{linear_to_srgb, srgb_to_linear};
use hexl_core::Value;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A float RGBA color as produced by reading a float-convertible texel.
///
/// `#[repr(C)]` keeps the layout identical to `[f32; 4]`, so colors can be
/// viewed as plain channel arrays.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Rgba {
    /// The red channel.
    pub r: f32,
    /// The green channel.
    pub g: f32,
    /// The blue channel.
    pub b: f32,
    /// The alpha channel.
    pub a: f32,
}

impl Rgba {
    /// `(0, 0, 0, 0)`.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// `(0, 0, 0, 1)`.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from explicit channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// The channels as `[r, g, b, a]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        bytemuck::cast(self)
    }

    /// Builds a color from `[r, g, b, a]`.
    #[inline]
    pub fn from_array(channels: [f32; 4]) -> Self {
        bytemuck::cast(channels)
    }

    /// Converts sRGB-encoded color channels to linear. Alpha is untouched.
    #[inline]
    pub fn srgb_to_linear(self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a,
        }
    }

    /// Converts linear color channels to sRGB encoding. Alpha is untouched.
    #[inline]
    pub fn linear_to_srgb(self) -> Self {
        Self {
            r: linear_to_srgb(self.r),
            g: linear_to_srgb(self.g),
            b: linear_to_srgb(self.b),
            a: self.a,
        }
    }

    /// Linearly interpolates between two colors.
    ///
    /// Uses `start + (end - start) * t`, so equal endpoints are returned
    /// exactly for any weight.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Add for Rgba {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Sub for Rgba {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
            a: self.a - rhs.a,
        }
    }
}

impl Mul<f32> for Rgba {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            r: self.r * scalar,
            g: self.g * scalar,
            b: self.b * scalar,
            a: self.a * scalar,
        }
    }
}

/// A texel color of whichever kind the channel type decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TexelColor {
    /// Normalized, half and float channel types.
    Float(Rgba),
    /// Signed integer channel types.
    Signed([i32; 4]),
    /// Unsigned integer channel types.
    Unsigned([u32; 4]),
}

impl TexelColor {
    /// The kind of color held.
    pub fn kind(&self) -> TexelKind {
        match self {
            Self::Float(_) => TexelKind::Float,
            Self::Signed(_) => TexelKind::Signed,
            Self::Unsigned(_) => TexelKind::Unsigned,
        }
    }

    /// The float color, if this is one.
    pub fn as_float(&self) -> Option<Rgba> {
        match self {
            Self::Float(c) => Some(*c),
            _ => None,
        }
    }

    /// The four channels as values (`f32`, `s32` or `u32`), ready to be
    /// compared against the result registers of an image read.
    pub fn to_values(&self) -> [Value; 4] {
        match self {
            Self::Float(c) => c.to_array().map(Value::F32),
            Self::Signed(c) => c.map(Value::S32),
            Self::Unsigned(c) => c.map(Value::U32),
        }
    }
}

impl From<Rgba> for TexelColor {
    fn from(color: Rgba) -> Self {
        Self::Float(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_array_layout() {
        let c = Rgba::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(Rgba::from_array(c.to_array()), c);
        let slice: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&c));
        assert_eq!(slice, &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_lerp_of_equal_endpoints_is_exact() {
        let c = Rgba::new(0.3, 0.7, 1.0 / 3.0, 0.9);
        for t in [0.0, 0.1, 0.5, 0.77, 1.0] {
            assert_eq!(Rgba::lerp(c, c, t), c);
        }
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgba::lerp(Rgba::TRANSPARENT, Rgba::new(1.0, 2.0, 3.0, 4.0), 0.5);
        assert_eq!(mid, Rgba::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn test_srgb_leaves_alpha() {
        let c = Rgba::new(0.5, 0.5, 0.5, 0.5).srgb_to_linear();
        assert_abs_diff_eq!(c.r, 0.214_041_14, epsilon = 1e-6);
        assert_eq!(c.a, 0.5);
        let back = c.linear_to_srgb();
        assert_abs_diff_eq!(back.g, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_to_values() {
        assert_eq!(
            TexelColor::Signed([-1, 2, -3, 4]).to_values(),
            [Value::S32(-1), Value::S32(2), Value::S32(-3), Value::S32(4)]
        );
        assert_eq!(TexelColor::from(Rgba::BLACK).to_values()[3], Value::F32(1.0));
        assert_eq!(TexelColor::Unsigned([0; 4]).kind(), TexelKind::Unsigned);
        assert_eq!(TexelColor::Unsigned([0; 4]).as_float(), None);
    }
}
