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

//! A three-component extent or point used for grids, workgroups and workitem ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A three-dimensional extent or point with `u64` components.
///
/// Depending on context a `Dim` is a size (grid size, workgroup size) or a
/// point inside such a size. Unused trailing components are 1 for sizes and
/// 0 for points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dim {
    /// The x component (dimension 0, fastest varying).
    pub x: u64,
    /// The y component (dimension 1).
    pub y: u64,
    /// The z component (dimension 2).
    pub z: u64,
}

impl Dim {
    /// The origin point `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// The unit extent `(1, 1, 1)`.
    pub const ONE: Self = Self::new(1, 1, 1);

    /// Creates a new `Dim` from explicit components.
    #[inline]
    pub const fn new(x: u64, y: u64, z: u64) -> Self {
        Self { x, y, z }
    }

    /// Returns component `d`.
    ///
    /// # Panics
    /// Panics if `d >= 3`.
    #[inline]
    pub fn get(&self, d: usize) -> u64 {
        match d {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("dimension index {d} out of range (expected 0..3)"),
        }
    }

    /// Returns a copy with component `d` replaced by `value`.
    ///
    /// # Panics
    /// Panics if `d >= 3`.
    #[inline]
    pub fn with(mut self, d: usize, value: u64) -> Self {
        match d {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => panic!("dimension index {d} out of range (expected 0..3)"),
        }
        self
    }

    /// The product of all three components.
    #[inline]
    pub fn size(&self) -> u64 {
        self.x * self.y * self.z
    }

    /// The product of all three components as a `u32`.
    ///
    /// # Panics
    /// Panics if the product does not fit in 32 bits.
    pub fn size32(&self) -> u32 {
        let size = self
            .x
            .checked_mul(self.y)
            .and_then(|xy| xy.checked_mul(self.z))
            .unwrap_or(u64::MAX);
        u32::try_from(size).unwrap_or_else(|_| panic!("{self} does not fit in 32 bits"))
    }

    /// Returns the components as an array `[x, y, z]`.
    #[inline]
    pub const fn to_array(&self) -> [u64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Dim {
    /// A unit extent.
    fn default() -> Self {
        Self::ONE
    }
}

impl From<[u64; 3]> for Dim {
    fn from(v: [u64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Index<usize> for Dim {
    type Output = u64;

    fn index(&self, d: usize) -> &Self::Output {
        match d {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("dimension index {d} out of range (expected 0..3)"),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_access() {
        let d = Dim::new(4, 5, 6);
        assert_eq!(d.get(0), 4);
        assert_eq!(d[1], 5);
        assert_eq!(d[2], 6);
        assert_eq!(d.with(1, 9), Dim::new(4, 9, 6));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_dimension_panics() {
        let _ = Dim::ONE.get(3);
    }

    #[test]
    fn test_size() {
        assert_eq!(Dim::new(2, 3, 4).size(), 24);
        assert_eq!(Dim::new(2, 3, 4).size32(), 24);
        assert_eq!(Dim::default(), Dim::ONE);
    }

    #[test]
    #[should_panic]
    fn test_size32_overflow_panics() {
        let _ = Dim::new(1 << 20, 1 << 20, 1).size32();
    }

    #[test]
    fn test_display_and_serde() {
        let d = Dim::new(1, 2, 3);
        assert_eq!(d.to_string(), "(1, 2, 3)");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<Dim>(&json).unwrap(), d);
    }
}
