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

use hexl_core::Value;
use std::fmt;

/// The magnitude of the difference between an expected and an actual value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deviation {
    /// Lane-wise `max - min` of two integer, bit or pointer values, held in
    /// the unsigned type of the same shape so that it never overflows.
    Exact(Value),
    /// The error of a scalar float under the active method.
    Float(f64),
    /// Per-lane errors of a packed float value.
    Lanes {
        /// Lane errors; only the first `count` are meaningful.
        lanes: [f64; 4],
        /// Number of lanes.
        count: usize,
    },
}

impl Deviation {
    /// Collects per-lane float errors.
    ///
    /// # Panics
    /// Panics if more than four errors are given.
    pub fn from_lanes(errors: &[f64]) -> Self {
        assert!(errors.len() <= 4, "at most four float lanes");
        let mut lanes = [0.0; 4];
        lanes[..errors.len()].copy_from_slice(errors);
        Self::Lanes {
            lanes,
            count: errors.len(),
        }
    }

    /// The largest error across lanes, as an `f64`.
    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Exact(v) => v.lanes().map(|l| l.bits() as f64).fold(0.0, f64::max),
            Self::Float(e) => *e,
            Self::Lanes { lanes, count } => lanes[..*count].iter().copied().fold(0.0, f64::max),
        }
    }

    /// Whether the operands were identical (or within a zero error).
    pub fn is_zero(&self) -> bool {
        self.magnitude() == 0.0
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::Float(e) => write!(f, "{e:e}"),
            Self::Lanes { lanes, count } => {
                f.write_str("(")?;
                for (i, e) in lanes[..*count].iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e:e}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(Deviation::Exact(Value::U8x4([0, 3, 9, 1])).magnitude(), 9.0);
        assert_eq!(Deviation::Float(0.25).magnitude(), 0.25);
        assert_eq!(Deviation::from_lanes(&[1.0, f64::INFINITY]).magnitude(), f64::INFINITY);
        assert!(Deviation::Exact(Value::U32(0)).is_zero());
        assert!(!Deviation::from_lanes(&[0.0, 0.5]).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Deviation::Exact(Value::U16(7)).to_string(), "7");
        assert_eq!(Deviation::Float(0.5).to_string(), "5e-1");
        assert_eq!(Deviation::from_lanes(&[0.0, 2.0]).to_string(), "(0e0, 2e0)");
    }
}
