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

//! Numeric helpers shared by the value model and the comparison engine.
//!
//! [`F16`] stores half-precision values bit-exactly, [`IeeeFloat`] gives a
//! width-independent bit-level view of `F16`, `f32` and `f64`, and [`srgb`]
//! holds the perceptual transfer curves used by image formats.

pub mod float;
pub mod half;
pub mod srgb;

pub use self::float::{abs_diff_ulps, IeeeFloat};
pub use self::half::F16;
pub use self::srgb::{linear_to_srgb, srgb_to_linear, srgb_to_linear_f64};
