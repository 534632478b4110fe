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

//! # HEXL Core
//!
//! Foundational crate of the reference oracle: the value types every other
//! crate speaks in.
//!
//! - [`geometry`] describes the iteration space of a dispatch (grid, workgroups,
//!   waves) and the extent of an image.
//! - [`value`] is the closed model of typed scalar and packed numeric values,
//!   with bit-exact load/store and deterministic text.
//! - [`math`] holds the IEEE-754 helpers (binary16, ULP distance, subnormal
//!   flushing) and the sRGB transfer curves.

#![warn(missing_docs)]

pub mod geometry;
pub mod math;
pub mod value;

pub use geometry::{Dim, GridGeometry, ImageDim, ImageGeometry, ImageGeometryKind};
pub use math::{F16, IeeeFloat};
pub use value::{Value, ValueType};
