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

//! Iteration-space and image-extent descriptions.
//!
//! All types in this module are immutable once constructed and can be shared
//! freely between threads.

pub mod dim;
pub mod grid;
pub mod image;

pub use self::dim::Dim;
pub use self::grid::GridGeometry;
pub use self::image::{ImageDim, ImageGeometry, ImageGeometryKind};
