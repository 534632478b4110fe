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

//! # HEXL Image
//!
//! A software model of image hardware, used to compute the values image
//! read and write instructions are expected to produce.
//!
//! - [`format`] holds channel orders, channel types and the legality table.
//! - [`sampler`] holds addressing, filtering and coordinate normalization.
//! - [`addressing`] and [`channel`] are the two halves of a texel access:
//!   resolving a coordinate to a texel, and converting texel bytes to a color.
//! - [`ImageSamplingEmulator`] ties them together over a [`TexelStore`].

#![warn(missing_docs)]

pub mod addressing;
pub mod channel;
pub mod color;
pub mod emulator;
pub mod format;
pub mod sampler;
pub mod store;

pub use color::{Rgba, TexelColor};
pub use emulator::{check_image, ImageSamplingEmulator};
pub use format::{check_format, texel_size, ChannelOrder, ChannelType, ImageError, TexelKind};
pub use sampler::{
    check_filter, check_sampler, AddressingMode, CoordNormalization, FilterMode,
    SamplerDescriptor,
};
pub use store::{LinearImage, TexelStore};
