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

//! The public-facing API of the HEXL reference oracle.
//!
//! A conformance harness describes a dispatch with a [`GridGeometry`], runs
//! it, and hands the produced buffers to the functions of [`validate`]
//! together with the expected values computed on the host. Image tests first
//! compute expected texels with an [`ImageSamplingEmulator`].

pub mod validate;

pub mod prelude {
    //! Everything a harness usually needs, in one import.
    pub use crate::validate::{parse_config, validate_buffer, validate_image_reads, validate_values};
    pub use hexl_compare::{
        Comparison, ComparisonConfig, ComparisonMethod, ComparisonSummary, Deviation, Verdict,
    };
    pub use hexl_core::{
        Dim, GridGeometry, ImageDim, ImageGeometry, ImageGeometryKind, Value, ValueType, F16,
    };
    pub use hexl_image::{
        AddressingMode, ChannelOrder, ChannelType, CoordNormalization, FilterMode,
        ImageSamplingEmulator, LinearImage, Rgba, SamplerDescriptor, TexelColor, TexelStore,
    };
}

pub use hexl_compare::{Comparison, ComparisonConfig, ComparisonSummary};
pub use hexl_core::{GridGeometry, ImageGeometry, Value, ValueType};
pub use hexl_image::ImageSamplingEmulator;
