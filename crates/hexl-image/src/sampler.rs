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

//! Sampler state: addressing, filtering and coordinate normalization.

use crate::format::{ChannelType, ImageError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines how coordinates outside the image are resolved to a texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressingMode {
    /// The caller guarantees in-range coordinates.
    Undefined,
    /// Coordinates are clamped to the edge texel.
    #[default]
    ClampToEdge,
    /// Coordinates outside the image read the border color.
    ClampToBorder,
    /// Coordinates wrap around.
    Repeat,
    /// Coordinates wrap around, mirroring on every other tile.
    MirroredRepeat,
}

impl AddressingMode {
    /// The lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::ClampToEdge => "clamp_to_edge",
            Self::ClampToBorder => "clamp_to_border",
            Self::Repeat => "repeat",
            Self::MirroredRepeat => "mirrored_repeat",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Defines the filtering mode for image sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    #[default]
    Nearest,
    /// Weighted average of the 2, 4 or 8 nearest texels.
    Linear,
}

/// Whether coordinates are given in texels or as fractions of the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoordNormalization {
    /// Coordinates in `[0, 1)` span the image.
    Normalized,
    /// Coordinates are texel positions.
    #[default]
    Unnormalized,
}

/// The sampler half of an image read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SamplerDescriptor {
    /// The addressing mode, shared by all axes.
    pub addressing: AddressingMode,
    /// The filter mode.
    pub filter: FilterMode,
    /// The coordinate normalization.
    pub coords: CoordNormalization,
}

impl SamplerDescriptor {
    /// Creates a sampler descriptor.
    pub const fn new(
        addressing: AddressingMode,
        filter: FilterMode,
        coords: CoordNormalization,
    ) -> Self {
        Self {
            addressing,
            filter,
            coords,
        }
    }

    /// Whether coordinates are normalized.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.coords == CoordNormalization::Normalized
    }
}

/// Checks that the sampler state is a legal combination.
pub fn check_sampler(sampler: &SamplerDescriptor) -> Result<(), ImageError> {
    match sampler.addressing {
        AddressingMode::Repeat | AddressingMode::MirroredRepeat if !sampler.is_normalized() => {
            Err(ImageError::IllegalAddressing {
                addressing: sampler.addressing,
            })
        }
        _ => Ok(()),
    }
}

/// Checks that texels of type `ty` can be read through `filter`.
pub fn check_filter(filter: FilterMode, ty: ChannelType) -> Result<(), ImageError> {
    if filter == FilterMode::Linear && !ty.is_float_convertible() {
        return Err(ImageError::IllegalFilter { channel_type: ty });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_needs_normalized_coords() {
        let mut s = SamplerDescriptor::new(
            AddressingMode::Repeat,
            FilterMode::Nearest,
            CoordNormalization::Unnormalized,
        );
        assert!(check_sampler(&s).is_err());
        s.coords = CoordNormalization::Normalized;
        assert!(check_sampler(&s).is_ok());
        s.addressing = AddressingMode::MirroredRepeat;
        assert!(check_sampler(&s).is_ok());
        assert!(check_sampler(&SamplerDescriptor::default()).is_ok());
    }

    #[test]
    fn test_linear_needs_float_channels() {
        assert!(check_filter(FilterMode::Linear, ChannelType::UnormInt8).is_ok());
        assert!(check_filter(FilterMode::Linear, ChannelType::HalfFloat).is_ok());
        assert_eq!(
            check_filter(FilterMode::Linear, ChannelType::UnsignedInt8),
            Err(ImageError::IllegalFilter {
                channel_type: ChannelType::UnsignedInt8
            })
        );
        assert!(check_filter(FilterMode::Nearest, ChannelType::SignedInt32).is_ok());
    }

    #[test]
    fn test_descriptor_serde() {
        let s = SamplerDescriptor::new(
            AddressingMode::ClampToBorder,
            FilterMode::Linear,
            CoordNormalization::Normalized,
        );
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"addressing":"ClampToBorder","filter":"Linear","coords":"Normalized"}"#
        );
        assert_eq!(serde_json::from_str::<SamplerDescriptor>(&json).unwrap(), s);
    }
}
