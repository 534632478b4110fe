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

//! Channel orders, channel types and the table of legal combinations.

use hexl_core::ImageGeometryKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which color channels a texel stores, and in what memory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Alpha only.
    A,
    /// Red only.
    R,
    /// Red followed by an ignored slot.
    Rx,
    /// Red, green.
    Rg,
    /// Red, green and an ignored slot.
    Rgx,
    /// Red, alpha.
    Ra,
    /// Red, green, blue. Packed channel types only.
    Rgb,
    /// Red, green, blue and an ignored slot. Packed channel types only.
    Rgbx,
    /// Red, green, blue, alpha.
    Rgba,
    /// Blue, green, red, alpha.
    Bgra,
    /// Alpha, red, green, blue.
    Argb,
    /// Alpha, blue, green, red.
    Abgr,
    /// sRGB-encoded red, green, blue.
    Srgb,
    /// sRGB-encoded red, green, blue and an ignored slot.
    Srgbx,
    /// sRGB-encoded red, green, blue and linear alpha.
    Srgba,
    /// sRGB-encoded blue, green, red and linear alpha.
    Sbgra,
    /// A single channel replicated into all four.
    Intensity,
    /// A single channel replicated into red, green and blue.
    Luminance,
    /// Depth.
    Depth,
    /// Depth with a stencil byte.
    DepthStencil,
}

impl ChannelOrder {
    /// Every channel order, in declaration order.
    pub const ALL: [ChannelOrder; 20] = [
        Self::A,
        Self::R,
        Self::Rx,
        Self::Rg,
        Self::Rgx,
        Self::Ra,
        Self::Rgb,
        Self::Rgbx,
        Self::Rgba,
        Self::Bgra,
        Self::Argb,
        Self::Abgr,
        Self::Srgb,
        Self::Srgbx,
        Self::Srgba,
        Self::Sbgra,
        Self::Intensity,
        Self::Luminance,
        Self::Depth,
        Self::DepthStencil,
    ];

    /// For each memory slot, the RGBA channel it holds (`None` for ignored
    /// slots and the stencil byte).
    pub(crate) fn slots(self) -> &'static [Option<usize>] {
        const R: Option<usize> = Some(0);
        const G: Option<usize> = Some(1);
        const B: Option<usize> = Some(2);
        const A: Option<usize> = Some(3);
        match self {
            Self::A => &[A],
            Self::R | Self::Intensity | Self::Luminance | Self::Depth => &[R],
            Self::Rx | Self::DepthStencil => &[R, None],
            Self::Rg => &[R, G],
            Self::Rgx => &[R, G, None],
            Self::Ra => &[R, A],
            Self::Rgb | Self::Srgb => &[R, G, B],
            Self::Rgbx | Self::Srgbx => &[R, G, B, None],
            Self::Rgba | Self::Srgba => &[R, G, B, A],
            Self::Bgra | Self::Sbgra => &[B, G, R, A],
            Self::Argb => &[A, R, G, B],
            Self::Abgr => &[A, B, G, R],
        }
    }

    /// The number of memory slots of a texel, ignored slots included.
    pub fn channel_count(self) -> usize {
        self.slots().len()
    }

    /// Whether the texel carries an alpha value (stored or replicated).
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::A
                | Self::Ra
                | Self::Rgba
                | Self::Bgra
                | Self::Argb
                | Self::Abgr
                | Self::Srgba
                | Self::Sbgra
                | Self::Intensity
        )
    }

    /// Whether color channels are sRGB encoded.
    pub fn is_srgb(self) -> bool {
        matches!(self, Self::Srgb | Self::Srgbx | Self::Srgba | Self::Sbgra)
    }

    /// Whether this order holds depth (or depth/stencil) data.
    pub fn is_depth(self) -> bool {
        matches!(self, Self::Depth | Self::DepthStencil)
    }

    /// The lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::R => "r",
            Self::Rx => "rx",
            Self::Rg => "rg",
            Self::Rgx => "rgx",
            Self::Ra => "ra",
            Self::Rgb => "rgb",
            Self::Rgbx => "rgbx",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
            Self::Argb => "argb",
            Self::Abgr => "abgr",
            Self::Srgb => "srgb",
            Self::Srgbx => "srgbx",
            Self::Srgba => "srgba",
            Self::Sbgra => "sbgra",
            Self::Intensity => "intensity",
            Self::Luminance => "luminance",
            Self::Depth => "depth",
            Self::DepthStencil => "depth_stencil",
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How each channel of a texel is encoded in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    /// Signed 8-bit integer read as a float in `[-1, 1]`.
    SnormInt8,
    /// Signed 16-bit integer read as a float in `[-1, 1]`.
    SnormInt16,
    /// Unsigned 8-bit integer read as a float in `[0, 1]`.
    UnormInt8,
    /// Unsigned 16-bit integer read as a float in `[0, 1]`.
    UnormInt16,
    /// Unsigned 24-bit integer in a 32-bit word, read as a float in `[0, 1]`. Depth only.
    UnormInt24,
    /// Three 5-bit normalized channels packed in 16 bits.
    UnormShort555,
    /// 5-, 6- and 5-bit normalized channels packed in 16 bits.
    UnormShort565,
    /// Three 10-bit normalized channels packed in 32 bits.
    UnormInt101010,
    /// Signed 8-bit integer.
    SignedInt8,
    /// Signed 16-bit integer.
    SignedInt16,
    /// Signed 32-bit integer.
    SignedInt32,
    /// Unsigned 8-bit integer.
    UnsignedInt8,
    /// Unsigned 16-bit integer.
    UnsignedInt16,
    /// Unsigned 32-bit integer.
    UnsignedInt32,
    /// Half-precision float.
    HalfFloat,
    /// Single-precision float.
    Float,
}

/// The kind of color a channel type decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelKind {
    /// Float channels (normalized, half and float types).
    Float,
    /// Signed integer channels.
    Signed,
    /// Unsigned integer channels.
    Unsigned,
}

impl ChannelType {
    /// Every channel type, in declaration order.
    pub const ALL: [ChannelType; 16] = [
        Self::SnormInt8,
        Self::SnormInt16,
        Self::UnormInt8,
        Self::UnormInt16,
        Self::UnormInt24,
        Self::UnormShort555,
        Self::UnormShort565,
        Self::UnormInt101010,
        Self::SignedInt8,
        Self::SignedInt16,
        Self::SignedInt32,
        Self::UnsignedInt8,
        Self::UnsignedInt16,
        Self::UnsignedInt32,
        Self::HalfFloat,
        Self::Float,
    ];

    /// Significant bits of one channel. Packed types report their whole word.
    pub fn bits(self) -> u32 {
        match self {
            Self::SnormInt8 | Self::UnormInt8 | Self::SignedInt8 | Self::UnsignedInt8 => 8,
            Self::SnormInt16
            | Self::UnormInt16
            | Self::SignedInt16
            | Self::UnsignedInt16
            | Self::HalfFloat
            | Self::UnormShort555
            | Self::UnormShort565 => 16,
            Self::UnormInt24 => 24,
            Self::SignedInt32 | Self::UnsignedInt32 | Self::Float | Self::UnormInt101010 => 32,
        }
    }

    /// Bytes of memory one channel (or one packed word) occupies.
    pub fn size(self) -> usize {
        match self {
            Self::UnormInt24 => 4,
            other => other.bits() as usize / 8,
        }
    }

    /// Whether all channels share one packed word.
    pub fn is_packed(self) -> bool {
        matches!(
            self,
            Self::UnormShort555 | Self::UnormShort565 | Self::UnormInt101010
        )
    }

    /// Whether integer storage is read back as a normalized float.
    pub fn is_normalized(self) -> bool {
        matches!(
            self,
            Self::SnormInt8
                | Self::SnormInt16
                | Self::UnormInt8
                | Self::UnormInt16
                | Self::UnormInt24
        ) || self.is_packed()
    }

    /// The kind of color this type decodes to.
    pub fn kind(self) -> TexelKind {
        match self {
            Self::SignedInt8 | Self::SignedInt16 | Self::SignedInt32 => TexelKind::Signed,
            Self::UnsignedInt8 | Self::UnsignedInt16 | Self::UnsignedInt32 => TexelKind::Unsigned,
            _ => TexelKind::Float,
        }
    }

    /// Whether texels of this type can be filtered.
    pub fn is_float_convertible(self) -> bool {
        self.kind() == TexelKind::Float
    }

    /// The lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::SnormInt8 => "snorm_int8",
            Self::SnormInt16 => "snorm_int16",
            Self::UnormInt8 => "unorm_int8",
            Self::UnormInt16 => "unorm_int16",
            Self::UnormInt24 => "unorm_int24",
            Self::UnormShort555 => "unorm_short_555",
            Self::UnormShort565 => "unorm_short_565",
            Self::UnormInt101010 => "unorm_int_101010",
            Self::SignedInt8 => "signed_int8",
            Self::SignedInt16 => "signed_int16",
            Self::SignedInt32 => "signed_int32",
            Self::UnsignedInt8 => "unsigned_int8",
            Self::UnsignedInt16 => "unsigned_int16",
            Self::UnsignedInt32 => "unsigned_int32",
            Self::HalfFloat => "half_float",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The size in bytes of one texel of the given format.
pub fn texel_size(order: ChannelOrder, ty: ChannelType) -> usize {
    match (order, ty) {
        (ChannelOrder::DepthStencil, ChannelType::Float) => 8,
        (ChannelOrder::DepthStencil, _) => 4,
        (_, packed) if packed.is_packed() => packed.size(),
        (order, ty) => order.channel_count() * ty.size(),
    }
}

/// An image or sampler configuration the hardware model does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The channel type cannot be used with the channel order.
    #[error("channel type {channel_type} is not supported with channel order {order}")]
    IllegalFormat {
        /// The channel order.
        order: ChannelOrder,
        /// The channel type.
        channel_type: ChannelType,
    },
    /// The channel order cannot be used with the image geometry.
    #[error("channel order {order} is not supported for {geometry} images")]
    IllegalGeometry {
        /// The image geometry kind.
        geometry: ImageGeometryKind,
        /// The channel order.
        order: ChannelOrder,
    },
    /// Wrapping addressing modes need normalized coordinates.
    #[error("addressing mode {addressing} requires normalized coordinates")]
    IllegalAddressing {
        /// The addressing mode.
        addressing: crate::sampler::AddressingMode,
    },
    /// Only float-convertible channel types can be filtered.
    #[error("linear filtering is not supported for channel type {channel_type}")]
    IllegalFilter {
        /// The channel type.
        channel_type: ChannelType,
    },
}

/// Checks that `order` and `ty` form a legal format for an image of `geometry`.
pub fn check_format(
    geometry: ImageGeometryKind,
    order: ChannelOrder,
    ty: ChannelType,
) -> Result<(), ImageError> {
    use ChannelType as T;

    if geometry.is_depth() != order.is_depth()
        || (order.is_srgb() && geometry == ImageGeometryKind::D1Buffer)
    {
        return Err(ImageError::IllegalGeometry { geometry, order });
    }

    let legal = match order {
        ChannelOrder::Depth => matches!(ty, T::UnormInt16 | T::UnormInt24 | T::Float),
        ChannelOrder::DepthStencil => matches!(ty, T::UnormInt24 | T::Float),
        ChannelOrder::Srgb | ChannelOrder::Srgbx | ChannelOrder::Srgba | ChannelOrder::Sbgra => {
            ty == T::UnormInt8
        }
        ChannelOrder::Rgb | ChannelOrder::Rgbx => ty.is_packed(),
        ChannelOrder::Argb | ChannelOrder::Bgra | ChannelOrder::Abgr => ty.bits() == 8,
        ChannelOrder::Intensity | ChannelOrder::Luminance => matches!(
            ty,
            T::UnormInt8 | T::UnormInt16 | T::SnormInt8 | T::SnormInt16 | T::HalfFloat | T::Float
        ),
        ChannelOrder::A
        | ChannelOrder::R
        | ChannelOrder::Rx
        | ChannelOrder::Rg
        | ChannelOrder::Rgx
        | ChannelOrder::Ra
        | ChannelOrder::Rgba => !ty.is_packed() && ty != T::UnormInt24,
    };
    if legal {
        Ok(())
    } else {
        Err(ImageError::IllegalFormat {
            order,
            channel_type: ty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texel_sizes() {
        assert_eq!(texel_size(ChannelOrder::Rgba, ChannelType::UnormInt8), 4);
        assert_eq!(texel_size(ChannelOrder::Rgba, ChannelType::Float), 16);
        assert_eq!(texel_size(ChannelOrder::Rgx, ChannelType::SignedInt16), 6);
        assert_eq!(texel_size(ChannelOrder::Srgb, ChannelType::UnormInt8), 3);
        assert_eq!(texel_size(ChannelOrder::Rgb, ChannelType::UnormShort565), 2);
        assert_eq!(texel_size(ChannelOrder::Rgbx, ChannelType::UnormInt101010), 4);
        assert_eq!(texel_size(ChannelOrder::Depth, ChannelType::UnormInt24), 4);
        assert_eq!(texel_size(ChannelOrder::DepthStencil, ChannelType::UnormInt24), 4);
        assert_eq!(texel_size(ChannelOrder::DepthStencil, ChannelType::Float), 8);
        assert_eq!(texel_size(ChannelOrder::Rgba, ChannelType::UnsignedInt32), 16);
    }

    #[test]
    fn test_every_legal_texel_fits_a_value() {
        for order in ChannelOrder::ALL {
            for ty in ChannelType::ALL {
                let geometry = if order.is_depth() {
                    ImageGeometryKind::D2Depth
                } else {
                    ImageGeometryKind::D2
                };
                if check_format(geometry, order, ty).is_ok() {
                    assert!(texel_size(order, ty) <= 16, "{order} {ty}");
                }
            }
        }
    }

    #[test]
    fn test_depth_needs_depth_geometry() {
        assert_eq!(
            check_format(ImageGeometryKind::D2, ChannelOrder::Depth, ChannelType::Float),
            Err(ImageError::IllegalGeometry {
                geometry: ImageGeometryKind::D2,
                order: ChannelOrder::Depth
            })
        );
        assert!(check_format(
            ImageGeometryKind::D2ArrayDepth,
            ChannelOrder::DepthStencil,
            ChannelType::UnormInt24
        )
        .is_ok());
        assert!(check_format(
            ImageGeometryKind::D2Depth,
            ChannelOrder::DepthStencil,
            ChannelType::UnormInt16
        )
        .is_err());
        assert!(check_format(
            ImageGeometryKind::D2Depth,
            ChannelOrder::Rgba,
            ChannelType::Float
        )
        .is_err());
    }

    #[test]
    fn test_format_table() {
        let g = ImageGeometryKind::D2;
        assert!(check_format(g, ChannelOrder::Srgba, ChannelType::UnormInt8).is_ok());
        assert!(check_format(g, ChannelOrder::Srgba, ChannelType::UnormInt16).is_err());
        assert!(check_format(
            ImageGeometryKind::D1Buffer,
            ChannelOrder::Srgba,
            ChannelType::UnormInt8
        )
        .is_err());
        assert!(check_format(g, ChannelOrder::Rgb, ChannelType::UnormShort555).is_ok());
        assert!(check_format(g, ChannelOrder::Rgb, ChannelType::UnormInt8).is_err());
        assert!(check_format(g, ChannelOrder::Rgba, ChannelType::UnormShort565).is_err());
        assert!(check_format(g, ChannelOrder::Bgra, ChannelType::SignedInt8).is_ok());
        assert!(check_format(g, ChannelOrder::Bgra, ChannelType::Float).is_err());
        assert!(check_format(g, ChannelOrder::Luminance, ChannelType::HalfFloat).is_ok());
        assert!(check_format(g, ChannelOrder::Intensity, ChannelType::SignedInt32).is_err());
        assert!(check_format(g, ChannelOrder::Rgba, ChannelType::UnormInt24).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = check_format(
            ImageGeometryKind::D2,
            ChannelOrder::Rgb,
            ChannelType::Float,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "channel type float is not supported with channel order rgb"
        );
    }

    #[test]
    fn test_classification() {
        assert_eq!(ChannelType::SignedInt16.kind(), TexelKind::Signed);
        assert_eq!(ChannelType::UnsignedInt8.kind(), TexelKind::Unsigned);
        assert!(ChannelType::UnormShort565.is_normalized());
        assert!(ChannelType::HalfFloat.is_float_convertible());
        assert!(!ChannelType::SignedInt32.is_float_convertible());
        assert_eq!(ChannelOrder::Rgbx.channel_count(), 4);
        assert!(ChannelOrder::Intensity.has_alpha());
        assert!(!ChannelOrder::Luminance.has_alpha());
    }
}
