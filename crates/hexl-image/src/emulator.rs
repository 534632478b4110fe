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

//! The image sampling emulator: expected results of image reads and writes.

use crate::addressing::{address, layer_index};
use crate::channel::{decode_texel, encode_texel};
use crate::color::{Rgba, TexelColor};
use crate::format::{check_format, ChannelOrder, ChannelType, ImageError, TexelKind};
use crate::sampler::{check_filter, check_sampler, FilterMode, SamplerDescriptor};
use crate::store::TexelStore;
use hexl_core::{ImageGeometry, ImageGeometryKind, Value};

/// Checks the whole configuration of an image read: the format against the
/// geometry, the sampler state, and the filter against the channel type.
pub fn check_image(
    geometry: ImageGeometryKind,
    order: ChannelOrder,
    ty: ChannelType,
    sampler: &SamplerDescriptor,
) -> Result<(), ImageError> {
    check_format(geometry, order, ty)?;
    check_sampler(sampler)?;
    check_filter(sampler.filter, ty)
}

/// Computes what image instructions should return for a given backing store.
///
/// The emulator never mutates the store; [`write`](Self::write) returns the
/// encoded texel and leaves storing it to the caller.
#[derive(Debug)]
pub struct ImageSamplingEmulator<'a, S: TexelStore + ?Sized> {
    geometry: ImageGeometry,
    order: ChannelOrder,
    channel_type: ChannelType,
    sampler: SamplerDescriptor,
    store: &'a S,
}

impl<'a, S: TexelStore + ?Sized> ImageSamplingEmulator<'a, S> {
    /// Creates an emulator, rejecting illegal configurations.
    pub fn try_new(
        geometry: ImageGeometry,
        order: ChannelOrder,
        channel_type: ChannelType,
        sampler: SamplerDescriptor,
        store: &'a S,
    ) -> Result<Self, ImageError> {
        check_image(geometry.kind(), order, channel_type, &sampler)?;
        log::trace!(
            "Image emulator for {geometry} {order}/{channel_type}, {:?}.",
            sampler
        );
        Ok(Self {
            geometry,
            order,
            channel_type,
            sampler,
            store,
        })
    }

    /// Creates an emulator.
    ///
    /// # Panics
    /// Panics if the configuration is illegal; see [`check_image`].
    pub fn new(
        geometry: ImageGeometry,
        order: ChannelOrder,
        channel_type: ChannelType,
        sampler: SamplerDescriptor,
        store: &'a S,
    ) -> Self {
        match Self::try_new(geometry, order, channel_type, sampler, store) {
            Ok(emulator) => emulator,
            Err(err) => panic!("illegal image configuration: {err}"),
        }
    }

    /// The image geometry.
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    /// The channel order.
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// The channel type.
    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    /// The sampler state used by [`read`](Self::read).
    pub fn sampler(&self) -> &SamplerDescriptor {
        &self.sampler
    }

    /// The color read for coordinates outside a clamp-to-border image.
    pub fn border_color(&self) -> TexelColor {
        let alpha = u8::from(!self.order.has_alpha());
        match self.channel_type.kind() {
            TexelKind::Float => {
                TexelColor::Float(Rgba::new(0.0, 0.0, 0.0, f32::from(alpha)))
            }
            TexelKind::Signed => TexelColor::Signed([0, 0, 0, alpha.into()]),
            TexelKind::Unsigned => TexelColor::Unsigned([0, 0, 0, alpha.into()]),
        }
    }

    fn check_coord_count(&self, count: usize) {
        let expected = self.geometry.coord_count();
        assert_eq!(
            count,
            expected,
            "a {} image takes {expected} coordinates",
            self.geometry.kind()
        );
    }

    /// Reads the texel at `index`, or the border color for a sentinel index.
    fn fetch(&self, index: [u32; 3]) -> TexelColor {
        let extents = self.geometry.extents();
        if index.iter().zip(extents).any(|(i, e)| *i >= e) {
            return self.border_color();
        }
        let bytes = self.store.texel_bytes(index[0], index[1], index[2]);
        decode_texel(self.order, self.channel_type, bytes)
    }

    /// The texel at integer coordinates, without sampling.
    ///
    /// # Panics
    /// Panics if the coordinate count does not match the geometry or a
    /// coordinate is out of range.
    pub fn load(&self, coords: &[u32]) -> TexelColor {
        let index = self.texel_index(coords);
        self.fetch(index)
    }

    fn texel_index(&self, coords: &[u32]) -> [u32; 3] {
        self.check_coord_count(coords.len());
        let mut index = [0u32; 3];
        for (axis, &c) in coords.iter().enumerate() {
            let extent = self.geometry.extent(axis);
            assert!(c < extent, "coordinate {c} on axis {axis} outside {}", self.geometry);
            index[axis] = c;
        }
        index
    }

    /// Samples the image at `coords` through the sampler.
    ///
    /// # Panics
    /// Panics if the coordinate count does not match the geometry.
    pub fn read(&self, coords: &[f32]) -> TexelColor {
        self.check_coord_count(coords.len());
        let linear = self.sampler.filter == FilterMode::Linear;
        let mode = self.sampler.addressing;

        // Per axis: the texel pair straddling the coordinate and the weight
        // of the second one. Nearest filtering only uses the first.
        let mut taps = [[0u32; 2]; 3];
        let mut weights = [0f32; 3];
        let mut blended = [0usize; 3];
        let mut blended_count = 0;
        for (axis, &coord) in coords.iter().enumerate() {
            let size = self.geometry.extent(axis);
            if self.geometry.array_axis() == Some(axis) {
                let layer = layer_index(coord, size);
                taps[axis] = [layer, layer];
                continue;
            }
            let mut u = coord;
            if self.sampler.is_normalized() {
                u *= size as f32;
            }
            if linear {
                u -= 0.5;
                taps[axis] = [address(mode, u, size), address(mode, u + 1.0, size)];
                weights[axis] = u - u.floor();
                blended[blended_count] = axis;
                blended_count += 1;
            } else {
                let i = address(mode, u, size);
                taps[axis] = [i, i];
            }
        }

        if !linear {
            return self.fetch([taps[0][0], taps[1][0], taps[2][0]]);
        }

        let axes = &blended[..blended_count];
        let corners = 1usize << axes.len();
        let mut texels = [Rgba::TRANSPARENT; 8];
        for (corner, texel) in texels[..corners].iter_mut().enumerate() {
            let mut index = [taps[0][0], taps[1][0], taps[2][0]];
            for (bit, &axis) in axes.iter().enumerate() {
                index[axis] = taps[axis][(corner >> bit) & 1];
            }
            // Construction guarantees a float-convertible channel type.
            *texel = match self.fetch(index) {
                TexelColor::Float(c) => c,
                other => unreachable!("linear filtering fetched {other:?}"),
            };
        }

        // Reduce along each blended axis in turn; neighbours along the
        // current axis are adjacent in `texels`.
        let mut len = corners;
        for &axis in axes {
            len /= 2;
            for j in 0..len {
                texels[j] = Rgba::lerp(texels[2 * j], texels[2 * j + 1], weights[axis]);
            }
        }
        TexelColor::Float(texels[0])
    }

    /// Encodes `color` as the texel a store to `coords` writes.
    ///
    /// # Panics
    /// Panics if the coordinates are out of range or the color kind does not
    /// match the channel type.
    pub fn write(&self, coords: &[u32], color: &TexelColor) -> Value {
        self.texel_index(coords);
        encode_texel(self.order, self.channel_type, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{AddressingMode, CoordNormalization};
    use crate::store::LinearImage;
    use hexl_core::ImageDim;

    fn sampler(
        addressing: AddressingMode,
        filter: FilterMode,
        coords: CoordNormalization,
    ) -> SamplerDescriptor {
        SamplerDescriptor::new(addressing, filter, coords)
    }

    /// A 1D R/float image whose texel `i` holds `i`.
    fn ramp(width: u32) -> LinearImage {
        let geometry = ImageGeometry::new(ImageGeometryKind::D1, ImageDim::new(width, 1, 1, 1));
        let mut image = LinearImage::new(geometry, ChannelOrder::R, ChannelType::Float);
        for x in 0..width {
            image.store_texel(x, 0, 0, Value::U32((x as f32).to_bits()));
        }
        image
    }

    fn red(color: TexelColor) -> f32 {
        color.as_float().expect("float texel").r
    }

    #[test]
    fn test_nearest_unnormalized() {
        let image = ramp(8);
        let s = sampler(
            AddressingMode::ClampToEdge,
            FilterMode::Nearest,
            CoordNormalization::Unnormalized,
        );
        let emu = ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::R,
            ChannelType::Float,
            s,
            &image,
        );
        assert_eq!(red(emu.read(&[3.7])), 3.0);
        assert_eq!(red(emu.read(&[-5.0])), 0.0);
        assert_eq!(red(emu.read(&[12.0])), 7.0);
        assert_eq!(emu.read(&[2.0]), TexelColor::Float(Rgba::new(2.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_repeat_normalized() {
        let image = ramp(8);
        let s = sampler(
            AddressingMode::Repeat,
            FilterMode::Nearest,
            CoordNormalization::Normalized,
        );
        let emu = ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::R,
            ChannelType::Float,
            s,
            &image,
        );
        assert_eq!(red(emu.read(&[-1.5 / 8.0])), 6.0);
        assert_eq!(red(emu.read(&[1.25])), 2.0);
    }

    #[test]
    fn test_border_color_depends_on_alpha() {
        let image = ramp(4);
        let s = sampler(
            AddressingMode::ClampToBorder,
            FilterMode::Nearest,
            CoordNormalization::Unnormalized,
        );
        let emu = ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::R,
            ChannelType::Float,
            s,
            &image,
        );
        assert_eq!(emu.read(&[-0.5]), TexelColor::Float(Rgba::BLACK));
        assert_eq!(emu.read(&[4.0]), TexelColor::Float(Rgba::BLACK));
        assert_eq!(red(emu.read(&[3.5])), 3.0);

        let geometry = ImageGeometry::new(ImageGeometryKind::D2, ImageDim::new(2, 2, 1, 1));
        let rgba = LinearImage::new(geometry, ChannelOrder::Rgba, ChannelType::UnsignedInt8);
        let emu = ImageSamplingEmulator::new(
            geometry,
            ChannelOrder::Rgba,
            ChannelType::UnsignedInt8,
            s,
            &rgba,
        );
        assert_eq!(emu.read(&[0.5, 9.0]), TexelColor::Unsigned([0; 4]));
    }

    #[test]
    fn test_linear_1d_midpoint() {
        let image = ramp(4);
        let s = sampler(
            AddressingMode::ClampToEdge,
            FilterMode::Linear,
            CoordNormalization::Unnormalized,
        );
        let emu = ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::R,
            ChannelType::Float,
            s,
            &image,
        );
        assert_eq!(red(emu.read(&[1.0])), 0.5);
        assert_eq!(red(emu.read(&[2.5])), 2.0);
        assert_eq!(red(emu.read(&[0.25])), 0.0);
        assert_eq!(red(emu.read(&[3.75])), 3.0);
    }

    #[test]
    fn test_linear_2d_blends_four_texels() {
        let geometry = ImageGeometry::new(ImageGeometryKind::D2, ImageDim::new(2, 2, 1, 1));
        let mut image = LinearImage::new(geometry, ChannelOrder::R, ChannelType::Float);
        for (x, y, v) in [(0, 0, 0.0f32), (1, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0)] {
            image.store_texel(x, y, 0, Value::U32(v.to_bits()));
        }
        let s = sampler(
            AddressingMode::ClampToEdge,
            FilterMode::Linear,
            CoordNormalization::Normalized,
        );
        let emu =
            ImageSamplingEmulator::new(geometry, ChannelOrder::R, ChannelType::Float, s, &image);
        assert_eq!(red(emu.read(&[0.5, 0.5])), 1.5);
        assert_eq!(red(emu.read(&[0.5, 0.25])), 0.5);
    }

    #[test]
    fn test_linear_of_identical_texels_is_exact() {
        let geometry = ImageGeometry::new(ImageGeometryKind::D3, ImageDim::new(3, 4, 5, 1));
        let mut image = LinearImage::new(geometry, ChannelOrder::Rgba, ChannelType::UnormInt8);
        image.fill(Value::U32(u32::from_le_bytes([17, 99, 201, 255])));
        let expected = TexelColor::Float(Rgba::new(17.0 / 255.0, 99.0 / 255.0, 201.0 / 255.0, 1.0));
        for mode in [AddressingMode::ClampToEdge, AddressingMode::Repeat, AddressingMode::MirroredRepeat] {
            let s = sampler(mode, FilterMode::Linear, CoordNormalization::Normalized);
            let emu = ImageSamplingEmulator::new(
                geometry,
                ChannelOrder::Rgba,
                ChannelType::UnormInt8,
                s,
                &image,
            );
            for coords in [[0.1, 0.2, 0.3], [-0.7, 1.3, 0.55], [0.999, 0.0, 2.25]] {
                assert_eq!(emu.read(&coords), expected, "{mode} {coords:?}");
            }
        }
    }

    #[test]
    fn test_array_layers_are_not_blended() {
        let geometry =
            ImageGeometry::new(ImageGeometryKind::D2Array, ImageDim::new(2, 2, 1, 3));
        let mut image = LinearImage::new(geometry, ChannelOrder::R, ChannelType::Float);
        for layer in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    image.store_texel(x, y, layer, Value::U32((layer as f32 * 10.0).to_bits()));
                }
            }
        }
        let s = sampler(
            AddressingMode::ClampToEdge,
            FilterMode::Linear,
            CoordNormalization::Unnormalized,
        );
        let emu =
            ImageSamplingEmulator::new(geometry, ChannelOrder::R, ChannelType::Float, s, &image);
        assert_eq!(red(emu.read(&[0.7, 1.2, 0.4])), 0.0);
        assert_eq!(red(emu.read(&[0.7, 1.2, 1.5])), 20.0);
        assert_eq!(red(emu.read(&[0.7, 1.2, 9.0])), 20.0);
        assert_eq!(red(emu.read(&[0.7, 1.2, -3.0])), 0.0);
    }

    #[test]
    fn test_write_then_load() {
        let geometry = ImageGeometry::new(ImageGeometryKind::D1Array, ImageDim::new(4, 1, 1, 2));
        let mut image = LinearImage::new(geometry, ChannelOrder::Rgba, ChannelType::SignedInt16);
        let color = TexelColor::Signed([-5, 40_000, 7, -40_000]);
        let texel = {
            let emu = ImageSamplingEmulator::new(
                geometry,
                ChannelOrder::Rgba,
                ChannelType::SignedInt16,
                SamplerDescriptor::default(),
                &image,
            );
            emu.write(&[3, 1], &color)
        };
        assert_eq!(texel.value_type(), hexl_core::ValueType::U64);
        image.store_texel(3, 1, 0, texel);

        let emu = ImageSamplingEmulator::new(
            geometry,
            ChannelOrder::Rgba,
            ChannelType::SignedInt16,
            SamplerDescriptor::default(),
            &image,
        );
        assert_eq!(emu.load(&[3, 1]), TexelColor::Signed([-5, 32767, 7, -32768]));
        assert_eq!(emu.load(&[3, 0]), TexelColor::Signed([0; 4]));
    }

    #[test]
    fn test_illegal_configurations() {
        let image = ramp(4);
        let geometry = *image.geometry();
        let linear = sampler(
            AddressingMode::ClampToEdge,
            FilterMode::Linear,
            CoordNormalization::Unnormalized,
        );
        assert_eq!(
            ImageSamplingEmulator::try_new(
                geometry,
                ChannelOrder::R,
                ChannelType::UnsignedInt32,
                linear,
                &image
            )
            .unwrap_err(),
            ImageError::IllegalFilter {
                channel_type: ChannelType::UnsignedInt32
            }
        );
        let repeat = sampler(
            AddressingMode::Repeat,
            FilterMode::Nearest,
            CoordNormalization::Unnormalized,
        );
        assert!(ImageSamplingEmulator::try_new(
            geometry,
            ChannelOrder::R,
            ChannelType::Float,
            repeat,
            &image
        )
        .is_err());
    }

    #[test]
    #[should_panic(expected = "illegal image configuration")]
    fn test_new_panics_on_illegal_format() {
        let image = ramp(4);
        ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::Depth,
            ChannelType::Float,
            SamplerDescriptor::default(),
            &image,
        );
    }

    #[test]
    fn test_dyn_store() {
        let image = ramp(4);
        let store: &dyn TexelStore = &image;
        let emu = ImageSamplingEmulator::new(
            *image.geometry(),
            ChannelOrder::R,
            ChannelType::Float,
            SamplerDescriptor::default(),
            store,
        );
        assert_eq!(red(emu.load(&[2])), 2.0);
    }
}
