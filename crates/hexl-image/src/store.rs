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

//! Backing storage of image texels.

use crate::format::{texel_size, ChannelOrder, ChannelType};
use hexl_core::{ImageGeometry, Value};

/// Read access to the raw texels of an image.
///
/// Coordinates follow the image's coordinate axes: the array layer of a
/// 1DA image is `y`, the one of a 2DA image is `z`.
pub trait TexelStore {
    /// The raw bytes of the texel at `(x, y, z)`, exactly one texel long.
    fn texel_bytes(&self, x: u32, y: u32, z: u32) -> &[u8];
}

/// An owned, linearly laid out image: rows of texels, slices of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearImage {
    geometry: ImageGeometry,
    texel_size: usize,
    row_pitch: usize,
    slice_pitch: usize,
    data: Vec<u8>,
}

impl LinearImage {
    /// Creates a zero-filled image with tightly packed rows and slices.
    pub fn new(geometry: ImageGeometry, order: ChannelOrder, ty: ChannelType) -> Self {
        let texel = texel_size(order, ty);
        let row_pitch = texel * geometry.extent(0) as usize;
        let slice_pitch = row_pitch * geometry.extent(1) as usize;
        Self::with_pitch(geometry, order, ty, row_pitch, slice_pitch)
    }

    /// Creates a zero-filled image with explicit pitches.
    ///
    /// # Panics
    /// Panics if a row does not fit in `row_pitch` or a slice in `slice_pitch`.
    pub fn with_pitch(
        geometry: ImageGeometry,
        order: ChannelOrder,
        ty: ChannelType,
        row_pitch: usize,
        slice_pitch: usize,
    ) -> Self {
        let texel = texel_size(order, ty);
        let [width, height, depth] = geometry.extents().map(|e| e as usize);
        assert!(
            row_pitch >= texel * width,
            "row pitch {row_pitch} cannot hold {width} texels of {texel} bytes"
        );
        assert!(
            slice_pitch >= row_pitch * height,
            "slice pitch {slice_pitch} cannot hold {height} rows of {row_pitch} bytes"
        );
        Self {
            geometry,
            texel_size: texel,
            row_pitch,
            slice_pitch,
            data: vec![0; slice_pitch * depth],
        }
    }

    /// The image geometry.
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    /// The size of one texel in bytes.
    pub fn texel_size(&self) -> usize {
        self.texel_size
    }

    /// Bytes between the starts of consecutive rows.
    pub fn row_pitch(&self) -> usize {
        self.row_pitch
    }

    /// Bytes between the starts of consecutive slices (or array layers).
    pub fn slice_pitch(&self) -> usize {
        self.slice_pitch
    }

    /// The whole backing buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The whole backing buffer, mutably.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn offset(&self, x: u32, y: u32, z: u32) -> usize {
        let [w, h, d] = self.geometry.extents();
        assert!(
            x < w && y < h && z < d,
            "texel ({x}, {y}, {z}) outside {}",
            self.geometry
        );
        z as usize * self.slice_pitch + y as usize * self.row_pitch + x as usize * self.texel_size
    }

    /// Stores the low `texel_size` bytes of `texel` at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of range or `texel` is narrower
    /// than a texel.
    pub fn store_texel(&mut self, x: u32, y: u32, z: u32, texel: Value) {
        assert!(
            texel.size() >= self.texel_size,
            "a {} value cannot hold a {}-byte texel",
            texel.value_type(),
            self.texel_size
        );
        let mut buf = [0u8; 16];
        texel.write_to(&mut buf);
        let at = self.offset(x, y, z);
        self.data[at..at + self.texel_size].copy_from_slice(&buf[..self.texel_size]);
    }

    /// Fills every texel with `texel`.
    pub fn fill(&mut self, texel: Value) {
        let [w, h, d] = self.geometry.extents();
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    self.store_texel(x, y, z, texel);
                }
            }
        }
    }
}

impl TexelStore for LinearImage {
    fn texel_bytes(&self, x: u32, y: u32, z: u32) -> &[u8] {
        let at = self.offset(x, y, z);
        &self.data[at..at + self.texel_size]
    }
}
