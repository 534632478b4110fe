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

//! Extents of 1D, 2D and 3D images, optionally layered into arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The size of an image in texels, plus its number of array layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDim {
    /// The width in texels.
    pub width: u32,
    /// The height in texels (1 for 1D images).
    pub height: u32,
    /// The depth in texels (1 unless the image is 3D).
    pub depth: u32,
    /// The number of array layers (1 unless the image is an array).
    pub array_size: u32,
}

impl ImageDim {
    /// Creates a new `ImageDim`.
    pub const fn new(width: u32, height: u32, depth: u32, array_size: u32) -> Self {
        Self {
            width,
            height,
            depth,
            array_size,
        }
    }

    /// The total number of texels over all layers.
    pub fn size(&self) -> u64 {
        u64::from(self.width)
            * u64::from(self.height)
            * u64::from(self.depth)
            * u64::from(self.array_size)
    }
}

/// The shape of an image as seen by image instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageGeometryKind {
    /// A one-dimensional image.
    D1,
    /// A two-dimensional image.
    D2,
    /// A three-dimensional image.
    D3,
    /// An array of one-dimensional images.
    D1Array,
    /// An array of two-dimensional images.
    D2Array,
    /// A one-dimensional image backed by a buffer.
    D1Buffer,
    /// A two-dimensional depth image.
    D2Depth,
    /// An array of two-dimensional depth images.
    D2ArrayDepth,
}

impl ImageGeometryKind {
    /// The number of coordinates an access to this kind of image takes.
    pub fn coord_count(self) -> usize {
        match self {
            Self::D1 | Self::D1Buffer => 1,
            Self::D2 | Self::D1Array | Self::D2Depth => 2,
            Self::D3 | Self::D2Array | Self::D2ArrayDepth => 3,
        }
    }

    /// The coordinate axis holding the array layer index, if any.
    pub fn array_axis(self) -> Option<usize> {
        match self {
            Self::D1Array => Some(1),
            Self::D2Array | Self::D2ArrayDepth => Some(2),
            _ => None,
        }
    }

    /// Whether this kind only holds depth (or depth/stencil) data.
    pub fn is_depth(self) -> bool {
        matches!(self, Self::D2Depth | Self::D2ArrayDepth)
    }

    /// The short name used in diagnostics (`"1d"`, `"2da"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::D1 => "1d",
            Self::D2 => "2d",
            Self::D3 => "3d",
            Self::D1Array => "1da",
            Self::D2Array => "2da",
            Self::D1Buffer => "1db",
            Self::D2Depth => "2ddepth",
            Self::D2ArrayDepth => "2dadepth",
        }
    }
}

impl fmt::Display for ImageGeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An image extent together with the kind of image it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageGeometry {
    kind: ImageGeometryKind,
    size: ImageDim,
}

impl ImageGeometry {
    /// Creates a new image geometry.
    ///
    /// # Panics
    /// Panics if any extent is zero or if an extent the kind does not use is
    /// not 1.
    pub fn new(kind: ImageGeometryKind, size: ImageDim) -> Self {
        assert!(
            size.width > 0 && size.height > 0 && size.depth > 0 && size.array_size > 0,
            "image extent {size:?} has a zero component"
        );
        let (uses_height, uses_depth, uses_layers) = match kind {
            ImageGeometryKind::D1 | ImageGeometryKind::D1Buffer => (false, false, false),
            ImageGeometryKind::D2 | ImageGeometryKind::D2Depth => (true, false, false),
            ImageGeometryKind::D3 => (true, true, false),
            ImageGeometryKind::D1Array => (false, false, true),
            ImageGeometryKind::D2Array | ImageGeometryKind::D2ArrayDepth => (true, false, true),
        };
        assert!(
            (uses_height || size.height == 1)
                && (uses_depth || size.depth == 1)
                && (uses_layers || size.array_size == 1),
            "image extent {size:?} does not match a {} image",
            kind.name()
        );
        Self { kind, size }
    }

    /// The kind of image.
    #[inline]
    pub fn kind(&self) -> ImageGeometryKind {
        self.kind
    }

    /// The raw extent.
    #[inline]
    pub fn image_dim(&self) -> ImageDim {
        self.size
    }

    /// The width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// The height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// The depth in texels.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.size.depth
    }

    /// The number of array layers.
    #[inline]
    pub fn array_size(&self) -> u32 {
        self.size.array_size
    }

    /// The total number of texels over all layers.
    #[inline]
    pub fn image_size(&self) -> u64 {
        self.size.size()
    }

    /// The number of coordinates an access takes.
    #[inline]
    pub fn coord_count(&self) -> usize {
        self.kind.coord_count()
    }

    /// The coordinate axis holding the array layer, if any.
    #[inline]
    pub fn array_axis(&self) -> Option<usize> {
        self.kind.array_axis()
    }

    /// Whether the image is layered.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.kind.array_axis().is_some()
    }

    /// Whether the image holds depth data.
    #[inline]
    pub fn is_depth(&self) -> bool {
        self.kind.is_depth()
    }

    /// The extent along coordinate `axis`.
    ///
    /// The array axis reports the number of layers; axes the kind does not
    /// use report 1.
    ///
    /// # Panics
    /// Panics if `axis >= 3`.
    pub fn extent(&self, axis: usize) -> u32 {
        assert!(axis < 3, "image axis {axis} out of range (expected 0..3)");
        if axis >= self.coord_count() {
            return 1;
        }
        if self.array_axis() == Some(axis) {
            return self.size.array_size;
        }
        match axis {
            0 => self.size.width,
            1 => self.size.height,
            _ => self.size.depth,
        }
    }

    /// The extents along all three coordinate axes.
    pub fn extents(&self) -> [u32; 3] {
        [self.extent(0), self.extent(1), self.extent(2)]
    }
}

impl fmt::Display for ImageGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{}x{}",
            self.kind.name(),
            self.size.width,
            self.size.height,
            self.size.depth
        )?;
        if self.is_array() {
            write!(f, "[{}]", self.size.array_size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_follow_kind() {
        let a1 = ImageGeometry::new(ImageGeometryKind::D1Array, ImageDim::new(16, 1, 1, 4));
        assert_eq!(a1.coord_count(), 2);
        assert_eq!(a1.array_axis(), Some(1));
        assert_eq!(a1.extents(), [16, 4, 1]);

        let a2 = ImageGeometry::new(ImageGeometryKind::D2Array, ImageDim::new(8, 6, 1, 3));
        assert_eq!(a2.extents(), [8, 6, 3]);
        assert_eq!(a2.image_size(), 144);

        let v = ImageGeometry::new(ImageGeometryKind::D3, ImageDim::new(4, 5, 6, 1));
        assert_eq!(v.extents(), [4, 5, 6]);
        assert!(!v.is_array());
    }

    #[test]
    fn test_depth_kinds() {
        let d = ImageGeometry::new(ImageGeometryKind::D2Depth, ImageDim::new(4, 4, 1, 1));
        assert!(d.is_depth());
        assert!(!ImageGeometryKind::D2.is_depth());
    }

    #[test]
    #[should_panic]
    fn test_unused_extent_must_be_one() {
        let _ = ImageGeometry::new(ImageGeometryKind::D2, ImageDim::new(4, 4, 2, 1));
    }

    #[test]
    #[should_panic]
    fn test_zero_extent_panics() {
        let _ = ImageGeometry::new(ImageGeometryKind::D1, ImageDim::new(0, 1, 1, 1));
    }

    #[test]
    fn test_display() {
        let g = ImageGeometry::new(ImageGeometryKind::D2Array, ImageDim::new(8, 6, 1, 3));
        assert_eq!(g.to_string(), "2da 8x6x1[3]");
    }
}
