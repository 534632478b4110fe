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

//! Resolution of unnormalized coordinates to texel indices.

use crate::sampler::AddressingMode;

/// Resolves the unnormalized coordinate `coord` on an axis of `size` texels.
///
/// The result is in `[0, size - 1]`, except that [`AddressingMode::ClampToBorder`]
/// returns `size` for coordinates outside the image, meaning "border color".
pub fn address(mode: AddressingMode, coord: f32, size: u32) -> u32 {
    debug_assert!(size > 0);
    let last = (size - 1) as f32;
    let n = size as f32;
    let index = match mode {
        AddressingMode::Undefined | AddressingMode::ClampToEdge => coord.floor().clamp(0.0, last),
        AddressingMode::ClampToBorder => {
            if coord < 0.0 || coord >= n || coord.is_nan() {
                return size;
            }
            coord.floor().clamp(0.0, last)
        }
        AddressingMode::Repeat => (coord - n * (coord / n).floor()).floor().clamp(0.0, last),
        AddressingMode::MirroredRepeat => {
            let tile = (coord / n).floor();
            let folded = (coord - n * tile).floor().clamp(0.0, last);
            if tile.rem_euclid(2.0) == 1.0 {
                last - folded
            } else {
                folded
            }
        }
    };
    // NaN coordinates resolve to texel 0.
    if index.is_nan() {
        0
    } else {
        index as u32
    }
}

/// Resolves an array layer coordinate: rounded to nearest, then clamped.
pub fn layer_index(coord: f32, layers: u32) -> u32 {
    let last = (layers.max(1) - 1) as f32;
    let layer = (coord + 0.5).floor().clamp(0.0, last);
    if layer.is_nan() {
        0
    } else {
        layer as u32
    }
}
