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

//! Conversion between raw texel bytes and colors.
//!
//! Decoding follows the channel type first (normalized integers become
//! floats, clamped integers stay integers, halves widen) and then the
//! channel order, which decides the memory position of each RGBA channel
//! and synthesizes the channels a texel does not store. Encoding is the
//! inverse, with saturation and round-to-nearest-even quantization.

use crate::color::{Rgba, TexelColor};
use crate::format::{texel_size, ChannelOrder, ChannelType, TexelKind};
use hexl_core::{Value, ValueType, F16};

const UNORM24_MAX: u32 = 0x00ff_ffff;

fn read_le(bytes: &[u8], len: usize) -> u32 {
    let mut word = [0u8; 4];
    word[..len].copy_from_slice(&bytes[..len]);
    u32::from_le_bytes(word)
}

/// Bit offsets and maxima of the red, green and blue fields of a packed type.
fn packed_fields(ty: ChannelType) -> [(u32, u32); 3] {
    match ty {
        ChannelType::UnormShort555 => [(10, 31), (5, 31), (0, 31)],
        ChannelType::UnormShort565 => [(11, 31), (5, 63), (0, 31)],
        ChannelType::UnormInt101010 => [(20, 1023), (10, 1023), (0, 1023)],
        other => unreachable!("{other} is not a packed channel type"),
    }
}

fn decode_float(ty: ChannelType, raw: &[u8]) -> f32 {
    let word = read_le(raw, ty.size());
    match ty {
        ChannelType::SnormInt8 => (f32::from(word as u8 as i8) / 127.0).max(-1.0),
        ChannelType::SnormInt16 => (f32::from(word as u16 as i16) / 32767.0).max(-1.0),
        ChannelType::UnormInt8 => word as f32 / 255.0,
        ChannelType::UnormInt16 => word as f32 / 65535.0,
        ChannelType::UnormInt24 => (word & UNORM24_MAX) as f32 / UNORM24_MAX as f32,
        ChannelType::HalfFloat => F16::from_bits(word as u16).to_f32(),
        ChannelType::Float => f32::from_bits(word),
        other => unreachable!("{other} does not decode to a float channel"),
    }
}

/// An integer channel, sign- or zero-extended to 32 bits.
fn decode_int(ty: ChannelType, raw: &[u8]) -> u32 {
    let word = read_le(raw, ty.size());
    match ty {
        ChannelType::SignedInt8 => word as u8 as i8 as i32 as u32,
        ChannelType::SignedInt16 => word as u16 as i16 as i32 as u32,
        _ => word,
    }
}

/// Decodes one texel of the given format.
///
/// Depth formats return the depth in the red channel.
///
/// # Panics
/// Panics if `bytes` is shorter than a texel.
pub fn decode_texel(order: ChannelOrder, ty: ChannelType, bytes: &[u8]) -> TexelColor {
    let size = texel_size(order, ty);
    assert!(
        bytes.len() >= size,
        "{} bytes are too few for a {order}/{ty} texel",
        bytes.len()
    );

    if order == ChannelOrder::DepthStencil {
        let depth = match ty {
            ChannelType::Float => decode_float(ty, bytes),
            _ => decode_float(ChannelType::UnormInt24, bytes),
        };
        return TexelColor::Float(Rgba::new(depth, 0.0, 0.0, 1.0));
    }

    if ty.is_packed() {
        let word = read_le(bytes, ty.size());
        let [r, g, b] = packed_fields(ty).map(|(shift, max)| ((word >> shift) & max) as f32 / max as f32);
        return TexelColor::Float(Rgba::new(r, g, b, 1.0));
    }

    let width = ty.size();
    let stored = |channel: usize| {
        order
            .slots()
            .iter()
            .position(|slot| *slot == Some(channel))
            .map(|i| &bytes[i * width..(i + 1) * width])
    };
    // Replicating orders store a single channel and read it back everywhere.
    let source = |channel: usize| match order {
        ChannelOrder::Intensity => stored(0),
        ChannelOrder::Luminance if channel < 3 => stored(0),
        _ => stored(channel),
    };

    match ty.kind() {
        TexelKind::Float => {
            let channel = |c: usize, missing: f32| source(c).map_or(missing, |raw| decode_float(ty, raw));
            let color = Rgba::new(channel(0, 0.0), channel(1, 0.0), channel(2, 0.0), channel(3, 1.0));
            if order.is_srgb() {
                TexelColor::Float(color.srgb_to_linear())
            } else {
                TexelColor::Float(color)
            }
        }
        TexelKind::Signed => TexelColor::Signed(std::array::from_fn(|c| {
            source(c).map_or(i32::from(c == 3), |raw| decode_int(ty, raw) as i32)
        })),
        TexelKind::Unsigned => TexelColor::Unsigned(std::array::from_fn(|c| {
            source(c).map_or(u32::from(c == 3), |raw| decode_int(ty, raw))
        })),
    }
}

fn quantize_unorm(v: f32, max: u32) -> u32 {
    if v.is_nan() {
        return 0;
    }
    (f64::from(v.clamp(0.0, 1.0)) * f64::from(max)).round_ties_even() as u32
}

fn quantize_snorm(v: f32, max: i32) -> u32 {
    if v.is_nan() {
        return 0;
    }
    ((f64::from(v.clamp(-1.0, 1.0)) * f64::from(max)).round_ties_even() as i32) as u32
}

fn encode_float(ty: ChannelType, v: f32) -> u32 {
    match ty {
        ChannelType::SnormInt8 => quantize_snorm(v, 127),
        ChannelType::SnormInt16 => quantize_snorm(v, 32767),
        ChannelType::UnormInt8 => quantize_unorm(v, 255),
        ChannelType::UnormInt16 => quantize_unorm(v, 65535),
        ChannelType::UnormInt24 => quantize_unorm(v, UNORM24_MAX),
        ChannelType::HalfFloat => u32::from(F16::from_f32(v).to_bits()),
        ChannelType::Float => v.to_bits(),
        other => unreachable!("{other} does not encode a float channel"),
    }
}

fn encode_signed(ty: ChannelType, v: i32) -> u32 {
    let saturated = match ty {
        ChannelType::SignedInt8 => v.clamp(i8::MIN.into(), i8::MAX.into()),
        ChannelType::SignedInt16 => v.clamp(i16::MIN.into(), i16::MAX.into()),
        _ => v,
    };
    saturated as u32
}

fn encode_unsigned(ty: ChannelType, v: u32) -> u32 {
    match ty {
        ChannelType::UnsignedInt8 => v.min(u8::MAX.into()),
        ChannelType::UnsignedInt16 => v.min(u16::MAX.into()),
        _ => v,
    }
}

fn put(buf: &mut [u8], at: usize, len: usize, bits: u32) {
    buf[at..at + len].copy_from_slice(&bits.to_le_bytes()[..len]);
}

/// Encodes `color` as a texel of the given format.
///
/// The result is the smallest value container (`u8`, `u16`, `u32`, `u64` or
/// `u128`) holding the texel; bytes past the texel size are zero.
///
/// # Panics
/// Panics if the color kind does not match the channel type.
pub fn encode_texel(order: ChannelOrder, ty: ChannelType, color: &TexelColor) -> Value {
    assert_eq!(
        color.kind(),
        ty.kind(),
        "cannot store a {:?} color in a {ty} texel",
        color.kind()
    );
    let size = texel_size(order, ty);
    let mut buf = [0u8; 16];

    match color {
        TexelColor::Float(c) if order == ChannelOrder::DepthStencil => {
            // The stencil byte is left zero.
            let depth = match ty {
                ChannelType::Float => c.r.to_bits(),
                _ => quantize_unorm(c.r, UNORM24_MAX),
            };
            put(&mut buf, 0, 4, depth);
        }
        TexelColor::Float(c) if ty.is_packed() => {
            let word = packed_fields(ty)
                .iter()
                .zip([c.r, c.g, c.b])
                .fold(0u32, |acc, ((shift, max), v)| acc | quantize_unorm(v, *max) << shift);
            put(&mut buf, 0, ty.size(), word);
        }
        TexelColor::Float(c) => {
            let c = if order.is_srgb() { c.linear_to_srgb() } else { *c };
            let channels = c.to_array();
            for (i, slot) in order.slots().iter().enumerate() {
                if let Some(ch) = slot {
                    put(&mut buf, i * ty.size(), ty.size(), encode_float(ty, channels[*ch]));
                }
            }
        }
        TexelColor::Signed(channels) => {
            for (i, slot) in order.slots().iter().enumerate() {
                if let Some(ch) = slot {
                    put(&mut buf, i * ty.size(), ty.size(), encode_signed(ty, channels[*ch]));
                }
            }
        }
        TexelColor::Unsigned(channels) => {
            for (i, slot) in order.slots().iter().enumerate() {
                if let Some(ch) = slot {
                    put(&mut buf, i * ty.size(), ty.size(), encode_unsigned(ty, channels[*ch]));
                }
            }
        }
    }
    texel_value(&buf[..size])
}

/// Wraps raw texel bytes in the smallest value container that holds them.
///
/// # Panics
/// Panics if `bytes` is empty or longer than 16 bytes.
pub fn texel_value(bytes: &[u8]) -> Value {
    let ty = match bytes.len() {
        1 => ValueType::U8,
        2 => ValueType::U16,
        3 | 4 => ValueType::U32,
        5..=8 => ValueType::U64,
        9..=16 => ValueType::U128,
        n => panic!("a {n}-byte texel does not fit a value"),
    };
    let mut buf = [0u8; 16];
    buf[..bytes.len()].copy_from_slice(bytes);
    Value::read_from(&buf, ty)
}
