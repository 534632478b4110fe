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

//! The closed model of typed values exchanged with a device under test.
//!
//! A [`Value`] is a small `Copy` tagged union over every scalar and packed
//! numeric kind a kernel can read or write. Packed kinds keep all lanes in one
//! backing word, lane 0 in the least significant bits. Loads and stores are
//! raw little-endian reinterpretations: no conversion, no rounding, and a
//! load followed by a store reproduces the original bytes exactly.

pub mod buffer;
pub mod data;
pub mod format;
pub mod types;

pub use self::buffer::{read_values, write_values};
pub use self::data::Value;
pub use self::format::{F16_PRINT_DIGITS, F32_PRINT_DIGITS, F64_PRINT_DIGITS};
pub use self::types::ValueType;
