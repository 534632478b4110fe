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

//! Whole-buffer conversions between raw bytes and values.

use super::{Value, ValueType};

/// Splits `bytes` into consecutive values of type `ty`.
///
/// # Panics
/// Panics if the length of `bytes` is not a multiple of `ty.size()`.
pub fn read_values(bytes: &[u8], ty: ValueType) -> Vec<Value> {
    let size = ty.size();
    assert!(
        bytes.len() % size == 0,
        "a buffer of {} bytes does not hold whole {ty} values",
        bytes.len()
    );
    bytes
        .chunks_exact(size)
        .map(|chunk| Value::read_from(chunk, ty))
        .collect()
}

/// Concatenates the raw bytes of `values`.
pub fn write_values(values: &[Value]) -> Vec<u8> {
    let total = values.iter().map(Value::size).sum();
    let mut bytes = vec![0u8; total];
    let mut offset = 0;
    for value in values {
        value.write_to(&mut bytes[offset..]);
        offset += value.size();
    }
    bytes
}
