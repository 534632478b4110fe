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

//! Whole-buffer validation.

use anyhow::{ensure, Context, Result};
use hexl_compare::{Comparison, ComparisonConfig, ComparisonSummary};
use hexl_core::value::read_values;
use hexl_core::{Value, ValueType};
use hexl_image::{ImageSamplingEmulator, TexelColor, TexelStore};

/// Parses a comparison option string such as `"ulps=2, flushDenorms"`.
pub fn parse_config(options: &str) -> Result<ComparisonConfig> {
    options
        .parse()
        .with_context(|| format!("invalid comparison options '{options}'"))
}

/// Compares two equally long value sequences element by element.
///
/// # Panics
/// Panics if the sequences differ in length or hold values of different
/// types.
pub fn validate_values(
    expected: &[Value],
    actual: &[Value],
    config: ComparisonConfig,
) -> ComparisonSummary {
    assert_eq!(
        expected.len(),
        actual.len(),
        "expected and actual value counts differ"
    );
    let mut comparison = Comparison::new(config);
    if let Some(first) = expected.first() {
        comparison.reset(first.value_type());
    }
    for (e, a) in expected.iter().zip(actual) {
        comparison.compare(*e, *a);
    }
    let summary = comparison.summary();
    summary.log();
    summary
}

/// Compares two raw output buffers holding values of type `ty`.
pub fn validate_buffer(
    expected: &[u8],
    actual: &[u8],
    ty: ValueType,
    config: ComparisonConfig,
) -> Result<ComparisonSummary> {
    ensure!(
        expected.len() == actual.len(),
        "buffer sizes differ: expected {} bytes, got {}",
        expected.len(),
        actual.len()
    );
    ensure!(
        expected.len() % ty.size() == 0,
        "a {}-byte buffer does not hold whole {ty} values",
        expected.len()
    );
    let expected = read_values(expected, ty);
    let actual = read_values(actual, ty);
    let mut comparison = Comparison::new(config);
    comparison.reset(ty);
    for (e, a) in expected.iter().zip(&actual) {
        comparison.compare(*e, *a);
    }
    let summary = comparison.summary();
    summary.log();
    Ok(summary)
}

/// Compares the colors an image read returned against the emulator.
///
/// Each entry of `coords` holds the coordinates of one read; only the
/// first [`coord_count`](hexl_core::ImageGeometry::coord_count) are used.
/// Channels are compared as `f32`, `s32` or `u32` values.
pub fn validate_image_reads<S: TexelStore + ?Sized>(
    emulator: &ImageSamplingEmulator<'_, S>,
    coords: &[[f32; 3]],
    actual: &[TexelColor],
    config: ComparisonConfig,
) -> Result<ComparisonSummary> {
    ensure!(
        coords.len() == actual.len(),
        "{} reads were emulated but {} results were given",
        coords.len(),
        actual.len()
    );
    let count = emulator.geometry().coord_count();
    let mut comparison = Comparison::new(config);
    for (read, (c, got)) in coords.iter().zip(actual).enumerate() {
        let expected = emulator.read(&c[..count]);
        ensure!(
            expected.kind() == got.kind(),
            "image read returned a {:?} color, expected {:?}",
            got.kind(),
            expected.kind()
        );
        let mut matched = true;
        for (e, a) in expected.to_values().into_iter().zip(got.to_values()) {
            matched &= comparison.compare(e, a).passed();
        }
        if !matched {
            log::debug!(
                "Image read {read} at {:?}: expected {expected:?}, got {got:?}.",
                &c[..count]
            );
        }
    }
    let summary = comparison.summary();
    summary.log();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexl_compare::ComparisonMethod;

    #[test]
    fn test_parse_config_reports_context() {
        let err = parse_config("ulps=x").unwrap_err();
        assert_eq!(err.to_string(), "invalid comparison options 'ulps=x'");
        assert!(format!("{err:#}").contains("invalid number 'x'"));
        assert_eq!(
            parse_config("relf=0.5").unwrap().method,
            ComparisonMethod::Relative
        );
    }

    #[test]
    fn test_validate_values_empty() {
        let summary = validate_values(&[], &[], ComparisonConfig::default());
        assert_eq!(summary.checks, 0);
        assert!(summary.passed());
    }

    #[test]
    fn test_validate_buffer_rejects_ragged_input() {
        let config = ComparisonConfig::default();
        assert!(validate_buffer(&[0; 8], &[0; 4], ValueType::U32, config).is_err());
        assert!(validate_buffer(&[0; 6], &[0; 6], ValueType::U32, config).is_err());
        let summary = validate_buffer(&[0; 8], &[0; 8], ValueType::U32, config).unwrap();
        assert_eq!(summary.checks, 2);
    }
}
