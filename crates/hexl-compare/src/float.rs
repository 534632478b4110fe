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

//! The per-width floating-point comparator.

use crate::method::ComparisonMethod;
use hexl_core::math::srgb_to_linear_f64;
use hexl_core::IeeeFloat;

/// The resolved parameters of a float comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FloatRule {
    pub method: ComparisonMethod,
    pub precision: f64,
    pub flush_denorms: bool,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
}

fn method_error<T: IeeeFloat>(method: ComparisonMethod, expected: T, actual: T) -> f64 {
    if expected.raw_bits() == actual.raw_bits() {
        return 0.0;
    }
    let (e, a) = (expected.to_f64(), actual.to_f64());
    match method {
        ComparisonMethod::Decimal => (e - a).abs(),
        ComparisonMethod::Ulps => hexl_core::math::abs_diff_ulps(expected, actual) as f64,
        ComparisonMethod::Relative if expected.is_zero() => 2.0 * a.abs(),
        ComparisonMethod::Relative => ((e - a) / e).abs(),
        ComparisonMethod::Image => {
            let diff = (srgb_to_linear_f64(e) - srgb_to_linear_f64(a)).abs();
            // Both curves overflowed to infinity.
            if diff.is_nan() {
                f64::INFINITY
            } else {
                diff
            }
        }
    }
}

/// Compares one float lane, returning the verdict and the error.
///
/// NaN and infinity mismatches report an infinite error. A result outside
/// the configured limits fails with its ordinary method error.
pub(crate) fn compare_float<T: IeeeFloat>(expected: T, actual: T, rule: &FloatRule) -> (bool, f64) {
    if expected.is_nan() || actual.is_nan() {
        let signs_agree = expected.sign_bit() == actual.sign_bit();
        let pass = expected.is_nan()
            && actual.is_nan()
            && (rule.method != ComparisonMethod::Decimal || signs_agree);
        return (pass, if pass { 0.0 } else { f64::INFINITY });
    }
    if expected.is_inf() || actual.is_inf() {
        let pass = expected.raw_bits() == actual.raw_bits();
        return (pass, if pass { 0.0 } else { f64::INFINITY });
    }

    let mut error = method_error(rule.method, expected, actual);
    if rule.flush_denorms {
        let flushed = method_error(rule.method, expected.flush_subnormal(), actual.flush_subnormal());
        error = error.min(flushed);
    }

    let value = actual.to_f64();
    let in_range = rule.min_limit.map_or(true, |min| value >= min)
        && rule.max_limit.map_or(true, |max| value <= max);
    let within = match rule.method {
        ComparisonMethod::Image => error < rule.precision,
        _ => error <= rule.precision,
    };
    (in_range && within, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hexl_core::F16;

    fn rule(method: ComparisonMethod, precision: f64) -> FloatRule {
        FloatRule {
            method,
            precision,
            flush_denorms: false,
            min_limit: None,
            max_limit: None,
        }
    }

    #[test]
    fn test_decimal() {
        let r = rule(ComparisonMethod::Decimal, 0.01);
        assert!(compare_float(1.0f32, 1.005, &r).0);
        assert!(!compare_float(1.0f32, 1.02, &r).0);
        let (_, err) = compare_float(2.0f64, 2.5, &r);
        assert_relative_eq!(err, 0.5);
    }

    #[test]
    fn test_ulps_boundary() {
        let one = 1.0f32;
        let next = f32::from_bits(one.to_bits() + 1);
        let r = rule(ComparisonMethod::Ulps, 1.0);
        assert_eq!(compare_float(one, next, &r), (true, 1.0));
        let two = f32::from_bits(one.to_bits() + 2);
        assert_eq!(compare_float(one, two, &r), (false, 2.0));
    }

    #[test]
    fn test_relative() {
        let r = rule(ComparisonMethod::Relative, 0.01);
        assert!(compare_float(100.0f64, 100.9, &r).0);
        assert!(!compare_float(100.0f64, 102.0, &r).0);
        assert_eq!(compare_float(0.0f64, 0.0, &r), (true, 0.0));
        let (pass, err) = compare_float(0.0f64, 0.25, &r);
        assert!(!pass);
        assert_relative_eq!(err, 0.5);
    }

    #[test]
    fn test_image_is_strict() {
        let r = rule(ComparisonMethod::Image, 0.0);
        assert_eq!(compare_float(0.5f32, 0.5, &r), (false, 0.0));
        let r = rule(ComparisonMethod::Image, 1e-3);
        assert!(compare_float(0.5f32, 0.5, &r).0);
        assert!(!compare_float(0.0f32, 1.0, &r).0);
    }

    #[test]
    fn test_image_accepts_large_identical_values() {
        let r = rule(ComparisonMethod::Image, 1e-6);
        assert_eq!(compare_float(1e20f32, 1e20, &r), (true, 0.0));
        assert_eq!(compare_float(3e38f32, 3e38, &r), (true, 0.0));
        assert_eq!(compare_float(1e300f64, 1e300, &r), (true, 0.0));
        assert_eq!(compare_float(1e300f64, 2e300, &r), (false, f64::INFINITY));
        let (pass, err) = compare_float(1e20f32, 2e20, &r);
        assert!(!pass);
        assert!(err > 0.0 && err.is_finite());
    }

    #[test]
    fn test_nan_sign_matters_only_for_decimal() {
        let pos = f32::from_bits(0x7fc0_0000);
        let neg = f32::from_bits(0xffc0_0000);
        assert_eq!(
            compare_float(pos, neg, &rule(ComparisonMethod::Decimal, 1.0)),
            (false, f64::INFINITY)
        );
        assert!(compare_float(pos, neg, &rule(ComparisonMethod::Ulps, 1.0)).0);
        assert!(compare_float(pos, pos, &rule(ComparisonMethod::Decimal, 0.0)).0);
        assert!(!compare_float(pos, 1.0, &rule(ComparisonMethod::Ulps, 1e9)).0);
    }

    #[test]
    fn test_infinities_need_identical_bits() {
        let r = rule(ComparisonMethod::Decimal, f64::MAX);
        assert!(compare_float(f64::INFINITY, f64::INFINITY, &r).0);
        assert_eq!(
            compare_float(f64::INFINITY, f64::NEG_INFINITY, &r),
            (false, f64::INFINITY)
        );
        assert!(!compare_float(f64::MAX, f64::INFINITY, &r).0);
    }

    #[test]
    fn test_limits_override_method() {
        let mut r = rule(ComparisonMethod::Decimal, 10.0);
        r.min_limit = Some(0.0);
        r.max_limit = Some(1.0);
        assert!(compare_float(0.5f32, 0.75, &r).0);
        assert!(!compare_float(0.5f32, -0.25, &r).0);
        assert!(!compare_float(0.5f32, 1.5, &r).0);
    }

    #[test]
    fn test_flush_denorms_takes_smaller_error() {
        let sub = F16::MIN_POSITIVE_SUBNORMAL;
        let mut r = rule(ComparisonMethod::Ulps, 0.0);
        assert_eq!(compare_float(F16::ZERO, sub, &r), (false, 1.0));
        r.flush_denorms = true;
        assert_eq!(compare_float(F16::ZERO, sub, &r), (true, 0.0));
    }
}
