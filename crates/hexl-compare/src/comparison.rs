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

//! The stateful comparison engine.
//!
//! A [`Comparison`] is created once per output buffer, reset to the buffer's
//! element type, and then fed `(expected, actual)` pairs in element order.
//! It records how many checks ran, how many failed, and which failure was the
//! worst, so that a harness can report one line per buffer.

use crate::config::ComparisonConfig;
use crate::deviation::Deviation;
use crate::float::{compare_float, FloatRule};
use crate::method::ComparisonMethod;
use crate::report::ComparisonSummary;
use hexl_core::{Value, ValueType, F16};

/// The outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// The actual value is acceptable.
    Pass(Deviation),
    /// The actual value is not acceptable.
    Fail(Deviation),
}

impl Verdict {
    /// Whether the check passed.
    #[inline]
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    /// The measured deviation, whatever the outcome.
    #[inline]
    pub fn deviation(&self) -> &Deviation {
        match self {
            Self::Pass(d) | Self::Fail(d) => d,
        }
    }
}

/// A single recorded check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Check {
    /// The reference value.
    pub expected: Value,
    /// The value produced by the implementation under test.
    pub actual: Value,
    /// The outcome.
    pub verdict: Verdict,
}

/// Accumulates verdicts for a stream of values of one type.
#[derive(Debug, Clone)]
pub struct Comparison {
    config: ComparisonConfig,
    precision: Option<f64>,
    value_type: Option<ValueType>,
    checks: u64,
    failed: u64,
    max_error: Option<Deviation>,
    max_error_index: u64,
    last: Option<Check>,
}

impl Default for Comparison {
    fn default() -> Self {
        Self::new(ComparisonConfig::default())
    }
}

impl Comparison {
    /// Creates an unconfigured comparison. The value type is fixed by
    /// [`reset`](Self::reset) or by the first [`compare`](Self::compare).
    pub fn new(config: ComparisonConfig) -> Self {
        Self {
            config,
            precision: None,
            value_type: None,
            checks: 0,
            failed: 0,
            max_error: None,
            max_error_index: 0,
            last: None,
        }
    }

    /// Clears all statistics and configures the comparison for `ty`.
    ///
    /// An explicitly configured precision is kept; otherwise the default for
    /// the method and type is selected.
    pub fn reset(&mut self, ty: ValueType) {
        self.value_type = Some(ty);
        self.checks = 0;
        self.failed = 0;
        self.max_error = None;
        self.max_error_index = 0;
        self.last = None;
        match self.config.precision {
            Some(p) if ty.is_float() => self.precision = Some(p),
            _ => self.set_default_precision(),
        }
    }

    /// Replaces the precision with the default for the method and the
    /// current type. Integer types have no precision.
    ///
    /// # Panics
    /// Panics if no type has been set.
    pub fn set_default_precision(&mut self) {
        let ty = self
            .value_type
            .unwrap_or_else(|| panic!("comparison has no value type; call reset first"));
        self.precision = self.config.method.default_precision(ty);
    }

    /// Judges `actual` against `expected` and records the outcome.
    ///
    /// # Panics
    /// Panics if the two values have different types, or if their type differs
    /// from the one the comparison was reset to.
    pub fn compare(&mut self, expected: Value, actual: Value) -> Verdict {
        let ty = expected.value_type();
        assert_eq!(
            ty,
            actual.value_type(),
            "cannot compare a {ty} with a {}",
            actual.value_type()
        );
        match self.value_type {
            None => {
                log::trace!("Comparison configured implicitly for {ty}.");
                self.reset(ty);
            }
            Some(configured) => assert_eq!(
                configured, ty,
                "comparison configured for {configured} was given a {ty}"
            ),
        }

        let verdict = if ty.is_float() {
            self.compare_floats(expected, actual)
        } else {
            compare_exact(expected, actual)
        };

        let index = self.checks;
        self.checks += 1;
        if let Verdict::Fail(deviation) = verdict {
            self.failed += 1;
            // The running maximum starts at zero, so a failure with no
            // measurable error (a limit violation) is never recorded.
            let max = self.max_error.map_or(0.0, |max| max.magnitude());
            if deviation.magnitude() > max {
                self.max_error = Some(deviation);
                self.max_error_index = index;
            }
            log::debug!(
                "Check {index} failed: expected {expected:#}, actual {actual:#}, error {deviation}."
            );
        }
        self.last = Some(Check {
            expected,
            actual,
            verdict,
        });
        verdict
    }

    fn compare_floats(&self, expected: Value, actual: Value) -> Verdict {
        let rule = FloatRule {
            method: self.config.method,
            precision: self.precision.unwrap_or(0.0),
            flush_denorms: self.config.flush_denorms,
            min_limit: self.config.min_limit,
            max_limit: self.config.max_limit,
        };
        let mut results = [(true, 0.0); 4];
        let count = expected.value_type().lane_count();
        for (i, (e, a)) in expected.lanes().zip(actual.lanes()).enumerate() {
            results[i] = match (e, a) {
                (Value::F16(e), Value::F16(a)) => compare_float::<F16>(e, a, &rule),
                (Value::F32(e), Value::F32(a)) => compare_float::<f32>(e, a, &rule),
                (Value::F64(e), Value::F64(a)) => compare_float::<f64>(e, a, &rule),
                _ => unreachable!("float lanes are f16, f32 or f64"),
            };
        }
        let results = &results[..count];
        let pass = results.iter().all(|(ok, _)| *ok);
        let deviation = if count == 1 {
            Deviation::Float(results[0].1)
        } else {
            let errors: Vec<f64> = results.iter().map(|(_, e)| *e).collect();
            Deviation::from_lanes(&errors)
        };
        if pass {
            Verdict::Pass(deviation)
        } else {
            Verdict::Fail(deviation)
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// The method used for float values.
    pub fn method(&self) -> ComparisonMethod {
        self.config.method
    }

    /// The resolved precision, `None` for exact types or before configuration.
    pub fn precision(&self) -> Option<f64> {
        self.precision
    }

    /// The configured value type.
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Number of checks since the last reset.
    pub fn checks(&self) -> u64 {
        self.checks
    }

    /// Number of failed checks since the last reset.
    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// The largest failing deviation, if a failing check had a nonzero error.
    pub fn max_error(&self) -> Option<Deviation> {
        self.max_error
    }

    /// The index of the check that produced [`max_error`](Self::max_error).
    pub fn max_error_index(&self) -> u64 {
        self.max_error_index
    }

    /// Whether any check failed.
    pub fn is_failed(&self) -> bool {
        self.failed > 0
    }

    /// The most recent check.
    pub fn last(&self) -> Option<&Check> {
        self.last.as_ref()
    }

    /// One line for the last check: the actual value and a pass/fail marker.
    pub fn short_report(&self) -> Option<String> {
        self.last.map(|check| {
            format!("{:#} {}", check.actual, marker(&check.verdict))
        })
    }

    /// One line for the last check, with the expected value and the error.
    pub fn long_report(&self) -> Option<String> {
        let method = match self.value_type {
            Some(ty) if ty.is_float() => self.config.method.name(),
            _ => "exact",
        };
        self.last.map(|check| {
            format!(
                "{:#} (expected {:#}, {method} error {}) {}",
                check.actual,
                check.expected,
                check.verdict.deviation(),
                marker(&check.verdict)
            )
        })
    }

    /// A snapshot of the statistics.
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            value_type: self.value_type,
            method: self.config.method,
            checks: self.checks,
            failed: self.failed,
            max_error: self.max_error,
            max_error_index: self.max_error_index,
        }
    }
}

fn marker(verdict: &Verdict) -> &'static str {
    if verdict.passed() {
        "[PASS]"
    } else {
        "[FAIL]"
    }
}

/// An integer lane widened without loss. `U128` is handled by the caller.
fn integer_lane(v: Value) -> i128 {
    match v {
        Value::U8(x) => x.into(),
        Value::S8(x) => x.into(),
        Value::U16(x) => x.into(),
        Value::S16(x) => x.into(),
        Value::U32(x) | Value::Ptr32(x) => x.into(),
        Value::S32(x) => x.into(),
        Value::U64(x) | Value::Ptr64(x) => x.into(),
        Value::S64(x) => x.into(),
        other => unreachable!("{} is not an integer lane", other.value_type()),
    }
}

fn lane_distance(expected: Value, actual: Value) -> u128 {
    match (expected, actual) {
        (Value::U128(e), Value::U128(a)) => e.abs_diff(a),
        (e, a) => integer_lane(e).abs_diff(integer_lane(a)),
    }
}

fn compare_exact(expected: Value, actual: Value) -> Verdict {
    let deviation_ty = expected.value_type().to_unsigned();
    let lane_ty = deviation_ty.lane_type();
    let lanes: Vec<Value> = expected
        .lanes()
        .zip(actual.lanes())
        .map(|(e, a)| Value::from_bits(lane_ty, lane_distance(e, a)))
        .collect();
    let deviation = Deviation::Exact(Value::from_lanes(deviation_ty, &lanes));
    if deviation.is_zero() {
        Verdict::Pass(deviation)
    } else {
        Verdict::Fail(deviation)
    }
}
