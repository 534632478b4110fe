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

use crate::deviation::Deviation;
use crate::method::ComparisonMethod;
use hexl_core::ValueType;
use std::fmt;

/// Aggregate statistics of one [`Comparison`](crate::Comparison) pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSummary {
    /// The compared type, `None` if nothing was compared.
    pub value_type: Option<ValueType>,
    /// The method used for float values.
    pub method: ComparisonMethod,
    /// Number of checks.
    pub checks: u64,
    /// Number of failed checks.
    pub failed: u64,
    /// The largest nonzero failing deviation.
    pub max_error: Option<Deviation>,
    /// The index of the check that produced `max_error`.
    pub max_error_index: u64,
}

impl ComparisonSummary {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }

    /// The fraction of checks that failed (`failed` / `checks`).
    pub fn failure_ratio(&self) -> f64 {
        if self.checks > 0 {
            self.failed as f64 / self.checks as f64
        } else {
            0.0
        }
    }

    /// Emits the summary on the `log` facade: `info` when everything
    /// passed, `warn` otherwise.
    pub fn log(&self) {
        if self.passed() {
            log::info!("{self}");
        } else {
            log::warn!("{self}");
        }
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_type {
            Some(ty) if ty.is_float() => write!(f, "{ty} ({}): ", self.method)?,
            Some(ty) => write!(f, "{ty} (exact): ")?,
            None => f.write_str("empty: ")?,
        }
        if self.failed == 0 {
            return write!(f, "{} checks passed", self.checks);
        }
        write!(f, "{} of {} checks failed", self.failed, self.checks)?;
        match self.max_error {
            Some(max) => write!(f, ", max error {max} at index {}", self.max_error_index),
            None => Ok(()),
        }
    }
}
