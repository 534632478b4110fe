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

//! Numeric-equivalence checking of expected against actual values.
//!
//! Integer, bit and pointer values must match exactly. Floating-point values
//! are judged by one of the [`ComparisonMethod`]s, with special handling of
//! NaNs, infinities, subnormals and optional value limits.
//!
//! ```
//! use hexl_compare::{Comparison, ComparisonConfig};
//! use hexl_core::Value;
//!
//! let config: ComparisonConfig = "ulps=2".parse().unwrap();
//! let mut cmp = Comparison::new(config);
//! assert!(cmp.compare(Value::F32(1.0), Value::F32(1.0)).passed());
//! assert_eq!(cmp.summary().checks, 1);
//! ```

#![warn(missing_docs)]

mod comparison;
mod config;
mod deviation;
mod float;
mod method;
mod report;

pub use comparison::{Check, Comparison, Verdict};
pub use config::{ComparisonConfig, ConfigError};
pub use deviation::Deviation;
pub use method::{
    ComparisonMethod, DEFAULT_RELATIVE, DEFAULT_ULPS, F16_DECIMAL_DIGITS, F32_DECIMAL_DIGITS,
    F64_DECIMAL_DIGITS,
};
pub use report::ComparisonSummary;
