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

//! Comparison options and their textual form.
//!
//! Harness manifests describe comparisons either as JSON (through `serde`) or
//! as a short option string such as `"ulps=2, flushDenorms, minf=0"`.

use crate::method::ComparisonMethod;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// An error produced while parsing a comparison option string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The token is not a known option.
    #[error("unknown comparison option '{0}'")]
    UnknownOption(String),
    /// The option requires a value, as in `ulps=2`.
    #[error("comparison option '{0}' requires a value")]
    MissingValue(String),
    /// The option value is not a number.
    #[error("invalid number '{value}' for comparison option '{option}'")]
    InvalidNumber {
        /// The option name.
        option: String,
        /// The text that failed to parse.
        value: String,
    },
    /// The precision is negative or not finite.
    #[error("precision {0} must be finite and non-negative")]
    InvalidPrecision(f64),
}

/// Everything that selects how results are compared.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// The numeric-equivalence method for floating-point results.
    pub method: ComparisonMethod,
    /// The tolerance; `None` derives it from the compared type.
    pub precision: Option<f64>,
    /// Also accept results that match once subnormals are flushed to zero.
    pub flush_denorms: bool,
    /// Results below this value fail whatever the method.
    pub min_limit: Option<f64>,
    /// Results above this value fail whatever the method.
    pub max_limit: Option<f64>,
}

impl ComparisonConfig {
    /// A configuration for `method` with a type-derived precision.
    pub fn new(method: ComparisonMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// The configuration used by older harnesses: DECIMAL, type-derived precision.
    pub fn legacy() -> Self {
        Self::new(ComparisonMethod::Decimal)
    }

    /// Sets an explicit precision.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Enables or disables the flushed-subnormal retry.
    pub fn with_flush_denorms(mut self, flush: bool) -> Self {
        self.flush_denorms = flush;
        self
    }

    /// Restricts the accepted range of actual values.
    pub fn with_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_limit = min;
        self.max_limit = max;
        self
    }

    fn set_method(&mut self, method: ComparisonMethod, precision: f64) -> Result<(), ConfigError> {
        if !precision.is_finite() || precision < 0.0 {
            return Err(ConfigError::InvalidPrecision(precision));
        }
        self.method = method;
        self.precision = Some(precision);
        Ok(())
    }
}

fn parse_number(option: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidNumber {
        option: option.to_string(),
        value: value.to_string(),
    })
}

impl FromStr for ComparisonConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        let tokens = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty());

        for token in tokens {
            let (name, value) = match token.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (token, None),
            };
            match (name, value) {
                ("flushDenorms", None) => config.flush_denorms = true,
                ("legacy_default", None) => {
                    config.method = ComparisonMethod::Decimal;
                    config.precision = None;
                }
                ("ulps" | "absf" | "relf" | "image" | "minf" | "maxf", None) => {
                    return Err(ConfigError::MissingValue(name.to_string()));
                }
                ("ulps", Some(v)) => config.set_method(ComparisonMethod::Ulps, parse_number(name, v)?)?,
                ("absf", Some(v)) => {
                    config.set_method(ComparisonMethod::Decimal, parse_number(name, v)?)?
                }
                ("relf", Some(v)) => {
                    config.set_method(ComparisonMethod::Relative, parse_number(name, v)?)?
                }
                ("image", Some(v)) => {
                    config.set_method(ComparisonMethod::Image, parse_number(name, v)?)?
                }
                ("minf", Some(v)) => config.min_limit = Some(parse_number(name, v)?),
                ("maxf", Some(v)) => config.max_limit = Some(parse_number(name, v)?),
                _ => return Err(ConfigError::UnknownOption(token.to_string())),
            }
        }
        Ok(config)
    }
}
