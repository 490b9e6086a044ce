// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Run configuration
//!
//! Settings come from, in increasing precedence:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config`, or the `RVIC_CONFIG` environment variable)
//! 3. Environment overrides
//!
//! ```text
//! Variable              | Field            | Format
//! ----------------------|------------------|------------------
//! RVIC_CYCLES_PER_STEP  | cycles_per_step  | integer
//! RVIC_SAMPLE_LOG       | sample_log       | path
//! RVIC_STOP_ON_FAILURE  | stop_on_failure  | true/false/1/0
//! ```
//!
//! A `.env` file in the working directory is loaded by the binary before
//! the environment is read.

use crate::core::error::{Result, RvicError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "RVIC_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Clock edges applied by a scenario step that does not specify `cycles`
    pub cycles_per_step: u64,

    /// Where to write the per-edge sample log (JSON); none disables recording
    pub sample_log: Option<PathBuf>,

    /// Stop a scenario at the first step with a failing check
    pub stop_on_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycles_per_step: 1,
            sample_log: None,
            stop_on_failure: false,
        }
    }
}

impl Config {
    /// Parse a TOML config document
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::config::Config;
    ///
    /// let config = Config::from_toml_str("cycles_per_step = 5").unwrap();
    /// assert_eq!(config.cycles_per_step, 5);
    /// assert!(!config.stop_on_failure);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RvicError::Config(e.to_string()))
    }

    /// Load a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    /// Resolve the full configuration for a run
    ///
    /// Uses `path` if given, else the file named by `RVIC_CONFIG`, else the
    /// defaults; then applies environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(file) => Self::load(file)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `RVIC_*` overrides from a variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`RvicError::Config`] if a variable is set to an unparsable value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("RVIC_CYCLES_PER_STEP") {
            self.cycles_per_step = value.trim().parse().map_err(|_| {
                RvicError::Config(format!("RVIC_CYCLES_PER_STEP: invalid count '{}'", value))
            })?;
        }

        if let Some(value) = lookup("RVIC_SAMPLE_LOG") {
            self.sample_log = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }

        if let Some(value) = lookup("RVIC_STOP_ON_FAILURE") {
            self.stop_on_failure = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(RvicError::Config(format!(
                        "RVIC_STOP_ON_FAILURE: invalid flag '{}'",
                        value
                    )))
                }
            };
        }

        Ok(())
    }
}
