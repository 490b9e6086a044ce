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

//! TOML stimulus scenarios
//!
//! A scenario names a device and lists steps. Each step drives some inputs,
//! applies clock edges, then checks outputs:
//!
//! ```toml
//! device = "interrupt_controller"
//! name = "software interrupt vector"
//!
//! [[step]]
//! drive = { mie = 1, msie = 1, msip = 1, vectored_mode = 1, mtvec_base = "0x80000000" }
//! cycles = 1
//! expect = { interrupt_out = 1, interrupt_address = "0x8000000C" }
//! message = "software vector"
//! ```
//!
//! Values may be TOML integers, booleans, or literal strings (see
//! [`crate::core::signal`]). A step without `cycles` uses the configured
//! `cycles_per_step`; `cycles = 0` checks without clocking.

use crate::core::config::Config;
use crate::core::device::ClockedDevice;
use crate::core::error::{Result, RvicError};
use crate::core::interrupt::ControllerPort;
use crate::core::multiplier::MultiplierPort;
use crate::core::testbench::{CheckResult, Sample, Testbench};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Names accepted in a scenario's `device` field
pub const DEVICES: &[&str] = &["interrupt_controller", "multiplier"];

/// Create a device by scenario name
///
/// # Errors
///
/// Returns [`RvicError::UnknownDevice`] for names not in [`DEVICES`].
pub fn create_device(name: &str) -> Result<Box<dyn ClockedDevice>> {
    match name {
        "interrupt_controller" => Ok(Box::new(ControllerPort::new())),
        "multiplier" => Ok(Box::new(MultiplierPort::new())),
        _ => Err(RvicError::UnknownDevice(name.to_string())),
    }
}

/// A signal value as written in a scenario file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    /// Literal form understood by [`crate::core::signal::BitVector`]
    pub fn to_literal(&self) -> String {
        match self {
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

/// One drive/clock/check step
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub drive: BTreeMap<String, Value>,

    pub cycles: Option<u64>,

    #[serde(default)]
    pub expect: BTreeMap<String, Value>,

    pub message: Option<String>,
}

/// A parsed scenario file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub device: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// Result of running a scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub device: String,
    pub cycles: u64,
    pub checks: Vec<CheckResult>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<Sample>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let scenario: Scenario =
            toml::from_str(text).map_err(|e| RvicError::ScenarioParse(e.to_string()))?;
        if !DEVICES.contains(&scenario.device.as_str()) {
            return Err(RvicError::UnknownDevice(scenario.device));
        }
        Ok(scenario)
    }

    /// Load a scenario file
    ///
    /// A scenario without a `name` is named after its file stem.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&text)?;
        if scenario.name.is_none() {
            scenario.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        Ok(scenario)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Execute every step against a fresh device
    ///
    /// Check mismatches are recorded in the report rather than returned as
    /// errors. With `stop_on_failure` the run ends after the first step
    /// that has a failing check.
    ///
    /// # Errors
    ///
    /// Returns an error for problems that make a step impossible to run:
    /// unknown signals, driving outputs, or malformed literals.
    pub fn run(&self, config: &Config) -> Result<ScenarioReport> {
        let mut tb = Testbench::new(create_device(&self.device)?);
        tb.set_record_samples(config.sample_log.is_some());

        log::info!("Running scenario '{}' on {}", self.display_name(), self.device);

        for (index, step) in self.steps.iter().enumerate() {
            for (signal, value) in &step.drive {
                tb.drive_literal(signal, &value.to_literal())?;
            }

            tb.cycle(step.cycles.unwrap_or(config.cycles_per_step));

            let message = step
                .message
                .clone()
                .unwrap_or_else(|| format!("step {}", index + 1));

            let mut step_failed = false;
            for (signal, value) in &step.expect {
                match tb.check(signal, &value.to_literal(), &message) {
                    Ok(()) => {}
                    Err(RvicError::CheckFailed { .. }) => step_failed = true,
                    Err(e) => return Err(e),
                }
            }

            if step_failed && config.stop_on_failure {
                log::warn!("Stopping '{}' after failing {}", self.display_name(), message);
                break;
            }
        }

        let cycles = tb.current_cycle();
        let (checks, samples) = tb.into_results();

        Ok(ScenarioReport {
            name: self.display_name().to_string(),
            device: self.device.clone(),
            cycles,
            checks,
            samples,
        })
    }
}
