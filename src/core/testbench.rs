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

//! Clock-cycle testbench
//!
//! Drives a [`ClockedDevice`] the way a hardware test harness does: hold
//! inputs, advance a number of clock edges, then compare sampled outputs
//! against expected literals.
//!
//! Every check is recorded, pass or fail. Optionally every edge appends a
//! [`Sample`] of all ports to an in-memory log that can be written out as
//! JSON for later inspection.
//!
//! # Example
//!
//! ```
//! use rvic::core::multiplier::MultiplierPort;
//! use rvic::core::testbench::Testbench;
//!
//! let mut tb = Testbench::new(MultiplierPort::new());
//! tb.drive_literal("en", "1").unwrap();
//! tb.drive_literal("input_A", "0000000000000011").unwrap();
//! tb.drive_literal("input_B", "0000000000000101").unwrap();
//! tb.cycle(5);
//!
//! tb.check("final_result", "00000000000000000000000000001111", "At clock 1.")
//!     .unwrap();
//! assert!(tb.passed());
//! ```

use crate::core::device::ClockedDevice;
use crate::core::error::{Result, RvicError};
use crate::core::signal::BitVector;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// All port values after one clock edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub cycle: u64,
    pub signals: BTreeMap<String, String>,
}

/// Outcome of one output check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub cycle: u64,
    pub signal: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
    pub passed: bool,
}

impl CheckResult {
    fn to_error(&self) -> RvicError {
        RvicError::CheckFailed {
            cycle: self.cycle,
            signal: self.signal.clone(),
            expected: self.expected.clone(),
            actual: self.actual.clone(),
            message: self.message.clone(),
        }
    }
}

/// Cycle driver for a single device
pub struct Testbench<D: ClockedDevice> {
    device: D,
    cycle: u64,
    record_samples: bool,
    samples: Vec<Sample>,
    checks: Vec<CheckResult>,
}

impl<D: ClockedDevice> Testbench<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            cycle: 0,
            record_samples: false,
            samples: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Enable or disable per-edge sample recording
    pub fn set_record_samples(&mut self, enabled: bool) {
        self.record_samples = enabled;
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Clock edges applied so far
    pub fn current_cycle(&self) -> u64 {
        self.cycle
    }

    /// Drive an input with an exact-width value
    pub fn drive(&mut self, signal: &str, value: BitVector) -> Result<()> {
        self.device.drive(signal, value)
    }

    /// Drive an input from a literal, sized to the port
    ///
    /// # Errors
    ///
    /// Returns an error if the signal is unknown or an output, or if the
    /// literal is malformed or does not fit the port width.
    pub fn drive_literal(&mut self, signal: &str, literal: &str) -> Result<()> {
        let spec = self.device.signal(signal)?;
        let value = BitVector::parse_with_width(literal, spec.width)?;
        self.device.drive(signal, value)
    }

    /// Apply `n` rising clock edges
    pub fn cycle(&mut self, n: u64) {
        for _ in 0..n {
            self.device.tick();
            self.cycle += 1;
            if self.record_samples {
                self.record();
            }
        }
    }

    /// Compare a port against an expected literal and record the result
    ///
    /// # Arguments
    ///
    /// * `signal` - Port to sample
    /// * `expected` - Expected value literal, sized to the port
    /// * `message` - Context shown when the check fails
    ///
    /// # Errors
    ///
    /// Returns [`RvicError::CheckFailed`] on mismatch (the failure is still
    /// recorded), or a signal/literal error if the check cannot be evaluated.
    pub fn check(&mut self, signal: &str, expected: &str, message: &str) -> Result<()> {
        let spec = self.device.signal(signal)?;
        let expected = BitVector::parse_with_width(expected, spec.width)?;
        let actual = self.device.sample(signal)?;

        let result = CheckResult {
            cycle: self.cycle,
            signal: signal.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            message: message.to_string(),
            passed: expected == actual,
        };

        if result.passed {
            log::debug!("PASS {} = {} ({})", signal, result.actual, message);
            self.checks.push(result);
            Ok(())
        } else {
            log::warn!(
                "FAIL {} at cycle {}: expected {}, got {} ({})",
                signal,
                self.cycle,
                result.expected,
                result.actual,
                message
            );
            let err = result.to_error();
            self.checks.push(result);
            Err(err)
        }
    }

    /// All recorded checks
    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// True if no recorded check failed
    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consume the testbench, returning its checks and samples
    pub fn into_results(self) -> (Vec<CheckResult>, Vec<Sample>) {
        (self.checks, self.samples)
    }

    /// Write the sample log as pretty-printed JSON
    pub fn write_sample_log<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.samples)?;
        Ok(())
    }

    fn record(&mut self) {
        let signals = self
            .device
            .signals()
            .iter()
            .map(|spec| (spec.name.to_string(), self.device.get(spec.name).to_string()))
            .collect();
        self.samples.push(Sample {
            cycle: self.cycle,
            signals,
        });
    }
}
