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

//! Clocked device abstraction
//!
//! Provides a uniform, signal-level interface over every modelled block so a
//! single testbench can drive any of them by port name.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                Testbench                     │
//! ├──────────────────────────────────────────────┤
//! │  drive("msip", 1)   ──►  device.drive(...)   │
//! │  cycle(n)           ──►  device.tick() × n   │
//! │  check("irq_out")   ──►  device.sample(...)  │
//! └──────────────────────────────────────────────┘
//!           ▲                        ▲
//!           │                        │
//!    ┌──────┴────────┐       ┌───────┴───────┐
//!    │ ControllerPort│       │ MultiplierPort│
//!    │(ClockedDevice)│       │(ClockedDevice)│
//!    └───────────────┘       └───────────────┘
//! ```
//!
//! Inputs driven between edges are held until changed, the way a test
//! harness holds a pin; they are sampled on the next [`ClockedDevice::tick`].

use crate::core::error::{Result, RvicError};
use crate::core::signal::BitVector;
use serde::Serialize;

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

/// Static description of one device port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalSpec {
    pub name: &'static str,
    pub direction: Direction,
    pub width: u8,
}

impl SignalSpec {
    pub const fn input(name: &'static str, width: u8) -> Self {
        Self {
            name,
            direction: Direction::Input,
            width,
        }
    }

    pub const fn output(name: &'static str, width: u8) -> Self {
        Self {
            name,
            direction: Direction::Output,
            width,
        }
    }
}

/// Trait for single-clock synchronous devices
///
/// Implementors expose their ports through [`ClockedDevice::signals`] and
/// only need to handle signals that pass validation; [`ClockedDevice::drive`]
/// and [`ClockedDevice::sample`] perform the name, direction and width
/// checks before delegating.
pub trait ClockedDevice {
    /// Device name as used in scenario files
    fn name(&self) -> &'static str;

    /// All ports of this device
    fn signals(&self) -> &'static [SignalSpec];

    /// Set an input without validation
    ///
    /// Called by [`ClockedDevice::drive`] after the checks pass. Names that
    /// are not inputs of this device are ignored.
    fn set_input(&mut self, name: &str, value: BitVector);

    /// Read a port without validation
    ///
    /// Unknown names read as a single zero bit; use
    /// [`ClockedDevice::sample`] to get an error instead.
    fn get(&self, name: &str) -> BitVector;

    /// Advance one rising clock edge
    fn tick(&mut self);

    /// Look up a port by name
    fn signal(&self, name: &str) -> Result<SignalSpec> {
        self.signals()
            .iter()
            .find(|s| s.name == name)
            .copied()
            .ok_or_else(|| RvicError::UnknownSignal {
                device: self.name().to_string(),
                signal: name.to_string(),
            })
    }

    /// Drive an input port
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The signal does not exist on this device
    /// - The signal is an output
    /// - The value width differs from the port width
    fn drive(&mut self, name: &str, value: BitVector) -> Result<()> {
        let spec = self.signal(name)?;
        if spec.direction != Direction::Input {
            return Err(RvicError::ReadOnlySignal(name.to_string()));
        }
        if value.width() != spec.width {
            return Err(RvicError::WidthMismatch {
                signal: name.to_string(),
                expected: spec.width,
                got: value.width(),
            });
        }
        self.set_input(spec.name, value);
        Ok(())
    }

    /// Sample any port (inputs read back the held value)
    fn sample(&self, name: &str) -> Result<BitVector> {
        let spec = self.signal(name)?;
        Ok(self.get(spec.name))
    }
}

impl<T: ClockedDevice + ?Sized> ClockedDevice for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn signals(&self) -> &'static [SignalSpec] {
        (**self).signals()
    }

    fn set_input(&mut self, name: &str, value: BitVector) {
        (**self).set_input(name, value)
    }

    fn get(&self, name: &str) -> BitVector {
        (**self).get(name)
    }

    fn tick(&mut self) {
        (**self).tick()
    }
}
