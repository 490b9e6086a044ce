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

//! Signal-level wrapper around the interrupt controller

use super::{ControllerInputs, InterruptController};
use crate::core::device::{ClockedDevice, SignalSpec};
use crate::core::signal::BitVector;

const SIGNALS: &[SignalSpec] = &[
    SignalSpec::input("reset_n", 1),
    SignalSpec::input("mie", 1),
    SignalSpec::input("msie", 1),
    SignalSpec::input("mtie", 1),
    SignalSpec::input("meie", 1),
    SignalSpec::input("msip", 1),
    SignalSpec::input("mtip", 1),
    SignalSpec::input("meip", 1),
    SignalSpec::input("acknowledge", 1),
    SignalSpec::input("mtvec_base", 32),
    SignalSpec::input("vectored_mode", 1),
    SignalSpec::output("interrupt_out", 1),
    SignalSpec::output("interrupt_ack", 1),
    SignalSpec::output("interrupt_address", 32),
];

/// Interrupt controller with held input pins
///
/// # Example
///
/// ```
/// use rvic::core::device::ClockedDevice;
/// use rvic::core::interrupt::ControllerPort;
/// use rvic::core::signal::BitVector;
///
/// let mut port = ControllerPort::new();
/// port.drive("mie", BitVector::bit(true)).unwrap();
/// port.drive("mtie", BitVector::bit(true)).unwrap();
/// port.drive("mtip", BitVector::bit(true)).unwrap();
/// port.tick();
///
/// assert!(port.sample("interrupt_out").unwrap().as_bool());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ControllerPort {
    controller: InterruptController,
    inputs: ControllerInputs,
}

impl ControllerPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> &InterruptController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InterruptController {
        &mut self.controller
    }

    pub fn inputs(&self) -> &ControllerInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut ControllerInputs {
        &mut self.inputs
    }
}

impl ClockedDevice for ControllerPort {
    fn name(&self) -> &'static str {
        "interrupt_controller"
    }

    fn signals(&self) -> &'static [SignalSpec] {
        SIGNALS
    }

    fn set_input(&mut self, name: &str, value: BitVector) {
        let bit = value.as_bool();
        let pins = &mut self.inputs;
        match name {
            "reset_n" => pins.reset_n = bit,
            "mie" => pins.mie = bit,
            "msie" => pins.msie = bit,
            "mtie" => pins.mtie = bit,
            "meie" => pins.meie = bit,
            "msip" => pins.msip = bit,
            "mtip" => pins.mtip = bit,
            "meip" => pins.meip = bit,
            "acknowledge" => pins.acknowledge = bit,
            "mtvec_base" => pins.mtvec_base = value.as_u32(),
            "vectored_mode" => pins.vectored_mode = bit,
            _ => log::warn!("interrupt_controller: ignoring write to unknown input '{}'", name),
        }
    }

    fn get(&self, name: &str) -> BitVector {
        let pins = &self.inputs;
        let out = self.controller.outputs();
        match name {
            "reset_n" => pins.reset_n.into(),
            "mie" => pins.mie.into(),
            "msie" => pins.msie.into(),
            "mtie" => pins.mtie.into(),
            "meie" => pins.meie.into(),
            "msip" => pins.msip.into(),
            "mtip" => pins.mtip.into(),
            "meip" => pins.meip.into(),
            "acknowledge" => pins.acknowledge.into(),
            "mtvec_base" => pins.mtvec_base.into(),
            "vectored_mode" => pins.vectored_mode.into(),
            "interrupt_out" => out.interrupt_out.into(),
            "interrupt_ack" => out.interrupt_ack.into(),
            "interrupt_address" => out.interrupt_address.into(),
            _ => BitVector::bit(false),
        }
    }

    fn tick(&mut self) {
        self.controller.clock(&self.inputs);
    }
}
