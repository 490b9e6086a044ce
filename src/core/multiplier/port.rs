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

//! Signal-level wrapper around the multiplier

use super::Multiplier;
use crate::core::device::{ClockedDevice, SignalSpec};
use crate::core::signal::BitVector;

const SIGNALS: &[SignalSpec] = &[
    SignalSpec::input("en", 1),
    SignalSpec::input("input_A", 16),
    SignalSpec::input("input_B", 16),
    SignalSpec::output("final_result", 32),
];

/// Multiplier with held input pins
#[derive(Debug, Clone, Default)]
pub struct MultiplierPort {
    multiplier: Multiplier,
    en: bool,
    input_a: u16,
    input_b: u16,
}

impl MultiplierPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self) -> &Multiplier {
        &self.multiplier
    }

    pub fn multiplier_mut(&mut self) -> &mut Multiplier {
        &mut self.multiplier
    }
}

impl ClockedDevice for MultiplierPort {
    fn name(&self) -> &'static str {
        "multiplier"
    }

    fn signals(&self) -> &'static [SignalSpec] {
        SIGNALS
    }

    fn set_input(&mut self, name: &str, value: BitVector) {
        match name {
            "en" => self.en = value.as_bool(),
            "input_A" => self.input_a = value.value() as u16,
            "input_B" => self.input_b = value.value() as u16,
            _ => log::warn!("multiplier: ignoring write to unknown input '{}'", name),
        }
    }

    fn get(&self, name: &str) -> BitVector {
        match name {
            "en" => self.en.into(),
            "input_A" => BitVector::new(16, self.input_a as u64),
            "input_B" => BitVector::new(16, self.input_b as u64),
            "final_result" => self.multiplier.result().into(),
            _ => BitVector::bit(false),
        }
    }

    fn tick(&mut self) {
        self.multiplier.clock(self.en, self.input_a, self.input_b);
    }
}
