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

//! Reset behavior tests

use super::super::*;
use super::{enabled_pins, pulse};

#[test]
fn test_reset_pin_clears_everything() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(
        &mut ic,
        &mut pins,
        &[Source::Software, Source::Timer, Source::External],
    );
    assert!(ic.outputs().interrupt_out);

    pins.reset_n = false;
    let out = ic.clock(&pins);

    assert_eq!(out, ControllerOutputs::default());
    assert_eq!(ic.pending_bits(), InterruptBits::empty());
    assert_eq!(ic.enabled_bits(), InterruptBits::empty());
    assert!(!ic.global_enable());

    // Releasing reset does not bring the old requests back
    pins.reset_n = true;
    assert!(!ic.clock(&pins).interrupt_out);
}

#[test]
fn test_pending_ignored_during_reset() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();
    pins.reset_n = false;

    pins.mtip = true;
    ic.clock(&pins);
    pins.mtip = false;
    ic.clock(&pins);

    pins.reset_n = true;
    assert!(!ic.clock(&pins).interrupt_out);
}

#[test]
fn test_input_high_at_reset_release_latches() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pins.reset_n = false;
    pins.meip = true;
    ic.clock(&pins);

    pins.reset_n = true;
    assert!(ic.clock(&pins).interrupt_out);
    assert_eq!(ic.serviced(), Some(Source::External));
}

#[test]
fn test_reset_clears_ack_and_acknowledge_is_ignored() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Software]);

    pins.reset_n = false;
    pins.acknowledge = true;
    let out = ic.clock(&pins);
    assert!(!out.interrupt_ack);
    assert!(!out.interrupt_out);
}

#[test]
fn test_reset_method_keeps_cycle_count() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Timer]);
    ic.reset();

    assert_eq!(ic.outputs(), ControllerOutputs::default());
    assert_eq!(ic.pending_bits(), InterruptBits::empty());
    assert_eq!(ic.cycles(), 2);
}
