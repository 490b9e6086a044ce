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

//! Interrupt acknowledgment tests
//!
//! The acknowledge pulse clears exactly the serviced source.

use super::super::*;
use super::{acknowledge, enabled_pins, pulse, MTVEC};

#[test]
fn test_ack_clears_only_serviced_source() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(
        &mut ic,
        &mut pins,
        &[Source::Software, Source::Timer, Source::External],
    );

    let out = acknowledge(&mut ic, &mut pins);
    assert!(out.interrupt_ack);
    assert!(out.interrupt_out);
    assert_eq!(ic.pending_bits(), InterruptBits::MTIP | InterruptBits::MEIP);
}

#[test]
fn test_interrupt_ack_is_single_cycle() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Timer]);
    assert!(!ic.outputs().interrupt_ack);

    assert!(acknowledge(&mut ic, &mut pins).interrupt_ack);
    assert!(!ic.clock(&pins).interrupt_ack);
}

#[test]
fn test_held_acknowledge_drains_one_per_edge() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(
        &mut ic,
        &mut pins,
        &[Source::Software, Source::Timer, Source::External],
    );

    pins.acknowledge = true;

    let out = ic.clock(&pins);
    assert!(out.interrupt_ack);
    assert_eq!(out.interrupt_address, MTVEC + 0x1C);

    let out = ic.clock(&pins);
    assert!(out.interrupt_ack);
    assert_eq!(out.interrupt_address, MTVEC + 0x2C);

    let out = ic.clock(&pins);
    assert!(out.interrupt_ack);
    assert!(!out.interrupt_out);

    // Nothing left to acknowledge
    let out = ic.clock(&pins);
    assert!(!out.interrupt_ack);
    assert!(!out.interrupt_out);
}

#[test]
fn test_ack_with_new_lower_priority_request_same_edge() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Software]);

    // Timer rises on the very edge that acknowledges software
    pins.mtip = true;
    let out = acknowledge(&mut ic, &mut pins);

    assert!(out.interrupt_ack);
    assert!(out.interrupt_out);
    assert_eq!(ic.serviced(), Some(Source::Timer));
    assert_eq!(ic.pending_bits(), InterruptBits::MTIP);
}

#[test]
fn test_ack_absorbs_same_source_edge() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::External]);

    pins.meip = true;
    let out = acknowledge(&mut ic, &mut pins);

    assert!(out.interrupt_ack);
    assert!(!out.interrupt_out);
    assert_eq!(ic.source_state(Source::External), SourceState::Idle);
}

#[test]
fn test_ack_targets_source_seen_before_edge() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Timer]);
    assert_eq!(ic.serviced(), Some(Source::Timer));

    // Software arrives together with the acknowledge meant for timer
    pins.msip = true;
    let out = acknowledge(&mut ic, &mut pins);

    assert!(out.interrupt_out);
    assert_eq!(ic.serviced(), Some(Source::Software));
    assert_eq!(ic.pending_bits(), InterruptBits::MSIP);
}

#[test]
fn test_ack_after_global_disable_does_nothing() {
    let mut ic = InterruptController::new();
    let mut pins = enabled_pins();

    pulse(&mut ic, &mut pins, &[Source::Software]);
    pins.mie = false;
    ic.clock(&pins);

    let out = acknowledge(&mut ic, &mut pins);
    assert!(!out.interrupt_ack);
    assert_eq!(ic.pending_bits(), InterruptBits::MSIP);
}
