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

//! End-to-end controller behavior through the public API

mod common;

use common::assertions::{assert_interrupt_at, assert_no_interrupt};
use common::fixtures::{pulse_sources, vectored_pins, MTVEC_BASE};
use rvic::core::interrupt::{InterruptBits, InterruptController, Source};
use rvic::core::multiplier::Multiplier;
use rvic::core::snapshot::Snapshot;

#[test]
fn test_global_gate_wins() {
    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();
    pins.mie = false;
    pins.msip = true;

    assert_no_interrupt(&ic.clock(&pins));
}

#[test]
fn test_software_vector_address() {
    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();
    pins.msip = true;

    assert_interrupt_at(&ic.clock(&pins), 0x8000_000C);
}

#[test]
fn test_service_order_one_acknowledge_apart() {
    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();

    pulse_sources(
        &mut ic,
        &mut pins,
        &[Source::External, Source::Timer, Source::Software],
    );
    assert_interrupt_at(&ic.outputs(), 0x8000_000C);

    let expected = [Some(0x8000_001C), Some(0x8000_002C), None];
    for next in expected {
        pins.acknowledge = true;
        let out = ic.clock(&pins);
        assert!(out.interrupt_ack);
        match next {
            Some(address) => assert_interrupt_at(&out, address),
            None => assert_no_interrupt(&out),
        }

        // Lower-priority requests survive between acknowledges
        pins.acknowledge = false;
        assert_eq!(ic.clock(&pins).interrupt_out, next.is_some());
    }
}

#[test]
fn test_acknowledge_leaves_lower_priority_pending() {
    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();

    pulse_sources(&mut ic, &mut pins, &[Source::Software, Source::External]);

    pins.acknowledge = true;
    ic.clock(&pins);

    assert_eq!(ic.pending_bits(), InterruptBits::MEIP);
    assert_interrupt_at(&ic.outputs(), MTVEC_BASE + 0x2C);
}

#[test]
fn test_reset_from_any_state() {
    for sources in [
        &[Source::Software][..],
        &[Source::Timer, Source::External][..],
        &[Source::Software, Source::Timer, Source::External][..],
    ] {
        let mut ic = InterruptController::new();
        let mut pins = vectored_pins();
        pulse_sources(&mut ic, &mut pins, sources);

        pins.reset_n = false;
        assert_no_interrupt(&ic.clock(&pins));
        assert!(ic.pending_bits().is_empty());
    }
}

#[test]
fn test_non_vectored_mode_uses_base() {
    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();
    pins.vectored_mode = false;

    pulse_sources(&mut ic, &mut pins, &[Source::Timer]);
    assert_interrupt_at(&ic.outputs(), MTVEC_BASE);
}

#[test]
fn test_multiplier_reference_product() {
    let mut mul = Multiplier::new();
    for _ in 0..5 {
        mul.clock(true, 0x0003, 0x0005);
    }
    assert_eq!(mul.result(), 0x0000_000F);
}

#[test]
fn test_snapshot_resume_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.snap");

    let mut ic = InterruptController::new();
    let mut pins = vectored_pins();
    pulse_sources(&mut ic, &mut pins, &[Source::Timer, Source::External]);

    Snapshot::capture("resume", &ic, &Multiplier::new())
        .save_to_file(&path)
        .unwrap();

    let mut resumed = InterruptController::new();
    let mut mul = Multiplier::new();
    Snapshot::load_from_file(&path)
        .unwrap()
        .restore(&mut resumed, &mut mul);

    pins.acknowledge = true;
    assert_eq!(resumed.clock(&pins), ic.clock(&pins));
    assert_interrupt_at(&resumed.outputs(), MTVEC_BASE + 0x2C);
}
