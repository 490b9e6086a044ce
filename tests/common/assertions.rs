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

//! Custom assertions for controller testing

use rvic::core::interrupt::ControllerOutputs;
use rvic::core::scenario::ScenarioReport;

/// Assert the controller is requesting an interrupt at the expected address
#[allow(dead_code)]
pub fn assert_interrupt_at(out: &ControllerOutputs, expected: u32) {
    assert!(out.interrupt_out, "interrupt_out not asserted");
    assert_eq!(
        out.interrupt_address, expected,
        "interrupt_address mismatch: expected 0x{:08X}, got 0x{:08X}",
        expected, out.interrupt_address
    );
}

/// Assert no interrupt is being requested
#[allow(dead_code)]
pub fn assert_no_interrupt(out: &ControllerOutputs) {
    assert!(
        !out.interrupt_out,
        "interrupt_out asserted at 0x{:08X}",
        out.interrupt_address
    );
}

/// Assert every check in a scenario report passed
#[allow(dead_code)]
pub fn assert_report_passed(report: &ScenarioReport) {
    let failures: Vec<String> = report
        .failures()
        .map(|f| {
            format!(
                "cycle {} {}: expected {}, got {} ({})",
                f.cycle, f.signal, f.expected, f.actual, f.message
            )
        })
        .collect();
    assert!(
        failures.is_empty(),
        "Scenario '{}' failed:\n{}",
        report.name,
        failures.join("\n")
    );
}
