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

//! Interrupt controller tests
//!
//! Split by concern: latching, masking, priority, acknowledgment,
//! address computation and reset.

mod acknowledgment;
mod reset;

use super::*;

/// Vector table base used throughout the tests
pub(super) const MTVEC: u32 = 0x8000_0000;

/// Global enable on, every source enabled, vectored at [`MTVEC`]
pub(super) fn enabled_pins() -> ControllerInputs {
    ControllerInputs {
        mie: true,
        msie: true,
        mtie: true,
        meie: true,
        mtvec_base: MTVEC,
        vectored_mode: true,
        ..Default::default()
    }
}

/// Pulse the given sources' pending pins high for one edge, then low for one
pub(super) fn pulse(ic: &mut InterruptController, pins: &mut ControllerInputs, sources: &[Source]) {
    for &source in sources {
        pins.set_pending(source, true);
    }
    ic.clock(pins);
    for &source in sources {
        pins.set_pending(source, false);
    }
    ic.clock(pins);
}

/// Clock one edge with acknowledge asserted, then release it
pub(super) fn acknowledge(
    ic: &mut InterruptController,
    pins: &mut ControllerInputs,
) -> ControllerOutputs {
    pins.acknowledge = true;
    let out = ic.clock(pins);
    pins.acknowledge = false;
    out
}
