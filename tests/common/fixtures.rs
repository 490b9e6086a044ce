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

//! Test fixtures for common test scenarios

use rvic::core::interrupt::{ControllerInputs, InterruptController, Source};
use std::path::PathBuf;

/// Vector table base used by the reference scenarios
#[allow(dead_code)]
pub const MTVEC_BASE: u32 = 0x8000_0000;

/// Directory holding the bundled scenario files
#[allow(dead_code)]
pub fn scenario_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

/// All bundled scenario files, sorted by name
#[allow(dead_code)]
pub fn bundled_scenarios() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(scenario_dir())
        .expect("Failed to read scenarios directory")
        .map(|entry| entry.expect("Failed to read directory entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
}

/// Pins with the global enable, every source enable and vectored mode on
#[allow(dead_code)]
pub fn vectored_pins() -> ControllerInputs {
    ControllerInputs {
        mie: true,
        msie: true,
        mtie: true,
        meie: true,
        mtvec_base: MTVEC_BASE,
        vectored_mode: true,
        ..Default::default()
    }
}

/// Raise the given pending pins for one edge, then drop them for one edge
#[allow(dead_code)]
pub fn pulse_sources(ic: &mut InterruptController, pins: &mut ControllerInputs, sources: &[Source]) {
    for &source in sources {
        pins.set_pending(source, true);
    }
    ic.clock(pins);
    for &source in sources {
        pins.set_pending(source, false);
    }
    ic.clock(pins);
}
