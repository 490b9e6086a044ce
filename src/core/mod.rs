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

//! Core simulation components
//!
//! This module contains the hardware models and the harness around them:
//! - Interrupt controller (priority arbitration, vectored addressing)
//! - Signed 16×16 multiplier
//! - Signal values, device trait and clock-cycle testbench
//! - TOML scenarios, run configuration and snapshots

pub mod config;
pub mod device;
pub mod error;
pub mod interrupt;
pub mod multiplier;
pub mod scenario;
pub mod signal;
pub mod snapshot;
pub mod testbench;

// Re-export commonly used types
pub use config::Config;
pub use device::ClockedDevice;
pub use error::{Result, RvicError};
pub use interrupt::{ControllerInputs, ControllerOutputs, InterruptController, Source};
pub use multiplier::Multiplier;
pub use scenario::Scenario;
pub use signal::BitVector;
pub use snapshot::Snapshot;
pub use testbench::Testbench;
