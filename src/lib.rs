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

//! Cycle-accurate model of a vectored machine-mode interrupt controller
//!
//! This library models a priority-based interrupt controller that arbitrates
//! software, timer and external interrupt sources and computes a vectored
//! trap address, together with a signed multiplier block and a clock-cycle
//! testbench for driving both.
//!
//! # Example
//!
//! ```
//! use rvic::core::interrupt::{ControllerInputs, InterruptController};
//!
//! let mut ic = InterruptController::new();
//! let pins = ControllerInputs {
//!     mie: true,
//!     mtie: true,
//!     mtip: true,
//!     mtvec_base: 0x8000_0000,
//!     vectored_mode: true,
//!     ..Default::default()
//! };
//!
//! let out = ic.clock(&pins);
//! assert!(out.interrupt_out);
//! assert_eq!(out.interrupt_address, 0x8000_001C);
//! ```

pub mod core;
