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

//! Vectored Interrupt Controller Implementation
//!
//! The interrupt controller arbitrates the three machine-mode interrupt
//! sources under a global enable, latches their pending requests, and
//! presents the CPU with a request line and a branch target.
//!
//! ## Ports
//!
//! ```text
//! Signal            | Dir | Width | Meaning
//! ------------------|-----|-------|---------------------------------------
//! reset_n           | in  | 1     | Active-low synchronous reset
//! mie               | in  | 1     | Global interrupt enable
//! msie, mtie, meie  | in  | 1     | Per-source enable
//! msip, mtip, meip  | in  | 1     | Per-source raw pending (edge-captured)
//! acknowledge       | in  | 1     | CPU took the asserted interrupt
//! mtvec_base        | in  | 32    | Vector table base
//! vectored_mode     | in  | 1     | 0 = fixed entry, 1 = vectored
//! interrupt_out     | out | 1     | Interrupt request to the CPU
//! interrupt_ack     | out | 1     | Acknowledge completed on this edge
//! interrupt_address | out | 32    | Branch target
//! ```
//!
//! ## Sources (fixed priority, highest first)
//!
//! ```text
//! Source   | Cause | mip bit | Vector (vectored mode)
//! ---------|-------|---------|------------------------
//! Software | 3     | MSIP    | mtvec_base + 0x0C
//! Timer    | 7     | MTIP    | mtvec_base + 0x1C
//! External | 11    | MEIP    | mtvec_base + 0x2C
//! ```
//!
//! ## Edge Semantics
//!
//! Each rising clock edge, in order:
//!
//! 1. `reset_n = 0` clears all state; nothing else happens.
//! 2. An asserted `acknowledge` selects the source serviced before the edge.
//! 3. Enables, `mie`, `mtvec_base` and `vectored_mode` are registered.
//! 4. A 0→1 transition on a raw pending input latches that source.
//! 5. The acknowledged source is cleared.
//! 6. Arbitration picks the highest-priority enabled, latched source and
//!    computes the outputs.
//!
//! Outputs are registered: the values returned by
//! [`InterruptController::clock`] stay on the pins until the next edge.

mod port;

#[cfg(test)]
mod tests;

pub use port::ControllerPort;

use crate::core::snapshot::{InterruptState, StateSave};
use bitflags::bitflags;

bitflags! {
    /// Interrupt bits in the `mip`/`mie` CSR layout
    ///
    /// A source's bit position equals its cause code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InterruptBits: u32 {
        /// Machine software interrupt (bit 3)
        const MSIP = 1 << 3;

        /// Machine timer interrupt (bit 7)
        const MTIP = 1 << 7;

        /// Machine external interrupt (bit 11)
        const MEIP = 1 << 11;
    }
}

/// Interrupt source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Software,
    Timer,
    External,
}

impl Source {
    /// All sources, highest priority first
    pub const PRIORITY: [Source; 3] = [Source::Software, Source::Timer, Source::External];

    /// Cause code used to select the vector table slot
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::interrupt::Source;
    ///
    /// assert_eq!(Source::Software.cause_code(), 3);
    /// assert_eq!(Source::Timer.cause_code(), 7);
    /// assert_eq!(Source::External.cause_code(), 11);
    /// ```
    pub const fn cause_code(self) -> u32 {
        match self {
            Source::Software => 3,
            Source::Timer => 7,
            Source::External => 11,
        }
    }

    /// Source for a cause code, if it names one
    pub const fn from_cause_code(code: u32) -> Option<Source> {
        match code {
            3 => Some(Source::Software),
            7 => Some(Source::Timer),
            11 => Some(Source::External),
            _ => None,
        }
    }

    /// Bit for this source in [`InterruptBits`]
    pub const fn bit(self) -> InterruptBits {
        match self {
            Source::Software => InterruptBits::MSIP,
            Source::Timer => InterruptBits::MTIP,
            Source::External => InterruptBits::MEIP,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Source::Software => "software",
            Source::Timer => "timer",
            Source::External => "external",
        }
    }

    /// Priority rank (0 = highest), also the index into per-source state
    const fn index(self) -> usize {
        match self {
            Source::Software => 0,
            Source::Timer => 1,
            Source::External => 2,
        }
    }
}

/// Sticky pending state of one source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceState {
    /// No request outstanding
    #[default]
    Idle,

    /// Request captured and waiting for acknowledge
    Latched,
}

/// Input pins sampled on each clock edge
///
/// The default holds the controller out of reset with everything else low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerInputs {
    /// Active-low reset
    pub reset_n: bool,

    /// Global interrupt enable
    pub mie: bool,

    /// Software interrupt enable
    pub msie: bool,

    /// Timer interrupt enable
    pub mtie: bool,

    /// External interrupt enable
    pub meie: bool,

    /// Software interrupt raw pending
    pub msip: bool,

    /// Timer interrupt raw pending
    pub mtip: bool,

    /// External interrupt raw pending
    pub meip: bool,

    /// CPU acknowledge pulse
    pub acknowledge: bool,

    /// Vector table base address
    pub mtvec_base: u32,

    /// Vectored (true) or fixed-entry (false) addressing
    pub vectored_mode: bool,
}

impl Default for ControllerInputs {
    fn default() -> Self {
        Self {
            reset_n: true,
            mie: false,
            msie: false,
            mtie: false,
            meie: false,
            msip: false,
            mtip: false,
            meip: false,
            acknowledge: false,
            mtvec_base: 0,
            vectored_mode: false,
        }
    }
}

impl ControllerInputs {
    /// Per-source enable pin
    pub fn enable(&self, source: Source) -> bool {
        match source {
            Source::Software => self.msie,
            Source::Timer => self.mtie,
            Source::External => self.meie,
        }
    }

    /// Per-source raw pending pin
    pub fn pending(&self, source: Source) -> bool {
        match source {
            Source::Software => self.msip,
            Source::Timer => self.mtip,
            Source::External => self.meip,
        }
    }

    pub fn set_enable(&mut self, source: Source, value: bool) {
        match source {
            Source::Software => self.msie = value,
            Source::Timer => self.mtie = value,
            Source::External => self.meie = value,
        }
    }

    pub fn set_pending(&mut self, source: Source, value: bool) {
        match source {
            Source::Software => self.msip = value,
            Source::Timer => self.mtip = value,
            Source::External => self.meip = value,
        }
    }
}

/// Registered output pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerOutputs {
    /// Interrupt request to the CPU
    pub interrupt_out: bool,

    /// High for the edge on which an acknowledge cleared a source
    pub interrupt_ack: bool,

    /// Branch target; holds its last value while `interrupt_out` is low
    pub interrupt_address: u32,
}

/// Highest-priority source that is both enabled and pending
///
/// Returns `None` when `global_enable` is false.
///
/// # Example
///
/// ```
/// use rvic::core::interrupt::{arbitrate, InterruptBits, Source};
///
/// let all = InterruptBits::all();
/// let pending = InterruptBits::MTIP | InterruptBits::MEIP;
/// assert_eq!(arbitrate(true, all, pending), Some(Source::Timer));
/// assert_eq!(arbitrate(false, all, pending), None);
/// ```
pub fn arbitrate(
    global_enable: bool,
    enabled: InterruptBits,
    pending: InterruptBits,
) -> Option<Source> {
    if !global_enable {
        return None;
    }
    let active = enabled & pending;
    Source::PRIORITY
        .into_iter()
        .find(|source| active.contains(source.bit()))
}

/// Machine-mode vectored interrupt controller
///
/// # Example
///
/// ```
/// use rvic::core::interrupt::{ControllerInputs, InterruptController};
///
/// let mut ic = InterruptController::new();
/// let mut pins = ControllerInputs {
///     mie: true,
///     msie: true,
///     msip: true,
///     mtvec_base: 0x8000_0000,
///     vectored_mode: true,
///     ..Default::default()
/// };
///
/// // Latch the software interrupt
/// let out = ic.clock(&pins);
/// assert!(out.interrupt_out);
/// assert_eq!(out.interrupt_address, 0x8000_000C);
///
/// // The CPU takes it
/// pins.msip = false;
/// pins.acknowledge = true;
/// let out = ic.clock(&pins);
/// assert!(out.interrupt_ack);
/// assert!(!out.interrupt_out);
/// ```
#[derive(Debug, Clone)]
pub struct InterruptController {
    /// Sticky pending flag per source, indexed by priority rank
    states: [SourceState; 3],

    /// Registered per-source enables
    enables: [bool; 3],

    /// Raw pending pins sampled on the previous edge (for edge detection)
    last_raw: [bool; 3],

    /// Registered global enable
    global_enable: bool,

    /// Registered vector table base
    vector_base: u32,

    /// Registered addressing mode
    vectored_mode: bool,

    /// Source the current outputs are presenting
    serviced: Option<Source>,

    /// Registered output pins
    outputs: ControllerOutputs,

    /// Rising edges seen since construction
    cycles: u64,
}

impl InterruptController {
    /// Create a new interrupt controller in the post-reset state
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::interrupt::{InterruptBits, InterruptController};
    ///
    /// let ic = InterruptController::new();
    /// assert!(!ic.outputs().interrupt_out);
    /// assert_eq!(ic.pending_bits(), InterruptBits::empty());
    /// ```
    pub fn new() -> Self {
        Self {
            states: [SourceState::Idle; 3],
            enables: [false; 3],
            last_raw: [false; 3],
            global_enable: false,
            vector_base: 0,
            vectored_mode: false,
            serviced: None,
            outputs: ControllerOutputs::default(),
            cycles: 0,
        }
    }

    /// Reset all pending, enable and output state
    ///
    /// Equivalent to an edge with `reset_n = 0`. The edge counter is kept.
    pub fn reset(&mut self) {
        self.states = [SourceState::Idle; 3];
        self.enables = [false; 3];
        self.last_raw = [false; 3];
        self.global_enable = false;
        self.vector_base = 0;
        self.vectored_mode = false;
        self.serviced = None;
        self.outputs = ControllerOutputs::default();
        log::debug!("Interrupt controller reset");
    }

    /// Advance one rising clock edge
    ///
    /// # Arguments
    ///
    /// * `inputs` - Pin values sampled on this edge
    ///
    /// # Returns
    ///
    /// The registered outputs after the edge
    pub fn clock(&mut self, inputs: &ControllerInputs) -> ControllerOutputs {
        self.cycles += 1;

        if !inputs.reset_n {
            self.reset();
            return self.outputs;
        }

        // The acknowledge refers to what the CPU saw before this edge
        let acknowledged = if inputs.acknowledge {
            self.serviced
        } else {
            None
        };

        self.global_enable = inputs.mie;
        self.vector_base = inputs.mtvec_base;
        self.vectored_mode = inputs.vectored_mode;

        for source in Source::PRIORITY {
            let i = source.index();
            self.enables[i] = inputs.enable(source);

            let raw = inputs.pending(source);
            if raw && !self.last_raw[i] {
                if self.states[i] == SourceState::Latched {
                    log::trace!("IRQ {} coalesced (already pending)", source.name());
                } else {
                    log::trace!("IRQ {} latched", source.name());
                }
                self.states[i] = SourceState::Latched;
            }
            self.last_raw[i] = raw;
        }

        if let Some(source) = acknowledged {
            self.states[source.index()] = SourceState::Idle;
            log::trace!(
                "IRQ {} acknowledged, pending={:#05X}",
                source.name(),
                self.pending_bits().bits()
            );
        }

        self.evaluate(acknowledged.is_some());
        self.outputs
    }

    /// Latch a source directly, as if its pending pin had pulsed
    ///
    /// Takes effect on the outputs at the next edge.
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::interrupt::{ControllerInputs, InterruptController, Source};
    ///
    /// let mut ic = InterruptController::new();
    /// ic.request(Source::External);
    ///
    /// let pins = ControllerInputs { mie: true, meie: true, ..Default::default() };
    /// assert!(ic.clock(&pins).interrupt_out);
    /// ```
    pub fn request(&mut self, source: Source) {
        self.states[source.index()] = SourceState::Latched;
        log::trace!("IRQ {} requested", source.name());
    }

    /// Current registered outputs
    pub fn outputs(&self) -> ControllerOutputs {
        self.outputs
    }

    /// Source the outputs are presenting, if any
    pub fn serviced(&self) -> Option<Source> {
        self.serviced
    }

    pub fn source_state(&self, source: Source) -> SourceState {
        self.states[source.index()]
    }

    /// Latched pending flags in `mip` layout
    pub fn pending_bits(&self) -> InterruptBits {
        Source::PRIORITY
            .into_iter()
            .filter(|s| self.states[s.index()] == SourceState::Latched)
            .fold(InterruptBits::empty(), |acc, s| acc | s.bit())
    }

    /// Registered per-source enables in `mie` layout
    pub fn enabled_bits(&self) -> InterruptBits {
        Source::PRIORITY
            .into_iter()
            .filter(|s| self.enables[s.index()])
            .fold(InterruptBits::empty(), |acc, s| acc | s.bit())
    }

    pub fn global_enable(&self) -> bool {
        self.global_enable
    }

    /// Rising edges seen since construction
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Branch target for a source under the registered mode
    fn vector_address(&self, source: Source) -> u32 {
        if self.vectored_mode {
            self.vector_base.wrapping_add(4 * source.cause_code())
        } else {
            self.vector_base
        }
    }

    fn evaluate(&mut self, ack_completed: bool) {
        let serviced = arbitrate(
            self.global_enable,
            self.enabled_bits(),
            self.pending_bits(),
        );

        if serviced != self.serviced {
            log::debug!(
                "Serviced interrupt: {} -> {}",
                self.serviced.map_or("none", Source::name),
                serviced.map_or("none", Source::name)
            );
        }
        self.serviced = serviced;

        let interrupt_address = match serviced {
            Some(source) => self.vector_address(source),
            None => self.outputs.interrupt_address,
        };

        self.outputs = ControllerOutputs {
            interrupt_out: serviced.is_some(),
            interrupt_ack: ack_completed,
            interrupt_address,
        };
    }
}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSave for InterruptController {
    type State = InterruptState;

    fn to_state(&self) -> InterruptState {
        InterruptState {
            pending: self.pending_bits().bits(),
            enabled: self.enabled_bits().bits(),
            last_raw: self.last_raw,
            global_enable: self.global_enable,
            vector_base: self.vector_base,
            vectored_mode: self.vectored_mode,
            interrupt_out: self.outputs.interrupt_out,
            interrupt_ack: self.outputs.interrupt_ack,
            interrupt_address: self.outputs.interrupt_address,
            serviced: self.serviced.map(Source::cause_code),
            cycles: self.cycles,
        }
    }

    fn restore_from_state(&mut self, state: &InterruptState) {
        let pending = InterruptBits::from_bits_truncate(state.pending);
        let enabled = InterruptBits::from_bits_truncate(state.enabled);

        for source in Source::PRIORITY {
            let i = source.index();
            self.states[i] = if pending.contains(source.bit()) {
                SourceState::Latched
            } else {
                SourceState::Idle
            };
            self.enables[i] = enabled.contains(source.bit());
        }

        self.last_raw = state.last_raw;
        self.global_enable = state.global_enable;
        self.vector_base = state.vector_base;
        self.vectored_mode = state.vectored_mode;
        self.outputs = ControllerOutputs {
            interrupt_out: state.interrupt_out,
            interrupt_ack: state.interrupt_ack,
            interrupt_address: state.interrupt_address,
        };
        self.serviced = state.serviced.and_then(Source::from_cause_code);
        self.cycles = state.cycles;
    }
}
