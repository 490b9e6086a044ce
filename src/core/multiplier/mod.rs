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

//! Signed 16×16→32 Multiplier
//!
//! A single registered stage computing the two's-complement product of two
//! 16-bit operands.
//!
//! ## Ports
//!
//! ```text
//! Signal       | Dir | Width | Meaning
//! -------------|-----|-------|---------------------------------
//! en           | in  | 1     | Register a new product this edge
//! input_A      | in  | 16    | Operand A (two's complement)
//! input_B      | in  | 16    | Operand B (two's complement)
//! final_result | out | 32    | Registered product
//! ```
//!
//! The full product of two 16-bit signed values always fits in 32 bits
//! (the extreme case is `-32768 * -32768 = 0x4000_0000`), so no overflow
//! flag exists.

mod port;

pub use port::MultiplierPort;

use crate::core::snapshot::{MultiplierState, StateSave};

/// Registered signed multiplier
///
/// # Example
///
/// ```
/// use rvic::core::multiplier::Multiplier;
///
/// let mut mul = Multiplier::new();
/// assert_eq!(mul.clock(true, 0x0003, 0x0005), 0x0000_000F);
///
/// // Disabled: the result holds
/// assert_eq!(mul.clock(false, 0x0007, 0x0005), 0x0000_000F);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Multiplier {
    /// Registered product
    result: u32,
}

impl Multiplier {
    pub fn new() -> Self {
        Self { result: 0 }
    }

    /// Combinational product of two 16-bit two's-complement operands
    ///
    /// # Arguments
    ///
    /// * `a` - Operand A bit pattern
    /// * `b` - Operand B bit pattern
    ///
    /// # Returns
    ///
    /// The 32-bit two's-complement product bit pattern
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::multiplier::Multiplier;
    ///
    /// // 2 * -4 = -8
    /// assert_eq!(Multiplier::multiply(0x0002, 0xFFFC), 0xFFFF_FFF8);
    /// ```
    pub fn multiply(a: u16, b: u16) -> u32 {
        let a = a as i16 as i32;
        let b = b as i16 as i32;
        a.wrapping_mul(b) as u32
    }

    /// Advance one rising clock edge
    ///
    /// With `en` high the product of `a` and `b` is registered; otherwise
    /// the previous result holds.
    pub fn clock(&mut self, en: bool, a: u16, b: u16) -> u32 {
        if en {
            self.result = Self::multiply(a, b);
            log::trace!("MUL {:#06X} * {:#06X} = {:#010X}", a, b, self.result);
        }
        self.result
    }

    /// Registered product
    pub fn result(&self) -> u32 {
        self.result
    }

    pub fn reset(&mut self) {
        self.result = 0;
    }
}

impl StateSave for Multiplier {
    type State = MultiplierState;

    fn to_state(&self) -> MultiplierState {
        MultiplierState {
            result: self.result,
        }
    }

    fn restore_from_state(&mut self, state: &MultiplierState) {
        self.result = state.result;
    }
}
