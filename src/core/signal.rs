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

//! Width-tagged signal values
//!
//! Every port of a modelled device carries a fixed bit width. [`BitVector`]
//! pairs a raw value with that width so stimulus and expected values can be
//! written the way they appear on a waveform viewer:
//!
//! ```text
//! Literal               | Width           | Value
//! ----------------------|-----------------|-------------
//! "0000000000000011"    | digit count (16)| 3
//! "0b101"               | digit count (3) | 5
//! "0x8000000C"          | 4 * digits (32) | 0x8000000C
//! "-4" / "35"           | from the signal | two's complement
//! ```

use crate::core::error::{Result, RvicError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A value on a signal of known bit width (1 to 64 bits)
///
/// Bits above `width` are always zero.
///
/// # Example
///
/// ```
/// use rvic::core::signal::BitVector;
///
/// let a: BitVector = "0000000000000011".parse().unwrap();
/// assert_eq!(a.width(), 16);
/// assert_eq!(a.value(), 3);
/// assert_eq!(a.to_string(), "0000000000000011");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitVector {
    width: u8,
    bits: u64,
}

impl BitVector {
    /// Widest supported signal
    pub const MAX_WIDTH: u8 = 64;

    /// Create a bit vector, truncating `value` to `width` bits
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or wider than [`BitVector::MAX_WIDTH`].
    pub fn new(width: u8, value: u64) -> Self {
        assert!(
            (1..=Self::MAX_WIDTH).contains(&width),
            "Invalid signal width {}",
            width
        );
        Self {
            width,
            bits: value & mask(width),
        }
    }

    /// Single-bit value
    pub fn bit(value: bool) -> Self {
        Self::new(1, value as u64)
    }

    /// 32-bit value
    pub fn from_u32(value: u32) -> Self {
        Self::new(32, value as u64)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn value(&self) -> u64 {
        self.bits
    }

    /// Lower 32 bits of the value
    pub fn as_u32(&self) -> u32 {
        self.bits as u32
    }

    /// True if any bit is set
    pub fn as_bool(&self) -> bool {
        self.bits != 0
    }

    /// Value interpreted as two's complement at this width
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::signal::BitVector;
    ///
    /// let v = BitVector::new(16, 0xFFFC);
    /// assert_eq!(v.as_i64(), -4);
    /// ```
    pub fn as_i64(&self) -> i64 {
        let shift = 64 - self.width as u32;
        ((self.bits << shift) as i64) >> shift
    }

    /// Zero-extend or truncate to a new width
    pub fn resize(&self, width: u8) -> Self {
        Self::new(width, self.bits)
    }

    /// Parse a literal whose width is implied by its digits
    ///
    /// Plain strings of `0`/`1`, `0b` binary and `0x` hex literals are
    /// accepted. Decimal literals carry no width and need
    /// [`BitVector::parse_with_width`].
    pub fn parse(literal: &str) -> Result<Self> {
        match parse_literal(literal)? {
            Literal::Sized(v) => Ok(v),
            Literal::Decimal(_) => Err(invalid(literal, "decimal literal needs a signal width")),
        }
    }

    /// Parse a literal for a signal of the given width
    ///
    /// Sized literals narrower than `width` are zero-extended; wider ones
    /// are accepted only if the extra high bits are zero. Decimal literals
    /// may be negative and are stored as two's complement.
    ///
    /// # Example
    ///
    /// ```
    /// use rvic::core::signal::BitVector;
    ///
    /// let v = BitVector::parse_with_width("-4", 16).unwrap();
    /// assert_eq!(v.value(), 0xFFFC);
    ///
    /// let addr = BitVector::parse_with_width("0xC", 32).unwrap();
    /// assert_eq!(addr.width(), 32);
    /// assert_eq!(addr.as_u32(), 0xC);
    /// ```
    pub fn parse_with_width(literal: &str, width: u8) -> Result<Self> {
        if !(1..=Self::MAX_WIDTH).contains(&width) {
            return Err(invalid(literal, "signal width out of range"));
        }

        match parse_literal(literal)? {
            Literal::Sized(v) => {
                if v.bits & !mask(width) != 0 {
                    return Err(RvicError::WidthMismatch {
                        signal: literal.to_string(),
                        expected: width,
                        got: v.width,
                    });
                }
                Ok(v.resize(width))
            }
            Literal::Decimal(value) => {
                let fits = if width == 64 {
                    true
                } else if value < 0 {
                    value >= -(1i128 << (width - 1))
                } else {
                    value < (1i128 << width)
                };
                if !fits {
                    return Err(invalid(literal, "value does not fit the signal width"));
                }
                Ok(Self::new(width, value as u64))
            }
        }
    }
}

impl fmt::Display for BitVector {
    /// Binary, most significant bit first, zero-padded to the width
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits, width = self.width as usize)
    }
}

impl FromStr for BitVector {
    type Err = RvicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<bool> for BitVector {
    fn from(value: bool) -> Self {
        Self::bit(value)
    }
}

impl From<u32> for BitVector {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

enum Literal {
    Sized(BitVector),
    Decimal(i128),
}

fn mask(width: u8) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn invalid(literal: &str, reason: &str) -> RvicError {
    RvicError::InvalidLiteral {
        literal: literal.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_digits(literal: &str, digits: &str, radix: u32, bits_per_digit: u32) -> Result<Literal> {
    if digits.is_empty() {
        return Err(invalid(literal, "no digits"));
    }
    let width = digits.len() as u32 * bits_per_digit;
    if width > BitVector::MAX_WIDTH as u32 {
        return Err(invalid(literal, "wider than 64 bits"));
    }
    let value = u64::from_str_radix(digits, radix).map_err(|e| invalid(literal, &e.to_string()))?;
    Ok(Literal::Sized(BitVector::new(width as u8, value)))
}

fn parse_literal(literal: &str) -> Result<Literal> {
    let cleaned: String = literal.trim().chars().filter(|&c| c != '_').collect();

    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        return parse_digits(literal, hex, 16, 4);
    }

    if let Some(bin) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        return parse_digits(literal, bin, 2, 1);
    }

    if !cleaned.is_empty() && cleaned.chars().all(|c| c == '0' || c == '1') {
        return parse_digits(literal, &cleaned, 2, 1);
    }

    cleaned
        .parse::<i128>()
        .map(Literal::Decimal)
        .map_err(|_| invalid(literal, "not a binary, hex or decimal literal"))
}
