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

//! Snapshot serialization for the hardware models
//!
//! Captures the complete registered state of the interrupt controller and
//! the multiplier so a run can be paused and resumed later. Restoring a
//! snapshot and continuing to clock is indistinguishable from never having
//! stopped.
//!
//! # Snapshot Format
//!
//! Snapshots are serialized using bincode. Each one carries a version
//! number; loading a snapshot with a different version fails with
//! [`RvicError::IncompatibleSnapshot`].
//!
//! # Example
//!
//! ```no_run
//! use rvic::core::interrupt::InterruptController;
//! use rvic::core::multiplier::Multiplier;
//! use rvic::core::snapshot::Snapshot;
//!
//! let ic = InterruptController::new();
//! let mul = Multiplier::new();
//!
//! let snapshot = Snapshot::capture("boot", &ic, &mul);
//! snapshot.save_to_file("rvic.snap").unwrap();
//!
//! let loaded = Snapshot::load_from_file("rvic.snap").unwrap();
//! assert_eq!(loaded.metadata.label, "boot");
//! ```

use crate::core::error::{Result, RvicError};
use crate::core::interrupt::InterruptController;
use crate::core::multiplier::Multiplier;
use bincode::{config, Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Snapshot version for compatibility checking
///
/// Increment whenever the encoded layout changes.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Complete model snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct Snapshot {
    /// Version number for compatibility checking
    pub version: u32,

    pub metadata: SnapshotMetadata,

    /// Interrupt controller state
    pub interrupt: InterruptState,

    /// Multiplier state
    pub multiplier: MultiplierState,
}

/// Snapshot metadata
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
#[bincode(encode_bounds = "", decode_bounds = "")]
pub struct SnapshotMetadata {
    /// When the snapshot was taken
    #[bincode(with_serde)]
    pub timestamp: DateTime<Utc>,

    /// Free-form label (scenario name, test case, ...)
    pub label: String,

    /// Controller edge count at capture time
    pub cycle: u64,
}

/// Interrupt controller registers
///
/// `pending` and `enabled` use the `mip`/`mie` bit layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct InterruptState {
    pub pending: u32,
    pub enabled: u32,

    /// Raw pending pins seen on the last edge (software, timer, external)
    pub last_raw: [bool; 3],

    pub global_enable: bool,
    pub vector_base: u32,
    pub vectored_mode: bool,

    pub interrupt_out: bool,
    pub interrupt_ack: bool,
    pub interrupt_address: u32,

    /// Cause code of the source the outputs present, if any
    pub serviced: Option<u32>,

    pub cycles: u64,
}

/// Multiplier registers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct MultiplierState {
    pub result: u32,
}

impl Snapshot {
    /// Capture the current state of both models
    ///
    /// # Arguments
    ///
    /// * `label` - Stored in the metadata
    /// * `controller` - Interrupt controller to capture
    /// * `multiplier` - Multiplier to capture
    pub fn capture(label: &str, controller: &InterruptController, multiplier: &Multiplier) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            metadata: SnapshotMetadata {
                timestamp: Utc::now(),
                label: label.to_string(),
                cycle: controller.cycles(),
            },
            interrupt: controller.to_state(),
            multiplier: multiplier.to_state(),
        }
    }

    /// Restore both models from this snapshot
    pub fn restore(&self, controller: &mut InterruptController, multiplier: &mut Multiplier) {
        controller.restore_from_state(&self.interrupt);
        multiplier.restore_from_state(&self.multiplier);
        log::info!(
            "Restored snapshot '{}' (cycle {})",
            self.metadata.label,
            self.metadata.cycle
        );
    }

    /// Encode to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::encode_to_vec(self, config::standard())
            .map_err(|e| RvicError::Snapshot(e.to_string()))
    }

    /// Decode from bytes and verify version compatibility
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Decoding fails
    /// - Version is incompatible
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (snapshot, _): (Snapshot, usize) =
            bincode::decode_from_slice(bytes, config::standard())
                .map_err(|e| RvicError::Snapshot(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(RvicError::IncompatibleSnapshot {
                expected: SNAPSHOT_VERSION,
                got: snapshot.version,
            });
        }

        Ok(snapshot)
    }

    /// Save snapshot to file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be created
    /// - Serialization fails
    /// - Write operation fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let encoded = self.to_bytes()?;
        let mut file = File::create(path)?;
        file.write_all(&encoded)?;
        Ok(())
    }

    /// Load snapshot from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Self::from_bytes(&buffer)
    }
}

/// Trait for components that can be saved and restored
pub trait StateSave {
    /// The state type for this component
    type State: Serialize + for<'de> Deserialize<'de>;

    /// Convert this component to a saveable state
    fn to_state(&self) -> Self::State;

    /// Restore this component from a saved state
    fn restore_from_state(&mut self, state: &Self::State);
}
