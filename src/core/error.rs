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

/// Simulator error types
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, RvicError>;

/// Main error type for the simulator
///
/// The hardware models themselves never fail; these errors come from the
/// harness around them (signal access, scenario files, snapshots).
#[derive(Error, Debug)]
pub enum RvicError {
    #[error("Unknown signal '{signal}' on device {device}")]
    UnknownSignal { device: String, signal: String },

    #[error("Signal '{0}' is an output and cannot be driven")]
    ReadOnlySignal(String),

    #[error("Width mismatch on '{signal}': expected {expected} bits, got {got}")]
    WidthMismatch {
        signal: String,
        expected: u8,
        got: u8,
    },

    #[error("Invalid signal literal '{literal}': {reason}")]
    InvalidLiteral { literal: String, reason: String },

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Check failed at cycle {cycle} on '{signal}': expected {expected}, got {actual} ({message})")]
    CheckFailed {
        cycle: u64,
        signal: String,
        expected: String,
        actual: String,
        message: String,
    },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Incompatible snapshot version: expected {expected}, got {got}")]
    IncompatibleSnapshot { expected: u32, got: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
