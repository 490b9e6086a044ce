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

//! Runs every bundled scenario file

mod common;

use common::assertions::assert_report_passed;
use common::fixtures::bundled_scenarios;
use rvic::core::config::Config;
use rvic::core::scenario::Scenario;

#[test]
fn test_bundled_scenarios_pass() {
    let paths = bundled_scenarios();
    assert!(!paths.is_empty(), "No bundled scenarios found");

    let config = Config::default();
    for path in paths {
        let scenario = Scenario::load(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
        let report = scenario
            .run(&config)
            .unwrap_or_else(|e| panic!("Failed to run {}: {}", path.display(), e));
        assert_report_passed(&report);
    }
}

#[test]
fn test_multiplier_bench_checks_every_vector() {
    let path = common::fixtures::scenario_dir().join("multiplier_top_level.toml");
    let report = Scenario::load(path).unwrap().run(&Config::default()).unwrap();

    assert_eq!(report.checks.len(), 10);
    assert_eq!(report.cycles, 50);
    assert_report_passed(&report);
}

#[test]
fn test_sample_log_records_every_edge() {
    let path = common::fixtures::scenario_dir().join("priority_service_order.toml");
    let config = Config {
        sample_log: Some("unused.json".into()),
        ..Default::default()
    };

    let report = Scenario::load(path).unwrap().run(&config).unwrap();
    assert_eq!(report.samples.len() as u64, report.cycles);
    assert_eq!(report.samples[0].signals["interrupt_address"], "10000000000000000000000000001100");
}
