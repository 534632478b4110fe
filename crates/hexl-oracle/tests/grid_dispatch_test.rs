// Copyright 2025 eraflo
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

use hexl_core::value::write_values;
use hexl_oracle::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Plays the role of a device: every workitem stores its current
/// workgroup size at its flattened absolute id.
fn run_kernel(geometry: &GridGeometry) -> Vec<Value> {
    let mut out = vec![Value::U32(0); geometry.grid_size() as usize];
    for point in geometry.points() {
        let id = geometry.workitem_flat_abs_id(point) as usize;
        out[id] = Value::U32(geometry.current_workgroup_size(point, 0) as u32);
    }
    out
}

#[test]
fn test_partial_workgroup_dispatch_validates() {
    init_logging();

    // --- 1. ARRANGE ---
    let geometry = GridGeometry::new_1d(42, 11);
    let expected: Vec<Value> = (0..42u32)
        .map(|i| Value::U32(if i < 33 { 11 } else { 9 }))
        .collect();

    // --- 2. ACT ---
    let actual = run_kernel(&geometry);
    let summary = validate_values(&expected, &actual, ComparisonConfig::default());

    // --- 3. ASSERT ---
    assert_eq!(geometry.workgroup_count(), 4);
    assert_eq!(summary.checks, 42);
    assert!(summary.passed(), "{summary}");
}

#[test]
fn test_corrupted_output_buffer_is_reported() {
    init_logging();

    // --- 1. ARRANGE ---
    let geometry = GridGeometry::new(2, Dim::new(8, 6, 1), Dim::new(4, 4, 1));
    let expected: Vec<Value> = geometry
        .points()
        .map(|p| Value::U32(geometry.workgroup_flat_id(p) as u32))
        .collect();
    let mut actual = expected.clone();
    actual[13] = Value::U32(7);
    actual[40] = Value::U32(3);

    // --- 2. ACT ---
    let summary = validate_buffer(
        &write_values(&expected),
        &write_values(&actual),
        ValueType::U32,
        ComparisonConfig::default(),
    )
    .expect("buffers are well formed");

    // --- 3. ASSERT ---
    assert_eq!(summary.checks, 48);
    assert_eq!(summary.failed, 2);
    // Element 13 is (5, 1) in workgroup 1; element 40 is (0, 5) in workgroup 2.
    assert_eq!(summary.max_error, Some(Deviation::Exact(Value::U32(6))));
    assert_eq!(summary.max_error_index, 13);
}

#[test]
fn test_every_point_round_trips_through_its_flat_id() {
    let geometry = GridGeometry::new(3, Dim::new(5, 3, 4), Dim::new(2, 2, 3));
    let mut seen = vec![false; geometry.grid_size() as usize];
    for point in geometry.points() {
        let id = geometry.workitem_flat_abs_id(point);
        assert_eq!(geometry.point(id), point);
        assert!(!seen[id as usize]);
        seen[id as usize] = true;
        for d in 0..3 {
            assert!(geometry.workitem_id(point, d) < geometry.current_workgroup_size(point, d));
        }
    }
    assert!(seen.into_iter().all(|s| s));
}
