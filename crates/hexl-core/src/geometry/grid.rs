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

//! Decomposition of an N-D dispatch grid into workgroups and waves.
//!
//! A [`GridGeometry`] answers every "which lane am I" question a conformance
//! test asks about a workitem, given the workitem's absolute point in the grid.
//! All queries are pure functions of the geometry and the point.

use super::Dim;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a dispatch: grid size, workgroup size and dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridGeometry {
    n_dim: u32,
    grid_size: Dim,
    workgroup_size: Dim,
}

impl GridGeometry {
    /// Creates a new geometry.
    ///
    /// # Panics
    /// Panics if `n_dim` is not in `1..=3`, if any component is zero, or if a
    /// component beyond `n_dim` is not 1.
    pub fn new(n_dim: u32, grid_size: Dim, workgroup_size: Dim) -> Self {
        assert!(
            (1..=3).contains(&n_dim),
            "grid dimensionality {n_dim} out of range (expected 1..=3)"
        );
        for d in 0..3 {
            assert!(
                grid_size[d] > 0 && workgroup_size[d] > 0,
                "grid {grid_size} / workgroup {workgroup_size} has a zero component"
            );
            if d >= n_dim as usize {
                assert!(
                    grid_size[d] == 1 && workgroup_size[d] == 1,
                    "unused dimension {d} of a {n_dim}D grid must be 1"
                );
            }
        }
        Self {
            n_dim,
            grid_size,
            workgroup_size,
        }
    }

    /// Convenience constructor for a one-dimensional grid.
    pub fn new_1d(grid_size: u64, workgroup_size: u64) -> Self {
        Self::new(
            1,
            Dim::new(grid_size, 1, 1),
            Dim::new(workgroup_size, 1, 1),
        )
    }

    /// The number of meaningful dimensions.
    #[inline]
    pub fn dimensions(&self) -> u32 {
        self.n_dim
    }

    /// The grid extent along dimension `d`.
    #[inline]
    pub fn grid_size_dim(&self, d: usize) -> u64 {
        self.grid_size.get(d)
    }

    /// The full grid extent.
    #[inline]
    pub fn grid_dim(&self) -> Dim {
        self.grid_size
    }

    /// The total number of workitems in the grid.
    #[inline]
    pub fn grid_size(&self) -> u64 {
        self.grid_size.size()
    }

    /// The nominal workgroup extent along dimension `d`.
    #[inline]
    pub fn workgroup_size_dim(&self, d: usize) -> u64 {
        self.workgroup_size.get(d)
    }

    /// The nominal workgroup extent.
    #[inline]
    pub fn workgroup_dim(&self) -> Dim {
        self.workgroup_size
    }

    /// The total number of workitems in a full workgroup.
    #[inline]
    pub fn workgroup_size(&self) -> u64 {
        self.workgroup_size.size()
    }

    /// The number of workgroups along dimension `d`, counting a trailing
    /// partial workgroup.
    #[inline]
    pub fn grid_groups(&self, d: usize) -> u64 {
        self.grid_size.get(d).div_ceil(self.workgroup_size.get(d))
    }

    /// The total number of workgroups in the grid.
    pub fn workgroup_count(&self) -> u64 {
        (0..3).map(|d| self.grid_groups(d)).product()
    }

    /// The workitem id of `point` within its workgroup along dimension `d`.
    #[inline]
    pub fn workitem_id(&self, point: Dim, d: usize) -> u64 {
        assert!(d < 3, "dimension index {d} out of range (expected 0..3)");
        if d < self.n_dim as usize {
            point.get(d) % self.workgroup_size.get(d)
        } else {
            0
        }
    }

    /// The absolute workitem id of `point` along dimension `d`.
    #[inline]
    pub fn workitem_abs_id(&self, point: Dim, d: usize) -> u64 {
        point.get(d) % self.grid_size.get(d)
    }

    /// The flattened workitem id of `point` within its workgroup.
    pub fn workitem_flat_id(&self, point: Dim) -> u64 {
        let wg = self.workgroup_size;
        self.workitem_id(point, 0)
            + self.workitem_id(point, 1) * wg.x
            + self.workitem_id(point, 2) * wg.x * wg.y
    }

    /// The flattened absolute workitem id of `point` within the grid.
    pub fn workitem_flat_abs_id(&self, point: Dim) -> u64 {
        let grid = self.grid_size;
        self.workitem_abs_id(point, 0)
            + self.workitem_abs_id(point, 1) * grid.x
            + self.workitem_abs_id(point, 2) * grid.x * grid.y
    }

    /// The id of the workgroup containing `point` along dimension `d`.
    #[inline]
    pub fn workgroup_id(&self, point: Dim, d: usize) -> u64 {
        point.get(d) / self.workgroup_size.get(d)
    }

    /// The flattened id of the workgroup containing `point`.
    pub fn workgroup_flat_id(&self, point: Dim) -> u64 {
        self.workgroup_id(point, 0)
            + self.workgroup_id(point, 1) * self.grid_groups(0)
            + self.workgroup_id(point, 2) * self.grid_groups(0) * self.grid_groups(1)
    }

    /// The actual extent along dimension `d` of the workgroup containing `point`.
    ///
    /// This is the nominal workgroup size except in the last workgroup along
    /// `d` when the grid size is not a multiple of the workgroup size.
    pub fn current_workgroup_size(&self, point: Dim, d: usize) -> u64 {
        let wg = self.workgroup_size.get(d);
        let remainder = self.grid_size.get(d) % wg;
        if remainder != 0 && self.workgroup_id(point, d) == self.grid_groups(d) - 1 {
            remainder
        } else {
            wg
        }
    }

    /// The point whose flattened absolute id is `flat_abs_id`.
    ///
    /// This is the exact inverse of [`GridGeometry::workitem_flat_abs_id`].
    pub fn point(&self, flat_abs_id: u64) -> Dim {
        let grid = self.grid_size;
        let plane = grid.x * grid.y;
        let z = flat_abs_id / plane;
        let rest = flat_abs_id % plane;
        Dim::new(rest % grid.x, rest / grid.x, z)
    }

    /// The wave number of `point` for the given wave size.
    #[inline]
    pub fn wave_num(&self, point: Dim, wave_size: u64) -> u64 {
        self.workitem_flat_abs_id(point) / wave_size
    }

    /// The number of waves needed to cover one full workgroup.
    #[inline]
    pub fn waves_per_workgroup(&self, wave_size: u64) -> u64 {
        self.workgroup_size().div_ceil(wave_size)
    }

    /// Iterates over every point of the grid in flattened absolute order.
    pub fn points(&self) -> impl Iterator<Item = Dim> + '_ {
        (0..self.grid_size()).map(move |id| self.point(id))
    }
}

impl fmt::Display for GridGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}D grid {}, workgroup {}",
            self.n_dim, self.grid_size, self.workgroup_size
        )
    }
}
