// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bed discretization and the mutable occupancy grid of one planning run.

use std::fmt;

use crate::model::ids::PlantId;

/// Discretization unit: one grid cell is a 5 cm square of bed.
pub const CELL_CM: u32 = 5;

/// Row-major occupancy arena over the discretized bed.
///
/// Cells hold the owning plant-type id, with `0` reserved for free (which is
/// why [`PlantId`] is non-zero). The set of non-free cells is always exactly
/// the union of the placed footprints: [`Grid::fill_rect`] is only ever
/// applied to rectangles that [`Grid::is_free_rect`] accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl Grid {
    /// Discretizes physical bed dimensions by flooring both axes to whole
    /// cells. A bed narrower or shorter than one cell cannot hold anything
    /// and is a hard failure.
    pub fn discretize(width_cm: u32, height_cm: u32) -> Result<Self, GridError> {
        Self::new(width_cm / CELL_CM, height_cm / CELL_CM)
            .map_err(|_| GridError::InvalidDimensions { width_cm, height_cm })
    }

    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions {
                width_cm: width * CELL_CM,
                height_cm: height * CELL_CM,
            });
        }
        let len = (width as usize).checked_mul(height as usize).expect("grid area overflow");
        Ok(Self { width, height, cells: vec![0u32; len] })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn idx_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// The plant occupying `(x, y)`, or `None` when the cell is free or the
    /// coordinate lies outside the grid. Neighbor scans treat both the same
    /// way: nothing to score against.
    pub fn occupant(&self, x: u32, y: u32) -> Option<PlantId> {
        let idx = self.idx_of(x, y)?;
        PlantId::new(self.cells[idx]).ok()
    }

    /// True when the rectangle lies fully inside the grid and every covered
    /// cell is free.
    pub fn is_free_rect(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let in_bounds = x.checked_add(w).is_some_and(|right| right <= self.width)
            && y.checked_add(h).is_some_and(|bottom| bottom <= self.height);
        if !in_bounds {
            return false;
        }
        for dy in 0..h {
            let row_start = (y + dy) as usize * self.width as usize + x as usize;
            let row = &self.cells[row_start..row_start + w as usize];
            if row.iter().any(|&cell| cell != 0) {
                return false;
            }
        }
        true
    }

    /// Marks every cell of the rectangle as owned by `plant`.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, plant: PlantId) {
        debug_assert!(self.is_free_rect(x, y, w, h), "fill_rect target must be free");
        for dy in 0..h {
            let row_start = (y + dy) as usize * self.width as usize + x as usize;
            self.cells[row_start..row_start + w as usize].fill(plant.get());
        }
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    InvalidDimensions { width_cm: u32, height_cm: u32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width_cm, height_cm } => {
                write!(
                    f,
                    "bed {width_cm}x{height_cm}cm discretizes to an empty grid \
                     (cells are {CELL_CM}cm)"
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
