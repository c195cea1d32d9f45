// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planning results.

use serde::{Deserialize, Serialize};

use super::ids::PlantId;

/// One placed plant instance, axis-aligned, in grid cells.
///
/// Invariant: lies fully within the planning grid and overlaps no other
/// placed instance of the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPlant {
    pub plant_id: PlantId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PlacedPlant {
    /// First column to the right of the footprint.
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// First row below the footprint.
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &PlacedPlant) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Outcome of one planning run.
///
/// `rejected` holds one entry per unit that found no valid position, so for
/// every known plant id: placed count + rejected count == requested quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    pub placed: Vec<PlacedPlant>,
    pub rejected: Vec<PlantId>,
    pub global_score: i64,
}

impl PlanResult {
    pub fn placed_count(&self, plant_id: PlantId) -> usize {
        self.placed.iter().filter(|p| p.plant_id == plant_id).count()
    }

    pub fn rejected_count(&self, plant_id: PlantId) -> usize {
        self.rejected.iter().filter(|&&id| id == plant_id).count()
    }
}
