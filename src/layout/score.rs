// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Global compatibility score over a finished layout.

use crate::model::catalog::AffinityTable;
use crate::model::plan::PlacedPlant;

fn axis_gap(a_start: u32, a_len: u32, b_start: u32, b_len: u32) -> u32 {
    let near = a_start.max(b_start);
    let far = (a_start + a_len).min(b_start + b_len);
    near.saturating_sub(far)
}

/// True when the bounding boxes are within one cell of each other on both
/// axes: touching, diagonal, or separated by a single free lane.
pub(crate) fn are_adjacent(a: &PlacedPlant, b: &PlacedPlant) -> bool {
    axis_gap(a.x, a.w, b.x, b.w) <= 1 && axis_gap(a.y, a.h, b.y, b.h) <= 1
}

/// Sums the directional score from the earlier-placed instance's type to the
/// later one's, once per adjacent unordered pair. A plain sum: no
/// normalization by pair count or bed area.
pub(crate) fn global_score(placed: &[PlacedPlant], affinities: &AffinityTable) -> i64 {
    let mut total = 0i64;
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if are_adjacent(a, b) {
                total += affinities.score(a.plant_id, b.plant_id) as i64;
            }
        }
    }
    total
}
