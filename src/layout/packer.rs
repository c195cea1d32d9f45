// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Block placement: multi-criterion position search over the occupancy grid.
//!
//! For each block the placer tries the widest arrangement first, scoring
//! every free position by a lexicographic key, and falls back to smaller
//! sub-groups when no arrangement of the full quantity fits anywhere.

use smallvec::SmallVec;

use crate::model::catalog::AffinityTable;
use crate::model::ids::PlantId;
use crate::model::plan::PlacedPlant;

use super::blocks::Block;
use super::grid::Grid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PackOutcome {
    pub placed: Vec<PlacedPlant>,
    pub rejected: Vec<PlantId>,
}

/// Places blocks in sequence order, mutating the grid as it goes.
pub(crate) fn place_blocks(
    grid: &mut Grid,
    blocks: &[Block],
    affinities: &AffinityTable,
) -> PackOutcome {
    let mut outcome = PackOutcome::default();
    for block in blocks {
        place_one_block(grid, block, affinities, &mut outcome);
    }
    outcome
}

fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

fn place_one_block(
    grid: &mut Grid,
    block: &Block,
    affinities: &AffinityTable,
    outcome: &mut PackOutcome,
) {
    // Full-block attempt: widest arrangement first, stop at the first
    // column count that fits anywhere.
    for cols in (1..=block.quantity.min(block.max_cols)).rev() {
        let rows = ceil_div(block.quantity, cols);
        let bw = cols * block.unit_w;
        let bh = rows * block.unit_h;
        if let Some((bx, by)) = find_position(grid, block.plant, bw, bh, affinities) {
            emit_block(grid, &mut outcome.placed, bx, by, block, cols, block.quantity);
            return;
        }
    }

    // No arrangement of the full quantity fits: peel off progressively
    // smaller sub-groups until everything is placed or nothing fits at all.
    let mut remaining = block.quantity;
    while remaining > 0 {
        let mut placed_sub = None;
        'shapes: for sub_qty in (1..=remaining).rev() {
            for cols in (1..=sub_qty.min(block.max_cols)).rev() {
                let rows = ceil_div(sub_qty, cols);
                let bw = cols * block.unit_w;
                let bh = rows * block.unit_h;
                if let Some((bx, by)) = find_position(grid, block.plant, bw, bh, affinities) {
                    emit_block(grid, &mut outcome.placed, bx, by, block, cols, sub_qty);
                    placed_sub = Some(sub_qty);
                    break 'shapes;
                }
            }
        }

        match placed_sub {
            Some(sub_qty) => remaining -= sub_qty,
            None => {
                // Placement exhausted: not even a single unit fits.
                outcome
                    .rejected
                    .extend(std::iter::repeat(block.plant).take(remaining as usize));
                return;
            }
        }
    }
}

/// Candidate ranking, compared lexicographically from most significant:
/// no antagonist beats any antagonist, touching the same plant type beats
/// not touching it, then the summed affinity of distinct neighbors, then
/// top bias, then left bias.
type CandidateKey = (bool, bool, i64, i64, i64);

fn find_position(
    grid: &Grid,
    plant: PlantId,
    bw: u32,
    bh: u32,
    affinities: &AffinityTable,
) -> Option<(u32, u32)> {
    if bw > grid.width() || bh > grid.height() {
        return None;
    }

    let mut best: Option<(CandidateKey, (u32, u32))> = None;
    for y in 0..=(grid.height() - bh) {
        for x in 0..=(grid.width() - bw) {
            if !grid.is_free_rect(x, y, bw, bh) {
                continue;
            }
            let profile = neighbor_profile(grid, x, y, bw, bh, plant, affinities);
            let key: CandidateKey = (
                !profile.has_enemy,
                profile.has_same,
                profile.score,
                -(y as i64),
                -(x as i64),
            );
            if best.as_ref().map_or(true, |(best_key, _)| key > *best_key) {
                best = Some((key, (x, y)));
            }
        }
    }

    best.map(|(_, pos)| pos)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct NeighborProfile {
    /// Sum of directional scores toward each distinct neighboring type.
    score: i64,
    has_enemy: bool,
    has_same: bool,
}

fn occupant_at(grid: &Grid, x: i64, y: i64) -> Option<PlantId> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    grid.occupant(x, y)
}

/// Scans the 1-cell border around the candidate rectangle (interior cells
/// excluded). Each distinct occupying type contributes its score once.
fn neighbor_profile(
    grid: &Grid,
    x: u32,
    y: u32,
    bw: u32,
    bh: u32,
    plant: PlantId,
    affinities: &AffinityTable,
) -> NeighborProfile {
    let (x, y) = (x as i64, y as i64);
    let (bw, bh) = (bw as i64, bh as i64);

    let mut profile = NeighborProfile::default();
    let mut seen: SmallVec<[PlantId; 8]> = SmallVec::new();

    let mut visit = |nx: i64, ny: i64| {
        let Some(neighbor) = occupant_at(grid, nx, ny) else {
            return;
        };
        if neighbor == plant {
            profile.has_same = true;
        }
        if !seen.contains(&neighbor) {
            seen.push(neighbor);
            let score = affinities.score(plant, neighbor);
            profile.score += score as i64;
            if score < 0 {
                profile.has_enemy = true;
            }
        }
    };

    // Ring walk: the rows above and below (corners included), then the
    // columns either side.
    for nx in (x - 1)..=(x + bw) {
        visit(nx, y - 1);
        visit(nx, y + bh);
    }
    for ny in y..(y + bh) {
        visit(x - 1, ny);
        visit(x + bw, ny);
    }

    profile
}

/// Writes the block's units onto the grid left-to-right, top-to-bottom, and
/// appends one placed instance per unit.
fn emit_block(
    grid: &mut Grid,
    placed: &mut Vec<PlacedPlant>,
    bx: u32,
    by: u32,
    block: &Block,
    cols: u32,
    quantity: u32,
) {
    let mut col = 0;
    let mut row = 0;
    for _ in 0..quantity {
        let x = bx + col * block.unit_w;
        let y = by + row * block.unit_h;
        grid.fill_rect(x, y, block.unit_w, block.unit_h, block.plant);
        placed.push(PlacedPlant { plant_id: block.plant, x, y, w: block.unit_w, h: block.unit_h });
        col += 1;
        if col >= cols {
            col = 0;
            row += 1;
        }
    }
}
