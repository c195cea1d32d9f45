// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Block decomposition and placement ordering.
//!
//! Each line item becomes one rectangular block of same-type units; the
//! sequencer then decides the order blocks are handed to the placer.

use crate::model::catalog::AffinityTable;
use crate::model::ids::PlantId;

/// A line item after catalog resolution: footprint in cells plus quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedItem {
    pub plant: PlantId,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
}

/// A rectangular batch of same-type units grouped for one placement attempt.
///
/// `width`/`height`/`area` describe the widest arrangement (`max_cols`
/// columns); the placer re-derives narrower arrangements itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Block {
    pub plant: PlantId,
    pub unit_w: u32,
    pub unit_h: u32,
    pub quantity: u32,
    pub max_cols: u32,
    pub width: u32,
    pub height: u32,
    pub area: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BlockPlan {
    pub blocks: Vec<Block>,
    /// One entry per unit whose footprint exceeds the bed on either axis.
    pub rejected: Vec<PlantId>,
}

fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// Computes one block per resolved item, rejecting items whose footprint
/// cannot fit the bed on some axis regardless of position.
pub(crate) fn plan_blocks(items: &[ResolvedItem], grid_w: u32, grid_h: u32) -> BlockPlan {
    let mut plan = BlockPlan::default();

    for item in items {
        if item.width > grid_w || item.height > grid_h {
            plan.rejected.extend(std::iter::repeat(item.plant).take(item.quantity as usize));
            continue;
        }

        let max_cols = grid_w / item.width;
        let rows = ceil_div(item.quantity, max_cols);
        let width = item.quantity.min(max_cols) * item.width;
        let height = rows * item.height;

        plan.blocks.push(Block {
            plant: item.plant,
            unit_w: item.width,
            unit_h: item.height,
            quantity: item.quantity,
            max_cols,
            width,
            height,
            area: width as u64 * height as u64,
        });
    }

    plan
}

/// Orders blocks so mutually friendly plants become placement neighbors.
///
/// Starts from the largest block, then greedily appends the remaining block
/// with the best directional score from the last appended block's plant,
/// breaking ties by descending area and then by input order. The placer
/// seats each block next to already occupied cells, so consecutive blocks
/// tend to touch: chaining by affinity pulls companions together and pushes
/// antagonists apart in the sequence.
pub(crate) fn sequence_blocks(blocks: Vec<Block>, affinities: &AffinityTable) -> Vec<Block> {
    if blocks.len() <= 1 {
        return blocks;
    }

    let mut remaining = blocks;
    // Stable: equal areas keep their request order.
    remaining.sort_by(|a, b| b.area.cmp(&a.area));

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let last = ordered.last().expect("ordered is non-empty").plant;
        let mut best_idx = 0;
        let mut best_key: Option<(i32, u64)> = None;
        for (idx, block) in remaining.iter().enumerate() {
            let key = (affinities.score(last, block.plant), block.area);
            if best_key.map_or(true, |best_key| key > best_key) {
                best_key = Some(key);
                best_idx = idx;
            }
        }
        ordered.push(remaining.remove(best_idx));
    }

    ordered
}
