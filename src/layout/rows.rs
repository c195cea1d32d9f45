// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Row-fill placement strategy with inter-row compaction.
//!
//! Instead of free 2D packing, each line item becomes full-width rows of its
//! own type, row groups are ordered to put companions next to each other,
//! and a compaction pass pulls trailing units into earlier rows' gaps when
//! the stacked height would overflow the bed.

use crate::model::catalog::AffinityTable;
use crate::model::ids::PlantId;
use crate::model::plan::PlacedPlant;

use super::blocks::ResolvedItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RowOutcome {
    pub placed: Vec<PlacedPlant>,
    pub rejected: Vec<PlantId>,
}

/// All rows produced for one line item. Rows of a group stay contiguous in
/// the vertical stacking; only whole groups are reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowGroup {
    plant: PlantId,
    unit_w: u32,
    unit_h: u32,
    per_row: u32,
    quantity: u32,
    area: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowUnit {
    plant: PlantId,
    x: u32,
    width: u32,
    height: u32,
    /// Serial of the row this unit was originally laid out in. Units are
    /// free to return to their own row but never migrate into a *different*
    /// row of their own type (that would undo a prior compaction).
    home: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LayoutRow {
    serial: usize,
    resident: PlantId,
    height: u32,
    /// Left-packed: units stay contiguous from x = 0, so the trailing edge
    /// is also the occupied width.
    units: Vec<RowUnit>,
}

impl LayoutRow {
    fn trailing_edge(&self) -> u32 {
        self.units.last().map_or(0, |unit| unit.x + unit.width)
    }

    fn gap(&self, grid_w: u32) -> u32 {
        grid_w - self.trailing_edge()
    }
}

fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// Lays out the resolved items as stacked rows, compacting when the stack
/// overflows the bed, and rejects whatever still does not fit.
pub(crate) fn layout_rows(
    items: &[ResolvedItem],
    grid_w: u32,
    grid_h: u32,
    affinities: &AffinityTable,
) -> RowOutcome {
    let mut outcome = RowOutcome::default();

    let groups = build_groups(items, grid_w, grid_h, &mut outcome.rejected);
    let groups = sequence_groups(groups, affinities);
    let mut rows = materialize_rows(&groups);

    if total_height(&rows) > grid_h {
        compact(&mut rows, grid_w, affinities);
    }

    // Emit surviving rows; rows whose band still overflows reject as units.
    let mut y = 0u32;
    for row in &rows {
        if y + row.height > grid_h {
            outcome.rejected.extend(row.units.iter().map(|unit| unit.plant));
        } else {
            outcome.placed.extend(row.units.iter().map(|unit| PlacedPlant {
                plant_id: unit.plant,
                x: unit.x,
                y,
                w: unit.width,
                h: unit.height,
            }));
        }
        y += row.height;
    }

    outcome
}

fn build_groups(
    items: &[ResolvedItem],
    grid_w: u32,
    grid_h: u32,
    rejected: &mut Vec<PlantId>,
) -> Vec<RowGroup> {
    let mut groups = Vec::with_capacity(items.len());
    for item in items {
        if item.width > grid_w || item.height > grid_h {
            rejected.extend(std::iter::repeat(item.plant).take(item.quantity as usize));
            continue;
        }
        let per_row = grid_w / item.width;
        let rows = ceil_div(item.quantity, per_row);
        let width = item.quantity.min(per_row) * item.width;
        let height = rows * item.height;
        groups.push(RowGroup {
            plant: item.plant,
            unit_w: item.width,
            unit_h: item.height,
            per_row,
            quantity: item.quantity,
            area: width as u64 * height as u64,
        });
    }
    groups
}

/// Up to this many groups, every permutation is scored exactly.
const EXHAUSTIVE_LIMIT: usize = 8;

fn mutual_affinity(affinities: &AffinityTable, a: PlantId, b: PlantId) -> i64 {
    affinities.score(a, b) as i64 + affinities.score(b, a) as i64
}

fn adjacency_sum(order: &[usize], groups: &[RowGroup], affinities: &AffinityTable) -> i64 {
    order
        .windows(2)
        .map(|pair| mutual_affinity(affinities, groups[pair[0]].plant, groups[pair[1]].plant))
        .sum()
}

/// Orders row groups so vertically adjacent groups like each other.
///
/// Small sets are solved exactly; larger ones fall back to the same greedy
/// chaining the block sequencer uses, seeded by the group with the largest
/// total absolute affinity toward all others.
fn sequence_groups(groups: Vec<RowGroup>, affinities: &AffinityTable) -> Vec<RowGroup> {
    if groups.len() <= 1 {
        return groups;
    }
    if groups.len() <= EXHAUSTIVE_LIMIT {
        best_permutation(groups, affinities)
    } else {
        greedy_chain(groups, affinities)
    }
}

fn best_permutation(groups: Vec<RowGroup>, affinities: &AffinityTable) -> Vec<RowGroup> {
    let n = groups.len();
    let mut indices = (0..n).collect::<Vec<_>>();
    let mut best = indices.clone();
    let mut best_sum = adjacency_sum(&indices, &groups, affinities);

    // Heap's algorithm, iterative. The identity permutation is scored first,
    // so request order wins exact ties.
    let mut stack = vec![0usize; n];
    let mut i = 0;
    while i < n {
        if stack[i] < i {
            if i % 2 == 0 {
                indices.swap(0, i);
            } else {
                indices.swap(stack[i], i);
            }
            let sum = adjacency_sum(&indices, &groups, affinities);
            if sum > best_sum {
                best_sum = sum;
                best = indices.clone();
            }
            stack[i] += 1;
            i = 0;
        } else {
            stack[i] = 0;
            i += 1;
        }
    }

    best.into_iter().map(|idx| groups[idx]).collect()
}

fn greedy_chain(groups: Vec<RowGroup>, affinities: &AffinityTable) -> Vec<RowGroup> {
    let mut remaining = groups;

    // Seed: the group with the strongest absolute pull toward the rest.
    let mut seed_idx = 0;
    let mut seed_weight = i64::MIN;
    for (idx, group) in remaining.iter().enumerate() {
        let weight = remaining
            .iter()
            .filter(|other| other.plant != group.plant)
            .map(|other| {
                (affinities.score(group.plant, other.plant).unsigned_abs() as i64)
                    + (affinities.score(other.plant, group.plant).unsigned_abs() as i64)
            })
            .sum::<i64>();
        if weight > seed_weight {
            seed_weight = weight;
            seed_idx = idx;
        }
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(seed_idx));

    while !remaining.is_empty() {
        let last = ordered.last().expect("ordered is non-empty").plant;
        let mut best_idx = 0;
        let mut best_key: Option<(i32, u64)> = None;
        for (idx, group) in remaining.iter().enumerate() {
            let key = (affinities.score(last, group.plant), group.area);
            if best_key.map_or(true, |best_key| key > best_key) {
                best_key = Some(key);
                best_idx = idx;
            }
        }
        ordered.push(remaining.remove(best_idx));
    }

    ordered
}

fn materialize_rows(groups: &[RowGroup]) -> Vec<LayoutRow> {
    let mut rows = Vec::new();
    let mut serial = 0;
    for group in groups {
        let mut remaining = group.quantity;
        while remaining > 0 {
            let count = remaining.min(group.per_row);
            let units = (0..count)
                .map(|col| RowUnit {
                    plant: group.plant,
                    x: col * group.unit_w,
                    width: group.unit_w,
                    height: group.unit_h,
                    home: serial,
                })
                .collect();
            rows.push(LayoutRow {
                serial,
                resident: group.plant,
                height: group.unit_h,
                units,
            });
            serial += 1;
            remaining -= count;
        }
    }
    rows
}

fn total_height(rows: &[LayoutRow]) -> u32 {
    rows.iter().map(|row| row.height).sum()
}

fn axis_gap(a_start: u32, a_len: u32, b_start: u32, b_len: u32) -> u32 {
    let near = a_start.max(b_start);
    let far = (a_start + a_len).min(b_start + b_len);
    near.saturating_sub(far)
}

/// Walks rows top-down, filling each row's trailing gap from donors further
/// down the stack until no candidate move remains.
fn compact(rows: &mut Vec<LayoutRow>, grid_w: u32, affinities: &AffinityTable) {
    let mut target = 0;
    while target < rows.len() {
        loop {
            let gap = rows[target].gap(grid_w);
            if gap == 0 {
                break;
            }
            // A consumed donor above the target shifts its index.
            match fill_gap_once(rows, target, gap, affinities) {
                Some(new_target) => target = new_target,
                None => break,
            }
        }
        target += 1;
    }
}

/// Attempts one move into `target`'s trailing gap and returns the target's
/// (possibly shifted) index, or `None` when no candidate move remains.
/// Intact donor rows are preferred over splitting a row; donors are scanned
/// bottom-most first, shrinking the tail of the stack as early as possible.
fn fill_gap_once(
    rows: &mut Vec<LayoutRow>,
    target: usize,
    gap: u32,
    affinities: &AffinityTable,
) -> Option<usize> {
    // Whole-row moves first (fragmentation avoidance).
    for donor in (0..rows.len()).rev() {
        if donor == target || rows[donor].units.is_empty() {
            continue;
        }
        if rows[donor].trailing_edge() > gap {
            continue;
        }
        let mut edge = rows[target].trailing_edge();
        let mut all_admissible = true;
        for unit in &rows[donor].units {
            if !unit_admissible(rows, target, unit, edge, affinities) {
                all_admissible = false;
                break;
            }
            edge += unit.width;
        }
        if all_admissible {
            let mut moved = std::mem::take(&mut rows[donor].units);
            let mut edge = rows[target].trailing_edge();
            for unit in &mut moved {
                unit.x = edge;
                edge += unit.width;
            }
            rows[target].units.extend(moved);
            rows.remove(donor);
            return Some(if donor < target { target - 1 } else { target });
        }
    }

    // Otherwise split: take a single trailing unit.
    for donor in (0..rows.len()).rev() {
        if donor == target {
            continue;
        }
        let Some(unit) = rows[donor].units.last().copied() else {
            continue;
        };
        let x = rows[target].trailing_edge();
        if unit.width > gap || !unit_admissible(rows, target, &unit, x, affinities) {
            continue;
        }
        rows[donor].units.pop();
        let mut unit = unit;
        unit.x = x;
        rows[target].units.push(unit);
        if rows[donor].units.is_empty() {
            rows.remove(donor);
            return Some(if donor < target { target - 1 } else { target });
        }
        return Some(target);
    }

    None
}

/// A unit may join `target`'s band at offset `x` when it fits the row
/// height, is not a pulled-back resident, and creates no hostile adjacency:
/// neither with horizontal neighbors within one cell in the target row, nor
/// with vertically adjacent units in the rows immediately above and below.
fn unit_admissible(
    rows: &[LayoutRow],
    target: usize,
    unit: &RowUnit,
    x: u32,
    affinities: &AffinityTable,
) -> bool {
    let row = &rows[target];
    if unit.height > row.height {
        return false;
    }
    if unit.plant == row.resident && unit.home != row.serial {
        return false;
    }

    let horizontal_ok = row
        .units
        .iter()
        .filter(|other| axis_gap(x, unit.width, other.x, other.width) <= 1)
        .all(|other| !affinities.is_hostile_pair(unit.plant, other.plant));
    if !horizontal_ok {
        return false;
    }

    for neighbor_row in [target.checked_sub(1), target.checked_add(1)] {
        let Some(neighbor_row) = neighbor_row.and_then(|idx| rows.get(idx)) else {
            continue;
        };
        let vertical_ok = neighbor_row
            .units
            .iter()
            .filter(|other| axis_gap(x, unit.width, other.x, other.width) <= 1)
            .all(|other| !affinities.is_hostile_pair(unit.plant, other.plant));
        if !vertical_ok {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::{build_groups, layout_rows, sequence_groups, RowOutcome};
    use crate::layout::blocks::ResolvedItem;
    use crate::model::catalog::AffinityTable;
    use crate::model::fixtures::{pid, BASIL, CABBAGE, CARROT, LEEK, LETTUCE, ONION, TOMATO};
    use crate::model::ids::PlantId;
    use crate::model::plan::PlacedPlant;

    fn item(plant: u32, width: u32, height: u32, quantity: u32) -> ResolvedItem {
        ResolvedItem { plant: pid(plant), width, height, quantity }
    }

    fn positions_of(outcome: &RowOutcome, plant: PlantId) -> Vec<(u32, u32)> {
        outcome
            .placed
            .iter()
            .filter(|p| p.plant_id == plant)
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn one_item_fills_rows_left_to_right_then_down() {
        let outcome = layout_rows(&[item(ONION, 2, 2, 7)], 10, 10, &AffinityTable::new());

        assert!(outcome.rejected.is_empty());
        assert_eq!(
            positions_of(&outcome, pid(ONION)),
            vec![(0, 0), (2, 0), (4, 0), (6, 0), (8, 0), (0, 2), (2, 2)]
        );
    }

    #[test]
    fn groups_stack_in_sequence_order_with_cumulative_offsets() {
        let outcome = layout_rows(
            &[item(ONION, 2, 2, 5), item(LETTUCE, 4, 4, 2)],
            10,
            10,
            &AffinityTable::new(),
        );

        assert!(outcome.rejected.is_empty());
        assert_eq!(positions_of(&outcome, pid(LETTUCE)), vec![(0, 2), (4, 2)]);
    }

    #[test]
    fn oversize_footprints_reject_before_row_building() {
        let outcome = layout_rows(
            &[item(CABBAGE, 12, 2, 3), item(ONION, 2, 2, 1)],
            10,
            10,
            &AffinityTable::new(),
        );
        assert_eq!(outcome.rejected, vec![pid(CABBAGE); 3]);
        assert_eq!(outcome.placed.len(), 1);

        let outcome = layout_rows(&[item(CABBAGE, 2, 12, 3)], 10, 10, &AffinityTable::new());
        assert_eq!(outcome.rejected, vec![pid(CABBAGE); 3]);
    }

    #[test]
    fn permutation_search_places_the_bridging_group_in_the_middle() {
        let mut affinities = AffinityTable::new();
        affinities.set(pid(CARROT), pid(ONION), 35);
        affinities.set(pid(ONION), pid(LEEK), 20);
        affinities.set(pid(CARROT), pid(LEEK), -40);

        // Request order deliberately puts the antagonists next to each other.
        let groups = build_groups(
            &[item(CARROT, 1, 1, 3), item(LEEK, 2, 2, 3), item(ONION, 2, 2, 3)],
            10,
            10,
            &mut Vec::new(),
        );
        let ordered = sequence_groups(groups, &affinities);
        let sequence = ordered.iter().map(|g| g.plant).collect::<Vec<_>>();

        assert_eq!(sequence[1], pid(ONION), "onion bridges carrot and leek: {sequence:?}");
    }

    #[test]
    fn greedy_chain_kicks_in_above_the_permutation_limit() {
        let mut affinities = AffinityTable::new();
        affinities.set(pid(TOMATO), pid(BASIL), 40);
        affinities.set(pid(BASIL), pid(TOMATO), 40);

        // Nine single-row groups: too many for exhaustive search.
        let items = (1..=9).map(|n| item(n, 2, 2, 1)).collect::<Vec<_>>();
        let groups = build_groups(&items, 10, 10, &mut Vec::new());
        let ordered = sequence_groups(groups, &affinities);
        let sequence = ordered.iter().map(|g| g.plant).collect::<Vec<_>>();

        assert_eq!(sequence.len(), 9);
        // The only scored pair seeds the chain and stays adjacent.
        assert_eq!(&sequence[..2], &[pid(TOMATO), pid(BASIL)]);
    }

    #[test]
    fn full_rows_with_no_gaps_reject_the_overflow() {
        // Five onions per row; twelve need three rows but only two fit.
        let outcome = layout_rows(&[item(ONION, 2, 2, 12)], 10, 4, &AffinityTable::new());

        assert_eq!(outcome.placed.len(), 10);
        assert_eq!(outcome.rejected, vec![pid(ONION); 2]);
    }

    #[test]
    fn compaction_pulls_a_trailing_row_into_a_gap() {
        // Lettuce row: two 4-wide units, 2-cell gap. Onion row: full.
        // Carrot row would overflow, but its single unit fits the gap.
        let outcome = layout_rows(
            &[item(LETTUCE, 4, 2, 2), item(ONION, 2, 2, 5), item(CARROT, 2, 2, 1)],
            10,
            4,
            &AffinityTable::new(),
        );

        assert!(outcome.rejected.is_empty());
        assert_eq!(positions_of(&outcome, pid(CARROT)), vec![(8, 0)]);
        assert_eq!(outcome.placed.len(), 8);
    }

    #[test]
    fn compaction_refuses_moves_that_create_hostile_adjacency() {
        let mut affinities = AffinityTable::new();
        affinities.set(pid(CARROT), pid(LETTUCE), -50);

        let outcome = layout_rows(
            &[item(LETTUCE, 4, 2, 2), item(CARROT, 2, 2, 1)],
            10,
            2,
            &affinities,
        );

        // The gap is there, but filling it would seat carrot against a
        // hostile lettuce; the unit is rejected instead.
        assert_eq!(outcome.placed.len(), 2);
        assert_eq!(outcome.rejected, vec![pid(CARROT)]);
    }

    #[test]
    fn trailing_units_never_migrate_into_a_sibling_row_of_their_own_type() {
        // Seven onions: one full row plus a two-unit row that overflows the
        // bed. The full row's trailing unit may not hop rows, and the
        // partial row cannot be rescued.
        let outcome = layout_rows(&[item(ONION, 2, 2, 7)], 10, 2, &AffinityTable::new());

        assert_eq!(outcome.placed.len(), 5);
        assert_eq!(outcome.rejected, vec![pid(ONION); 2]);
        assert!(outcome.placed.iter().all(|p: &PlacedPlant| p.y == 0));
    }

    #[test]
    fn conservation_holds_per_item() {
        let items =
            [item(LETTUCE, 4, 2, 3), item(ONION, 2, 2, 9), item(CARROT, 1, 1, 4)];
        let outcome = layout_rows(&items, 10, 6, &AffinityTable::new());

        for item in &items {
            let placed = outcome.placed.iter().filter(|p| p.plant_id == item.plant).count();
            let rejected = outcome.rejected.iter().filter(|&&id| id == item.plant).count();
            assert_eq!(placed + rejected, item.quantity as usize, "plant {}", item.plant);
        }
    }
}
