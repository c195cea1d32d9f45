// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planning facade: one call from request to finished layout.
//!
//! The planner owns the resolved catalog and affinity tables for its
//! lifetime but holds no per-request state; every `plan` call builds and
//! discards its own grid and intermediate structures.

use std::fmt;

use crate::layout::blocks::{plan_blocks, sequence_blocks, ResolvedItem};
use crate::layout::grid::Grid;
use crate::layout::packer::place_blocks;
use crate::layout::rows::layout_rows;
use crate::layout::score::global_score;
use crate::model::catalog::{AffinityTable, Catalog};
use crate::model::plan::PlanResult;
use crate::model::request::PlanRequest;


/// Which placement strategy a [`Planner`] runs.
///
/// Both honor the same contract (bounds, non-overlap, conservation); they
/// differ in how they trade packing density against layout regularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Free 2D block packing with the multi-criterion position search.
    #[default]
    BlockPacking,
    /// Full-width rows per plant type with inter-row compaction.
    RowFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// The bed discretizes to zero cells on some axis.
    InvalidDimensions { width_cm: u32, height_cm: u32 },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width_cm, height_cm } => {
                write!(f, "bed {width_cm}x{height_cm}cm is too small to hold a single cell")
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Stateless planning engine over a resolved catalog.
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Catalog,
    affinities: AffinityTable,
    strategy: Strategy,
}

impl Planner {
    pub fn new(catalog: Catalog, affinities: AffinityTable) -> Self {
        Self { catalog, affinities, strategy: Strategy::default() }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Plans the layout for one request.
    ///
    /// Line items whose plant id is absent from the catalog are skipped
    /// entirely: their quantity appears in neither `placed` nor `rejected`.
    /// Callers that need to distinguish "skipped" from "rejected" must
    /// compare the result against their request.
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        let mut grid =
            Grid::discretize(request.width_cm, request.height_cm).map_err(|_| {
                PlanError::InvalidDimensions {
                    width_cm: request.width_cm,
                    height_cm: request.height_cm,
                }
            })?;

        let items = self.resolve_items(request);

        let (placed, rejected) = match self.strategy {
            Strategy::BlockPacking => {
                let mut plan = plan_blocks(&items, grid.width(), grid.height());
                let blocks = sequence_blocks(std::mem::take(&mut plan.blocks), &self.affinities);
                let outcome = place_blocks(&mut grid, &blocks, &self.affinities);
                let mut rejected = plan.rejected;
                rejected.extend(outcome.rejected);
                (outcome.placed, rejected)
            }
            Strategy::RowFill => {
                let outcome =
                    layout_rows(&items, grid.width(), grid.height(), &self.affinities);
                (outcome.placed, outcome.rejected)
            }
        };

        let global_score = global_score(&placed, &self.affinities);
        Ok(PlanResult { placed, rejected, global_score })
    }

    fn resolve_items(&self, request: &PlanRequest) -> Vec<ResolvedItem> {
        request
            .items
            .iter()
            .filter(|item| item.quantity > 0)
            .filter_map(|item| {
                let plant = self.catalog.lookup(item.plant_id)?;
                Some(ResolvedItem {
                    plant: plant.id(),
                    width: plant.width(),
                    height: plant.height(),
                    quantity: item.quantity,
                })
            })
            .collect()
    }
}
