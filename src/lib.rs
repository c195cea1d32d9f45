// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Potager — companion-planting layout engine.
//!
//! Given a rectangular bed and a list of (plant type, quantity) line items,
//! the planner discretizes the bed into 5 cm cells and searches for a
//! layout that keeps companion species adjacent and antagonists apart.
//! Catalog and affinity data come from the caller; the engine itself is
//! pure computation with no I/O and no state between requests.

pub mod layout;
pub mod model;
pub mod planner;

pub use layout::{Grid, GridError, CELL_CM};
pub use model::{
    AffinityTable, Catalog, Id, IdError, Limits, LimitsError, PlacedPlant, PlanItem, PlanRequest,
    PlanResult, PlantId, PlantType, PlantTypeError, MAX_AFFINITY, MIN_AFFINITY,
};
pub use planner::{PlanError, Planner, Strategy};
