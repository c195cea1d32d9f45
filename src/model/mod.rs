// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Catalog and affinity tables come from the storage collaborator; requests
//! and results are the wire surface of one planning run.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod plan;
pub mod request;

pub use catalog::{
    AffinityTable, Catalog, PlantType, PlantTypeError, MAX_AFFINITY, MIN_AFFINITY,
};
pub use ids::{Id, IdError, PlantId};
pub use plan::{PlacedPlant, PlanResult};
pub use request::{Limits, LimitsError, PlanItem, PlanRequest};
