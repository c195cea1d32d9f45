// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planning request types and caller-side limits.
//!
//! The planner itself only hard-fails on beds that discretize to zero; the
//! remaining bounds live in [`Limits`] and are enforced by callers before
//! invoking the engine, matching the request-handling collaborator's role.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::PlantId;

/// One requested line item: a plant type and how many units of it to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub plant_id: PlantId,
    pub quantity: u32,
}

/// A planning request over a physical bed, dimensions in centimeters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub width_cm: u32,
    pub height_cm: u32,
    pub items: Vec<PlanItem>,
}

impl PlanRequest {
    pub fn new(width_cm: u32, height_cm: u32, items: Vec<PlanItem>) -> Self {
        Self { width_cm, height_cm, items }
    }
}

/// Input bounds enforced before planning starts.
///
/// Defaults mirror the shipped selection UI: beds between 1 m and 10 m per
/// side, at most 32 line items, quantities between 1 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min_bed_cm: u32,
    pub max_bed_cm: u32,
    pub max_items: usize,
    pub max_quantity: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self { min_bed_cm: 100, max_bed_cm: 1000, max_items: 32, max_quantity: 100 }
    }
}

impl Limits {
    pub fn validate(&self, request: &PlanRequest) -> Result<(), LimitsError> {
        for dimension_cm in [request.width_cm, request.height_cm] {
            if dimension_cm < self.min_bed_cm || dimension_cm > self.max_bed_cm {
                return Err(LimitsError::BedOutOfRange {
                    dimension_cm,
                    min_cm: self.min_bed_cm,
                    max_cm: self.max_bed_cm,
                });
            }
        }
        if request.items.len() > self.max_items {
            return Err(LimitsError::TooManyItems {
                count: request.items.len(),
                max: self.max_items,
            });
        }
        for item in &request.items {
            if item.quantity == 0 || item.quantity > self.max_quantity {
                return Err(LimitsError::QuantityOutOfRange {
                    plant_id: item.plant_id,
                    quantity: item.quantity,
                    max: self.max_quantity,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitsError {
    BedOutOfRange { dimension_cm: u32, min_cm: u32, max_cm: u32 },
    TooManyItems { count: usize, max: usize },
    QuantityOutOfRange { plant_id: PlantId, quantity: u32, max: u32 },
}

impl fmt::Display for LimitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BedOutOfRange { dimension_cm, min_cm, max_cm } => {
                write!(f, "bed dimension {dimension_cm}cm outside [{min_cm}, {max_cm}]cm")
            }
            Self::TooManyItems { count, max } => {
                write!(f, "{count} line items exceed the maximum of {max}")
            }
            Self::QuantityOutOfRange { plant_id, quantity, max } => {
                write!(f, "quantity {quantity} for plant {plant_id} outside [1, {max}]")
            }
        }
    }
}

impl std::error::Error for LimitsError {}
