// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use potager::{AffinityTable, Catalog, PlanItem, PlanRequest, PlantId, PlantType};

pub fn pid(value: u32) -> PlantId {
    PlantId::new(value).expect("plant id")
}

/// Footprints spanning the seeded catalog's range, from 1x1 herbs to the
/// 9x9 tomato.
pub fn catalog() -> Catalog {
    [
        (1, 9, 9),
        (2, 4, 4),
        (3, 1, 1),
        (4, 2, 2),
        (5, 2, 2),
        (6, 6, 6),
        (7, 4, 4),
        (8, 3, 3),
        (9, 8, 8),
        (10, 2, 2),
    ]
    .into_iter()
    .map(|(id, w, h)| PlantType::new(pid(id), format!("plant-{id}"), w, h).expect("plant"))
    .collect()
}

/// A mixed table: strong companions, strong antagonists, sparse coverage.
pub fn affinities() -> AffinityTable {
    let mut table = AffinityTable::new();
    for (a, b, score) in [
        (1, 2, 40),
        (1, 6, -40),
        (1, 9, -30),
        (3, 4, 35),
        (3, 5, 35),
        (4, 5, 20),
        (2, 7, 10),
        (8, 9, -25),
        (6, 10, 15),
    ] {
        table.set(pid(a), pid(b), score);
        table.set(pid(b), pid(a), score);
    }
    table
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumMixed,
    LargeDense,
}

pub fn request(case: Case) -> PlanRequest {
    let items: Vec<(u32, u32)> = match case {
        Case::Small => vec![(1, 1), (2, 2), (3, 6)],
        Case::MediumMixed => vec![(1, 2), (2, 4), (3, 20), (4, 10), (6, 2), (8, 6)],
        Case::LargeDense => {
            vec![(1, 4), (2, 8), (3, 60), (4, 30), (5, 30), (6, 4), (7, 8), (8, 12), (9, 2), (10, 20)]
        }
    };
    let (width_cm, height_cm) = match case {
        Case::Small => (150, 100),
        Case::MediumMixed => (400, 250),
        Case::LargeDense => (1000, 800),
    };
    PlanRequest::new(
        width_cm,
        height_cm,
        items
            .into_iter()
            .map(|(id, quantity)| PlanItem { plant_id: pid(id), quantity })
            .collect(),
    )
}
