// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Potager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Potager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared deterministic test fixtures: a slice of the seeded catalog.

use super::catalog::{AffinityTable, Catalog, PlantType};
use super::ids::PlantId;

pub(crate) const TOMATO: u32 = 1;
pub(crate) const BASIL: u32 = 2;
pub(crate) const CARROT: u32 = 3;
pub(crate) const POTATO: u32 = 4;
pub(crate) const CABBAGE: u32 = 5;
pub(crate) const ONION: u32 = 6;
pub(crate) const LEEK: u32 = 7;
pub(crate) const LETTUCE: u32 = 8;

pub(crate) fn pid(value: u32) -> PlantId {
    PlantId::new(value).expect("plant id")
}

fn plant(id: u32, name: &str, width: u32, height: u32, color: &str) -> PlantType {
    PlantType::new(pid(id), name, width, height).expect("plant type").with_color(color)
}

/// Footprints as seeded for the production catalog (5 cm cells).
pub(crate) fn seeded_catalog() -> Catalog {
    [
        plant(TOMATO, "Tomate", 9, 9, "#ef4444"),
        plant(BASIL, "Basilic", 4, 4, "#15803d"),
        plant(CARROT, "Carotte", 1, 1, "#f97316"),
        plant(POTATO, "Pomme de terre", 6, 6, "#a8a29e"),
        plant(CABBAGE, "Chou", 8, 8, "#22d3ee"),
        plant(ONION, "Oignon", 2, 2, "#d97706"),
        plant(LEEK, "Poireau", 2, 2, "#16a34a"),
        plant(LETTUCE, "Laitue", 4, 4, "#86efac"),
    ]
    .into_iter()
    .collect()
}

fn mutual(table: &mut AffinityTable, a: u32, b: u32, score: i32) {
    table.set(pid(a), pid(b), score);
    table.set(pid(b), pid(a), score);
}

/// The seeded scores are symmetric; the engine must not rely on that, so
/// tests that probe directionality build their own asymmetric tables.
pub(crate) fn seeded_affinities() -> AffinityTable {
    let mut table = AffinityTable::new();
    mutual(&mut table, TOMATO, BASIL, 40);
    mutual(&mut table, TOMATO, LETTUCE, 15);
    mutual(&mut table, TOMATO, POTATO, -40);
    mutual(&mut table, TOMATO, CABBAGE, -30);
    mutual(&mut table, CARROT, ONION, 35);
    mutual(&mut table, CARROT, LEEK, 35);
    mutual(&mut table, ONION, LEEK, 20);
    table
}
