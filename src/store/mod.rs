// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the cached inventory.
//!
//! The inventory snapshot holds discovered nodes, connection records per kind and saved diagram
//! and tile layouts. It also serves as an offline connection source.

pub mod inventory;

pub use inventory::{InventorySnapshot, NamedNodeSet, NodeRecord, StoreError};
