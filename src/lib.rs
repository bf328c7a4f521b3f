// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mediamap: shared topology model for media infrastructure diagrams.
//!
//! One [`model::GraphModel`] holds every discovered resource and connection. Alarm cycles and
//! connection batches update it minimally and fan changes out to every open diagram that shows
//! the affected nodes; search cross-references the model, diagrams and tiles.

pub mod config;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod sync;
pub mod topology;
pub mod view;

pub use topology::{SharedTopology, Topology};
