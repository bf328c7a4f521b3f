// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A single [`GraphModel`] owns every node and edge; diagram and tile views only
//! ever hold ids into it.

pub mod edge;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod node;

pub use edge::{ArrowDirection, Curvature, CurveShape, Edge, EdgeStyle};
pub use graph::{Entity, GraphModel};
pub use ids::{EdgeId, Id, IdError, NodeId};
pub use node::{Node, NodeImage};
