// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live views over the shared model.
//!
//! Views are created and dropped by the UI layer. The registries here only keep non-owning
//! handles plus the set of node ids each view displays, and check liveness on every dispatch.

use crate::model::{Edge, Node, NodeId};

pub mod diagrams;
pub mod tiles;

pub use diagrams::{DiagramRegistry, RegistryError, ViewId};
pub use tiles::TileRegistry;

/// The operations the core invokes on an open diagram.
///
/// Implementations use interior mutability; the registry only ever holds `Weak` handles.
pub trait DiagramView: Send + Sync {
    fn shown(&self) -> bool;
    fn show(&self);
    /// Fits the viewport to `nodes`, or to everything when `None`.
    fn fit(&self, nodes: Option<&[NodeId]>);
    fn blink(&self, count: u32, node: Option<&NodeId>);
    fn update_node(&self, node: &Node);
    fn update_edge(&self, edge: &Edge);
    /// Re-evaluate the alert banner after a node's alarm state flipped.
    fn alert(&self, active: bool);
}

/// The tile surface. Tiles only support being brought forward and highlighted by name.
pub trait TileView: Send + Sync {
    fn show(&self);
    fn blink(&self, tile: &str);
}
