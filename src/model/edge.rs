// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{EdgeId, NodeId};

/// Which ends of an edge carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    None,
    #[default]
    To,
    From,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurveShape {
    #[default]
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "discrete")]
    DiscreteBend,
    #[serde(rename = "curvedCW")]
    CurveClockwise,
    #[serde(rename = "curvedCCW")]
    CurveCounterClockwise,
}

impl CurveShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::DiscreteBend => "discrete",
            Self::CurveClockwise => "curvedCW",
            Self::CurveCounterClockwise => "curvedCCW",
        }
    }
}

impl fmt::Display for CurveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Curvature {
    enabled: bool,
    shape: CurveShape,
    roundness: f64,
}

impl Curvature {
    pub fn straight() -> Self {
        Self::default()
    }

    /// Enabled curvature with the neutral discrete bend and no explicit roundness.
    pub fn discrete() -> Self {
        Self { enabled: true, shape: CurveShape::DiscreteBend, roundness: 0.0 }
    }

    pub fn curved(shape: CurveShape, roundness: f64) -> Self {
        Self { enabled: true, shape, roundness }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    pub fn roundness(&self) -> f64 {
        self.roundness
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    color: String,
    dashes: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self { color: "black".to_owned(), dashes: false }
    }
}

impl EdgeStyle {
    pub fn new(color: impl Into<String>, dashes: bool) -> Self {
        Self { color: color.into(), dashes }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn dashes(&self) -> bool {
        self.dashes
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    arrows: ArrowDirection,
    data: Value,
    label: String,
    curvature: Curvature,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            from,
            to,
            arrows: ArrowDirection::To,
            data: Value::Null,
            label: String::new(),
            curvature: Curvature::straight(),
            style: EdgeStyle::default(),
        }
    }

    pub fn new_with(
        id: EdgeId,
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
        data: Value,
    ) -> Self {
        let mut edge = Self::new(id, from, to);
        edge.label = label.into();
        edge.data = data;
        edge
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn arrows(&self) -> ArrowDirection {
        self.arrows
    }

    pub fn set_arrows(&mut self, arrows: ArrowDirection) {
        self.arrows = arrows;
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn curvature(&self) -> &Curvature {
        &self.curvature
    }

    pub fn set_curvature(&mut self, curvature: Curvature) {
        self.curvature = curvature;
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: EdgeStyle) {
        self.style = style;
    }

    /// True when `other` connects the same ordered `(from, to)` pair.
    pub fn same_endpoints(&self, other: &Edge) -> bool {
        self.from == other.from && self.to == other.to
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrowDirection, CurveShape, Edge};
    use crate::model::{EdgeId, NodeId};

    #[test]
    fn new_edge_is_straight_and_points_to_destination() {
        let edge = Edge::new(
            EdgeId::new("e-0").expect("edge id"),
            NodeId::new("p").expect("node id"),
            NodeId::new("q").expect("node id"),
        );
        assert_eq!(edge.arrows(), ArrowDirection::To);
        assert!(!edge.curvature().enabled());
        assert_eq!(edge.curvature().shape(), CurveShape::Straight);
        assert_eq!(edge.style().color(), "black");
        assert!(!edge.style().dashes());
    }

    #[test]
    fn curve_shape_serializes_with_renderer_names() {
        let json = serde_json::to_string(&CurveShape::CurveCounterClockwise).expect("serialize");
        assert_eq!(json, "\"curvedCCW\"");
        assert_eq!(CurveShape::DiscreteBend.to_string(), "discrete");
    }
}
