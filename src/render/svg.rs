// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::NodeRenderer;
use crate::model::Node;

/// Draws a node as a rounded badge carrying its title and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgBadgeRenderer {
    width: u32,
    height: u32,
    normal_fill: String,
    alert_fill: String,
    selected_stroke: String,
    unselected_stroke: String,
}

impl Default for SvgBadgeRenderer {
    fn default() -> Self {
        Self {
            width: 200,
            height: 60,
            normal_fill: "#D5DBDB".to_owned(),
            alert_fill: "#FF0000".to_owned(),
            selected_stroke: "#FF9900".to_owned(),
            unselected_stroke: "#000000".to_owned(),
        }
    }
}

impl SvgBadgeRenderer {
    pub fn with_fills(normal_fill: impl Into<String>, alert_fill: impl Into<String>) -> Self {
        Self { normal_fill: normal_fill.into(), alert_fill: alert_fill.into(), ..Self::default() }
    }

    fn badge(&self, node: &Node, alert: bool, selected: bool) -> String {
        let fill = if alert { &self.alert_fill } else { &self.normal_fill };
        let (stroke, stroke_width) =
            if selected { (&self.selected_stroke, 4) } else { (&self.unselected_stroke, 1) };

        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );
        out.push_str(&format!(
            r#"<rect x="2" y="2" width="{w}" height="{h}" rx="6" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#,
            w = self.width.saturating_sub(4),
            h = self.height.saturating_sub(4),
        ));
        out.push_str(&format!(
            r#"<text x="10" y="24" font-size="14" font-weight="bold">{}</text>"#,
            escape_xml(node.title())
        ));
        out.push_str(&format!(r#"<text x="10" y="44" font-size="12">{}</text>"#, escape_xml(node.name())));
        out.push_str("</svg>");
        out
    }
}

impl NodeRenderer for SvgBadgeRenderer {
    fn normal_selected(&self, node: &Node) -> String {
        self.badge(node, false, true)
    }

    fn normal_unselected(&self, node: &Node) -> String {
        self.badge(node, false, false)
    }

    fn alert_selected(&self, node: &Node) -> String {
        self.badge(node, true, true)
    }

    fn alert_unselected(&self, node: &Node) -> String {
        self.badge(node, true, false)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
