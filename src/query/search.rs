// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{GraphModel, Node, NodeId};
use crate::view::{DiagramRegistry, TileRegistry};

const MAX_DATA_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Substring,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Order model hits by fuzzy similarity of their name to the query, best first.
    pub rank_fuzzy: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { mode: SearchMode::Substring, rank_fuzzy: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramMatch {
    pub diagram: String,
    pub found: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileMatch {
    pub tile: String,
    pub found: Vec<NodeId>,
}

/// Categorized hits for one query. Every id and name refers to something live at query time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchResults {
    pub text: String,
    pub model: Vec<Node>,
    pub diagram_names: Vec<String>,
    pub diagram_contents: Vec<DiagramMatch>,
    pub tile_names: Vec<String>,
    pub tile_contents: Vec<TileMatch>,
}

impl SearchResults {
    fn empty(text: &str) -> Self {
        Self { text: text.to_owned(), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
            && self.diagram_names.is_empty()
            && self.diagram_contents.is_empty()
            && self.tile_names.is_empty()
            && self.tile_contents.is_empty()
    }
}

enum Matcher {
    Substring(String),
    Regex(Regex),
}

impl Matcher {
    fn new(query: &str, mode: SearchMode) -> Result<Self, SearchError> {
        match mode {
            SearchMode::Substring => Ok(Self::Substring(query.to_lowercase())),
            SearchMode::Regex => {
                Ok(Self::Regex(RegexBuilder::new(query).case_insensitive(true).build()?))
            }
        }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Self::Substring(needle) => haystack.to_lowercase().contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(haystack),
        }
    }

    fn matches_node(&self, node: &Node) -> bool {
        self.is_match(node.id().as_str())
            || self.is_match(node.name())
            || self.is_match(node.title())
            || self.matches_value(node.data(), 0)
    }

    fn matches_value(&self, value: &Value, depth: usize) -> bool {
        if depth > MAX_DATA_DEPTH {
            return false;
        }
        match value {
            Value::String(text) => self.is_match(text),
            Value::Array(items) => items.iter().any(|item| self.matches_value(item, depth + 1)),
            Value::Object(fields) => fields.values().any(|field| self.matches_value(field, depth + 1)),
            _ => false,
        }
    }
}

/// Read-only search over the model and the live view registries.
///
/// The index borrows its sources, so results can never outlive or disagree with them.
pub struct SearchIndex<'a> {
    graph: &'a GraphModel,
    diagrams: &'a DiagramRegistry,
    tiles: &'a TileRegistry,
    options: SearchOptions,
}

impl<'a> SearchIndex<'a> {
    pub fn new(graph: &'a GraphModel, diagrams: &'a DiagramRegistry, tiles: &'a TileRegistry) -> Self {
        Self { graph, diagrams, tiles, options: SearchOptions::default() }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs `query` against nodes, diagram names and contents, and tile names and contents.
    ///
    /// Whitespace-only queries return empty results.
    pub fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Ok(SearchResults::empty(query));
        }
        let matcher = Matcher::new(needle, self.options.mode)?;

        let mut model = self
            .graph
            .nodes()
            .values()
            .filter(|node| matcher.matches_node(node))
            .collect::<Vec<_>>();
        if self.options.rank_fuzzy {
            rank_by_similarity(&mut model, needle);
        }
        let hits = model.iter().map(|node| node.id()).collect::<BTreeSet<_>>();

        let mut diagram_names = Vec::new();
        let mut diagram_contents = Vec::new();
        for (id, name) in self.diagrams.live() {
            if matcher.is_match(name) {
                diagram_names.push(name.to_owned());
            }
            let found = self
                .diagrams
                .displayed(id)
                .into_iter()
                .flatten()
                .filter(|node_id| hits.contains(node_id))
                .cloned()
                .collect::<Vec<_>>();
            if !found.is_empty() {
                diagram_contents.push(DiagramMatch { diagram: name.to_owned(), found });
            }
        }

        let mut tile_names = Vec::new();
        let mut tile_contents = Vec::new();
        for (name, nodes) in self.tiles.tiles() {
            if matcher.is_match(name) {
                tile_names.push(name.clone());
            }
            let found = nodes.iter().filter(|node_id| hits.contains(node_id)).cloned().collect::<Vec<_>>();
            if !found.is_empty() {
                tile_contents.push(TileMatch { tile: name.clone(), found });
            }
        }

        Ok(SearchResults {
            text: query.to_owned(),
            model: model.into_iter().cloned().collect(),
            diagram_names,
            diagram_contents,
            tile_names,
            tile_contents,
        })
    }
}

fn rank_by_similarity(nodes: &mut [&Node], needle: &str) {
    let needle = needle.to_lowercase();
    let score = |node: &Node| rapidfuzz::fuzz::ratio(needle.chars(), node.name().to_lowercase().chars());
    nodes.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id().cmp(b.id()))
    });
}
