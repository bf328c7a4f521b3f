// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Parallel-edge disambiguation.
//!
//! Connections between the same ordered pair of nodes come in pairs whose ids differ only in the
//! last character: an id ending in `0` pairs with one ending in `1`, any other id pairs with one
//! ending in `0`. Paired edges are bent so both stay visible.

use serde_json::Value;

use crate::model::{Curvature, CurveShape, Edge, EdgeId};

pub const DEFAULT_CURVE_ROUNDNESS: f64 = 0.15;

/// The terminal character a sibling of `id` must end with.
pub fn sibling_suffix(id: &EdgeId) -> char {
    if id.terminal_char() == Some('0') {
        '1'
    } else {
        '0'
    }
}

/// Whether `batch[index]` has a paired sibling elsewhere in the batch.
pub fn has_sibling(batch: &[Edge], index: usize) -> bool {
    let Some(edge) = batch.get(index) else {
        return false;
    };
    let wanted = sibling_suffix(edge.id());
    batch.iter().enumerate().any(|(other_index, other)| {
        other_index != index
            && other.same_endpoints(edge)
            && other.id().terminal_char() == Some(wanted)
    })
}

/// Bends an edge known to have a sibling.
///
/// Without a `pipeline` field both siblings get the neutral discrete bend. With one, pipeline `1`
/// curves counter-clockwise and anything else clockwise, and the pipeline is appended to the
/// label. Siblings reporting the same pipeline therefore bend the same way.
pub fn apply_parallel_curve(edge: &mut Edge, roundness: f64) {
    let Some(pipeline) = edge.data().get("pipeline").cloned() else {
        edge.set_curvature(Curvature::discrete());
        return;
    };

    let shape = if pipeline.as_f64() == Some(1.0) {
        CurveShape::CurveCounterClockwise
    } else {
        CurveShape::CurveClockwise
    };
    let label = format!("{} {}", edge.label(), pipeline_label(&pipeline));
    edge.set_label(label);
    edge.set_curvature(Curvature::curved(shape, roundness));
}

/// Renders a pipeline the way it reads in a label: whole numbers drop their fraction.
fn pipeline_label(pipeline: &Value) -> String {
    match pipeline {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Runs sibling detection over one fetched batch and curves every paired edge.
///
/// Returns the number of edges that were curved.
pub fn disambiguate(batch: &mut [Edge], roundness: f64) -> usize {
    let paired = (0..batch.len()).map(|index| has_sibling(batch, index)).collect::<Vec<_>>();
    let mut curved = 0;
    for (edge, paired) in batch.iter_mut().zip(paired) {
        if paired {
            apply_parallel_curve(edge, roundness);
            curved += 1;
        }
    }
    curved
}
