// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental synchronization of the shared model.
//!
//! Alarm reconciliation and connection batches both follow the same rule: write the model, and
//! fan out to views only when a record actually changed.

pub mod alarms;
pub mod connections;
pub mod edges;

pub use alarms::{AlarmEvent, AlarmReconciler, ReconcileReport};
pub use connections::{
    decode_batch, decode_connection, ConnectionError, ConnectionKind, ConnectionSource,
    FetchError, LabelRule, RawConnection,
};
pub use edges::{disambiguate, DEFAULT_CURVE_ROUNDNESS};
