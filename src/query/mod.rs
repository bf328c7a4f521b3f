// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the model and its views.

pub mod search;

pub use search::{
    DiagramMatch, SearchError, SearchIndex, SearchMode, SearchOptions, SearchResults, TileMatch,
};
