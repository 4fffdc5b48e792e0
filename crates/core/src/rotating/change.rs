// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-significance detection

use crate::schedule::Schedule;

/// Whether a deadline must be re-resolved for `requested`
///
/// Only a change to the schedule's meaning counts: the unit, the count,
/// or the explicit deadline instant. Explicit deadlines compare as
/// instants, so the same moment written with a different offset is not
/// a change. With no previous schedule the answer is always yes.
pub fn needs_recompute(previous: Option<&Schedule>, requested: &Schedule) -> bool {
    previous != Some(requested)
}
