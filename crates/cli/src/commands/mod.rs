// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod apply;
pub mod history;
pub mod import;
pub mod plan;
pub mod rm;
pub mod show;
