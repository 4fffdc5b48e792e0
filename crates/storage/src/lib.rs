// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tock-storage: durable state for time resources
//!
//! - [`StateStore`]: one JSON document per resource instance
//! - [`Journal`]: append-only log of lifecycle events

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod journal;
mod store;

pub use journal::{Journal, JournalEntry, JournalError};
pub use store::{StateStore, StoreError, StoreLock};
