// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tock-core: time resources for declarative infrastructure
//!
//! This crate provides:
//! - A rotating timestamp whose deadline is resolved once from a base
//!   instant and a schedule, preserved across runs, and expired on read
//! - Offset and static timestamps built on the same base-instant model
//! - A preview/commit guard: plans mark clock-dependent fields unknown
//!   and applies are verified against every known prediction
//! - A positional identifier codec for re-attaching rotating resources
//! - An injectable clock, so every decision is deterministic under test
//!
//! Nothing here performs I/O; persistence belongs to the host.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clock;
pub mod error;
pub mod id;
pub mod timestamp;

pub mod fixed;
pub mod lifecycle;
pub mod manifest;
pub mod offset;
pub mod plan;
pub mod rotating;
pub mod schedule;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{Diagnostic, ErrorKind, ResourceError};
pub use fixed::{StaticConfig, StaticEntity, StaticPlan, StaticResource};
pub use id::{IdSchedule, ImportId};
pub use lifecycle::{LifecycleEvent, ResourceKind};
pub use manifest::{parse_manifest, Manifest, ManifestError};
pub use offset::{OffsetConfig, OffsetEntity, OffsetPlan, OffsetResource, Offsets};
pub use plan::{Applied, PlanAction, Planned, UNKNOWN_VALUE};
pub use rotating::{
    is_expired, needs_recompute, remaining, Lifecycle, ReadOutcome, RotatingConfig, RotatingEntity,
    RotatingResource, RotationPlan,
};
pub use schedule::{resolve, CalendarUnit, Schedule, ScheduleFields};
pub use timestamp::{format_rfc3339, parse_rfc3339, DerivedFields};
