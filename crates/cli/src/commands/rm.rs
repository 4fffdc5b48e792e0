// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock rm <kind> <name>`

use crate::driver::Host;
use crate::error::TockError;
use tock_core::{LifecycleEvent, ResourceKind};

pub fn handle(host: &Host, kind: ResourceKind, name: &str) -> anyhow::Result<()> {
    let _lock = host.lock()?;
    if !host.store.delete(kind, name)? {
        return Err(TockError::not_found(kind, name).into());
    }
    host.journal()?
        .append(host.clock_now(), kind, name, LifecycleEvent::Deleted)?;
    println!("{}.{}: {}", kind, name, LifecycleEvent::Deleted);
    Ok(())
}
