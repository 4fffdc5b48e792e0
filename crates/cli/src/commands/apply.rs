// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock apply`: converge state to the manifest

use crate::driver::Host;
use crate::output::print_list;
use tock_core::ResourceKind;

pub fn handle(host: &Host) -> anyhow::Result<()> {
    let manifest = host.manifest()?;
    let _lock = host.lock()?;
    let mut journal = host.journal()?;
    let (rotating, offset, fixed) = (host.rotating(), host.offset(), host.fixed());

    // Every resource is planned and verified before any of them is written.
    let mut pending = Vec::new();
    for (name, config) in &manifest.rotating {
        pending.push(host.prepare(&rotating, name, config)?);
    }
    for (name, config) in &manifest.offset {
        pending.push(host.prepare(&offset, name, config)?);
    }
    for (name, config) in &manifest.fixed {
        pending.push(host.prepare(&fixed, name, config)?);
    }

    let mut reports = Vec::with_capacity(pending.len());
    for outcome in pending {
        reports.push(host.commit(outcome, &mut journal)?);
    }

    for kind in ResourceKind::ALL {
        for name in host.store.list(kind)? {
            if !manifest.declares(kind, &name) {
                tracing::warn!(%kind, name, "in state but not declared; remove with tock rm");
            }
        }
    }

    if reports.is_empty() {
        println!("No resources declared.");
        return Ok(());
    }
    print_list(&reports, host.format);
    Ok(())
}
