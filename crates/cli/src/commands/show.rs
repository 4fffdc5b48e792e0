// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock show [name]`: describe stored state

use crate::driver::Host;
use crate::output::print_list;
use tock_core::ResourceKind;

pub fn handle(host: &Host, name: Option<String>) -> anyhow::Result<()> {
    let (rotating, offset, fixed) = (host.rotating(), host.offset(), host.fixed());

    let mut reports = Vec::new();
    for kind in ResourceKind::ALL {
        for stored in host.store.list(kind)? {
            if name.as_deref().is_some_and(|n| n != stored) {
                continue;
            }
            let report = match kind {
                ResourceKind::Rotating => host.show_one(&rotating, &stored)?,
                ResourceKind::Offset => host.show_one(&offset, &stored)?,
                ResourceKind::Static => host.show_one(&fixed, &stored)?,
            };
            reports.extend(report);
        }
    }

    if reports.is_empty() {
        match name {
            Some(name) => anyhow::bail!("no resource named {} in state", name),
            None => println!("No resources in state."),
        }
        return Ok(());
    }
    print_list(&reports, host.format);
    Ok(())
}
