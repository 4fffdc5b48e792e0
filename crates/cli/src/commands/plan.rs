// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock plan`: preview without touching state

use crate::driver::Host;
use crate::output::print_list;

pub fn handle(host: &Host) -> anyhow::Result<()> {
    let manifest = host.manifest()?;
    let (rotating, offset, fixed) = (host.rotating(), host.offset(), host.fixed());

    let mut reports = Vec::new();
    for (name, config) in &manifest.rotating {
        reports.push(host.plan_one(&rotating, name, config)?);
    }
    for (name, config) in &manifest.offset {
        reports.push(host.plan_one(&offset, name, config)?);
    }
    for (name, config) in &manifest.fixed {
        reports.push(host.plan_one(&fixed, name, config)?);
    }

    if reports.is_empty() {
        println!("No resources declared.");
        return Ok(());
    }
    print_list(&reports, host.format);
    Ok(())
}
