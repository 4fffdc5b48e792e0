// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock history`: replay the journal

use crate::driver::Host;
use crate::output::{self, OutputFormat};
use tock_storage::Journal;

pub fn handle(host: &Host) -> anyhow::Result<()> {
    let entries = Journal::replay(&host.store.journal_path())?;

    match host.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text if entries.is_empty() => println!("No history."),
        OutputFormat::Text => {
            for e in &entries {
                println!(
                    "{:>4}  {}  {}.{}  {}",
                    e.seq,
                    output::instant(&e.at),
                    e.kind,
                    e.name,
                    e.event
                );
            }
        }
    }
    Ok(())
}
