// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tock import` and `tock id`: move rotating resources by identifier

use crate::driver::{Host, Resource};
use crate::error::TockError;
use crate::output::{print_list, Report};
use tock_core::{LifecycleEvent, ResourceKind, RotatingEntity};

const KIND: ResourceKind = ResourceKind::Rotating;

/// Adopt a rotating resource from its identifier
pub fn handle(host: &Host, name: &str, id: &str) -> anyhow::Result<()> {
    let _lock = host.lock()?;
    if host.store.exists(KIND, name) {
        return Err(TockError::already_managed(KIND, name).into());
    }

    let span = tracing::info_span!("resource.import", kind = %KIND, name);
    let _guard = span.enter();

    let rotating = host.rotating();
    let entity = rotating
        .import(id)
        .map_err(|e| TockError::resource(KIND, name, e))?;

    let mut journal = host.journal()?;
    host.store.save(KIND, name, &entity)?;
    journal.append(host.clock_now(), KIND, name, LifecycleEvent::Imported)?;

    let report = Report {
        kind: KIND,
        name: name.to_string(),
        headline: LifecycleEvent::Imported.to_string(),
        fields: rotating.entity_fields(&entity),
        detail: serde_json::to_value(&entity)?,
    };
    print_list(&[report], host.format);
    Ok(())
}

/// Print the identifier of a stored rotating resource
pub fn id(host: &Host, name: &str) -> anyhow::Result<()> {
    let entity: RotatingEntity = host
        .store
        .load(KIND, name)?
        .ok_or_else(|| TockError::not_found(KIND, name))?;
    println!("{}", entity.import_id());
    Ok(())
}
