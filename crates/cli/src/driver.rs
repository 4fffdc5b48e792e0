// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host glue: loads prior state, drives a resource through
//! plan/apply, and persists the outcome

use crate::error::TockError;
use crate::output::{self, OutputFormat, Report};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tock_core::{
    format_rfc3339, parse_manifest, Applied, Clock, FakeClock, LifecycleEvent, Manifest,
    OffsetConfig, OffsetEntity, OffsetPlan, OffsetResource, PlanAction, ReadOutcome,
    ResourceError, ResourceKind, RotatingConfig, RotatingEntity, RotatingResource, RotationPlan,
    StaticConfig, StaticEntity, StaticPlan, StaticResource, SystemClock,
};
use tock_storage::{Journal, StateStore, StoreError, StoreLock};

/// Wall clock, or an instant pinned with `--now`
#[derive(Debug, Clone)]
pub enum CliClock {
    System(SystemClock),
    Pinned(FakeClock),
}

impl CliClock {
    pub fn from_flag(now: Option<DateTime<Utc>>) -> Self {
        match now {
            Some(t) => CliClock::Pinned(FakeClock::at(t)),
            None => CliClock::System(SystemClock),
        }
    }
}

impl Clock for CliClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            CliClock::System(c) => c.now(),
            CliClock::Pinned(c) => c.now(),
        }
    }
}

/// A resource kind the host knows how to converge
pub trait Resource {
    const KIND: ResourceKind;
    type Config;
    type Entity: Serialize + DeserializeOwned + Clone;
    type Plan: Serialize;

    fn plan(
        &self,
        prior: Option<&Self::Entity>,
        config: &Self::Config,
    ) -> Result<Self::Plan, ResourceError>;

    fn apply(
        &self,
        prior: Option<&Self::Entity>,
        config: &Self::Config,
        plan: &Self::Plan,
    ) -> Result<Applied<Self::Entity>, ResourceError>;

    fn action(plan: &Self::Plan) -> &PlanAction;

    /// Preview lines for `tock plan`
    fn plan_fields(plan: &Self::Plan) -> Vec<(&'static str, String)>;

    /// Stored-state lines for `tock show`
    fn entity_fields(&self, entity: &Self::Entity) -> Vec<(&'static str, String)>;

    /// Deadline of a stored entity that has lapsed
    fn expired(&self, _entity: &Self::Entity) -> Option<DateTime<Utc>> {
        None
    }
}

impl<C: Clock> Resource for RotatingResource<C> {
    const KIND: ResourceKind = ResourceKind::Rotating;
    type Config = RotatingConfig;
    type Entity = RotatingEntity;
    type Plan = RotationPlan;

    fn plan(
        &self,
        prior: Option<&RotatingEntity>,
        config: &RotatingConfig,
    ) -> Result<RotationPlan, ResourceError> {
        RotatingResource::plan(self, prior, config)
    }

    fn apply(
        &self,
        prior: Option<&RotatingEntity>,
        config: &RotatingConfig,
        plan: &RotationPlan,
    ) -> Result<Applied<RotatingEntity>, ResourceError> {
        RotatingResource::apply(self, prior, config, plan)
    }

    fn action(plan: &RotationPlan) -> &PlanAction {
        &plan.action
    }

    fn plan_fields(plan: &RotationPlan) -> Vec<(&'static str, String)> {
        vec![
            ("base", output::planned_instant(&plan.base)),
            ("schedule", plan.schedule.to_string()),
            ("deadline", output::planned_instant(&plan.deadline)),
        ]
    }

    fn entity_fields(&self, entity: &RotatingEntity) -> Vec<(&'static str, String)> {
        let status = match tock_core::remaining(&entity.deadline, &self.clock().now()) {
            Some(left) => output::remaining(left),
            None => "expired".to_string(),
        };
        vec![
            ("base", output::instant(&entity.base)),
            ("schedule", entity.schedule.to_string()),
            ("deadline", output::instant(&entity.deadline)),
            ("status", status),
            ("id", entity.import_id().encode()),
        ]
    }

    fn expired(&self, entity: &RotatingEntity) -> Option<DateTime<Utc>> {
        match self.read(entity.clone()) {
            ReadOutcome::Active(_) => None,
            ReadOutcome::Expired(e) => Some(e.deadline),
        }
    }
}

impl<C: Clock> Resource for OffsetResource<C> {
    const KIND: ResourceKind = ResourceKind::Offset;
    type Config = OffsetConfig;
    type Entity = OffsetEntity;
    type Plan = OffsetPlan;

    fn plan(
        &self,
        prior: Option<&OffsetEntity>,
        config: &OffsetConfig,
    ) -> Result<OffsetPlan, ResourceError> {
        OffsetResource::plan(self, prior, config)
    }

    fn apply(
        &self,
        prior: Option<&OffsetEntity>,
        config: &OffsetConfig,
        plan: &OffsetPlan,
    ) -> Result<Applied<OffsetEntity>, ResourceError> {
        OffsetResource::apply(self, prior, config, plan)
    }

    fn action(plan: &OffsetPlan) -> &PlanAction {
        &plan.action
    }

    fn plan_fields(plan: &OffsetPlan) -> Vec<(&'static str, String)> {
        vec![
            ("base", output::planned_instant(&plan.base)),
            ("offsets", output::offsets(&plan.offsets)),
            ("result", output::planned_instant(&plan.result)),
        ]
    }

    fn entity_fields(&self, entity: &OffsetEntity) -> Vec<(&'static str, String)> {
        vec![
            ("base", output::instant(&entity.base)),
            ("offsets", output::offsets(&entity.offsets)),
            ("result", output::instant(&entity.result)),
        ]
    }
}

impl<C: Clock> Resource for StaticResource<C> {
    const KIND: ResourceKind = ResourceKind::Static;
    type Config = StaticConfig;
    type Entity = StaticEntity;
    type Plan = StaticPlan;

    fn plan(
        &self,
        prior: Option<&StaticEntity>,
        config: &StaticConfig,
    ) -> Result<StaticPlan, ResourceError> {
        StaticResource::plan(self, prior, config)
    }

    fn apply(
        &self,
        prior: Option<&StaticEntity>,
        config: &StaticConfig,
        plan: &StaticPlan,
    ) -> Result<Applied<StaticEntity>, ResourceError> {
        StaticResource::apply(self, prior, config, plan)
    }

    fn action(plan: &StaticPlan) -> &PlanAction {
        &plan.action
    }

    fn plan_fields(plan: &StaticPlan) -> Vec<(&'static str, String)> {
        vec![("base", output::planned_instant(&plan.base))]
    }

    fn entity_fields(&self, entity: &StaticEntity) -> Vec<(&'static str, String)> {
        vec![("base", output::instant(&entity.base))]
    }
}

/// A verified apply outcome that has not been written yet
#[derive(Debug)]
pub struct Pending {
    /// Deadline of lapsed stored state to drop before saving
    expired: Option<DateTime<Utc>>,
    event: Option<LifecycleEvent>,
    /// Report on the new entity; its detail is the state to store
    report: Report,
}

/// Everything a command needs: flags, clock, and the state directory
pub struct Host {
    pub manifest_path: PathBuf,
    pub format: OutputFormat,
    pub clock: CliClock,
    pub store: StateStore,
}

impl Host {
    pub fn new(
        manifest_path: PathBuf,
        state_dir: &Path,
        now: Option<DateTime<Utc>>,
        format: OutputFormat,
    ) -> Result<Self> {
        Ok(Self {
            manifest_path,
            format,
            clock: CliClock::from_flag(now),
            store: StateStore::open(state_dir)?,
        })
    }

    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn rotating(&self) -> RotatingResource<CliClock> {
        RotatingResource::new(self.clock.clone())
    }

    pub fn offset(&self) -> OffsetResource<CliClock> {
        OffsetResource::new(self.clock.clone())
    }

    pub fn fixed(&self) -> StaticResource<CliClock> {
        StaticResource::new(self.clock.clone())
    }

    pub fn manifest(&self) -> Result<Manifest> {
        let content = match std::fs::read_to_string(&self.manifest_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TockError::manifest_missing(&self.manifest_path).into())
            }
            Err(e) => return Err(e.into()),
        };
        parse_manifest(&content)
            .map_err(|e| TockError::manifest_invalid(&self.manifest_path, e).into())
    }

    pub fn lock(&self) -> Result<StoreLock> {
        self.store.lock().map_err(|e| match e {
            StoreError::Locked(dir) => TockError::state_locked(&dir).into(),
            other => other.into(),
        })
    }

    pub fn journal(&self) -> Result<Journal> {
        Ok(Journal::open(&self.store.journal_path())?)
    }

    /// Stored state that is still live; lapsed state reads as absent
    pub fn live<R: Resource>(&self, resource: &R, name: &str) -> Result<Option<R::Entity>> {
        let entity = self.store.load::<R::Entity>(R::KIND, name)?;
        Ok(entity.filter(|e| resource.expired(e).is_none()))
    }

    pub fn plan_one<R: Resource>(
        &self,
        resource: &R,
        name: &str,
        config: &R::Config,
    ) -> Result<Report> {
        let span = tracing::info_span!("resource.plan", kind = %R::KIND, name);
        let _guard = span.enter();

        let prior = self.live(resource, name)?;
        let plan = resource
            .plan(prior.as_ref(), config)
            .map_err(|e| TockError::resource(R::KIND, name, e))?;

        Ok(Report {
            kind: R::KIND,
            name: name.to_string(),
            headline: R::action(&plan).to_string(),
            fields: R::plan_fields(&plan),
            detail: serde_json::to_value(&plan)?,
        })
    }

    /// Refresh, plan, apply and verify one resource without writing
    ///
    /// Lapsed state is planned against as absent; its removal is left to
    /// [`Host::commit`].
    pub fn prepare<R: Resource>(
        &self,
        resource: &R,
        name: &str,
        config: &R::Config,
    ) -> Result<Pending> {
        let span = tracing::info_span!("resource.apply", kind = %R::KIND, name);
        let _guard = span.enter();

        let stored = self.store.load::<R::Entity>(R::KIND, name)?;
        let expired = stored.as_ref().and_then(|e| resource.expired(e));
        let prior = stored.filter(|_| expired.is_none());

        let plan = resource
            .plan(prior.as_ref(), config)
            .map_err(|e| TockError::resource(R::KIND, name, e))?;
        let applied = resource
            .apply(prior.as_ref(), config, &plan)
            .map_err(|e| TockError::resource(R::KIND, name, e))?;

        let headline = match &applied.event {
            Some(event) => event.to_string(),
            None => "unchanged".to_string(),
        };
        Ok(Pending {
            expired,
            event: applied.event,
            report: Report {
                kind: R::KIND,
                name: name.to_string(),
                headline,
                fields: resource.entity_fields(&applied.entity),
                detail: serde_json::to_value(&applied.entity)?,
            },
        })
    }

    /// Persist and journal a prepared outcome
    pub fn commit(&self, pending: Pending, journal: &mut Journal) -> Result<Report> {
        let Pending {
            expired,
            event,
            report,
        } = pending;
        let (kind, name) = (report.kind, report.name.as_str());

        if let Some(deadline) = expired {
            self.store.delete(kind, name)?;
            journal.append(
                self.clock_now(),
                kind,
                name,
                LifecycleEvent::Expired {
                    deadline: format_rfc3339(&deadline),
                },
            )?;
        }
        if let Some(event) = event {
            self.store.save(kind, name, &report.detail)?;
            journal.append(self.clock_now(), kind, name, event)?;
        }
        Ok(report)
    }

    /// Prepare and commit a single resource
    pub fn apply_one<R: Resource>(
        &self,
        resource: &R,
        name: &str,
        config: &R::Config,
        journal: &mut Journal,
    ) -> Result<Report> {
        let pending = self.prepare(resource, name, config)?;
        self.commit(pending, journal)
    }

    /// Describe stored state without changing it
    pub fn show_one<R: Resource>(&self, resource: &R, name: &str) -> Result<Option<Report>> {
        let Some(entity) = self.store.load::<R::Entity>(R::KIND, name)? else {
            return Ok(None);
        };
        let headline = match resource.expired(&entity) {
            Some(_) => "expired",
            None => "active",
        };
        Ok(Some(Report {
            kind: R::KIND,
            name: name.to_string(),
            headline: headline.to_string(),
            fields: resource.entity_fields(&entity),
            detail: serde_json::to_value(&entity)?,
        }))
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
