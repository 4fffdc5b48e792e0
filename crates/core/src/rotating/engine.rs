// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan/apply/read lifecycle for rotating resources

use super::{
    needs_recompute, DesiredRotation, Lifecycle, RotatingConfig, RotatingEntity, RotationPlan,
};
use crate::clock::Clock;
use crate::error::ResourceError;
use crate::id::ImportId;
use crate::plan::{Applied, PlanAction, Planned};
use crate::schedule::{resolve, Schedule};
use crate::timestamp::{format_rfc3339, whole_seconds, DerivedFields};
use chrono::{DateTime, Utc};

/// Result of refreshing stored state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Active(RotatingEntity),
    /// Past its deadline; the host must drop it from state
    Expired(RotatingEntity),
}

/// Drives rotating resources against an injected clock
#[derive(Debug, Clone)]
pub struct RotatingResource<C: Clock> {
    clock: C,
}

impl<C: Clock> RotatingResource<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Preview what [`RotatingResource::apply`] will produce
    ///
    /// Fields that hinge on the commit-time clock are `Unknown`.
    pub fn plan(
        &self,
        prior: Option<&RotatingEntity>,
        config: &RotatingConfig,
    ) -> Result<RotationPlan, ResourceError> {
        let desired = config.validate()?;
        let (action, base) = decide(prior, &desired);

        let base = Planned::from(base);
        let deadline = match (&action, prior) {
            (PlanAction::NoOp, Some(prior)) => Planned::Known(prior.deadline),
            _ => match desired.schedule {
                Schedule::At(deadline) => Planned::Known(deadline),
                Schedule::Every { .. } => base.and_then(|b| resolve(&b, &desired.schedule))?,
            },
        };

        tracing::debug!(%action, %base, %deadline, "planned rotation");

        Ok(RotationPlan {
            action,
            derived: base.map(|b| DerivedFields::from_instant(&b)),
            base,
            schedule: desired.schedule,
            deadline,
            triggers: desired.triggers,
        })
    }

    /// Commit `config`, checking the result against `plan`
    ///
    /// Everything is recomputed from `prior` and `config`; the plan is
    /// only used to verify the outcome. Nothing is returned unless every
    /// known prediction holds.
    pub fn apply(
        &self,
        prior: Option<&RotatingEntity>,
        config: &RotatingConfig,
        plan: &RotationPlan,
    ) -> Result<Applied<RotatingEntity>, ResourceError> {
        let desired = config.validate()?;
        let (action, base) = decide(prior, &desired);
        plan.action.verify(&action)?;

        let entity = match (&action, prior) {
            (PlanAction::NoOp, Some(prior)) => prior.clone(),
            (PlanAction::Update, Some(prior)) => {
                let deadline = resolve(&prior.base, &desired.schedule)?;
                tracing::debug!(
                    from = %format_rfc3339(&prior.deadline),
                    to = %format_rfc3339(&deadline),
                    "schedule changed, deadline recomputed"
                );
                RotatingEntity {
                    schedule: desired.schedule,
                    deadline,
                    triggers: desired.triggers,
                    ..prior.clone()
                }
            }
            _ => {
                let base = base.unwrap_or_else(|| whole_seconds(self.clock.now()));
                RotatingEntity::new(base, desired.schedule, desired.triggers)?
            }
        };

        plan.base.verify("rfc3339", &entity.base)?;
        Planned::Known(plan.schedule).verify("schedule", &entity.schedule)?;
        plan.deadline.verify("rotation_rfc3339", &entity.deadline)?;
        plan.derived.verify("derived", &entity.derived)?;

        Ok(Applied {
            entity,
            event: action.event(),
        })
    }

    /// Evaluate stored state against the clock
    pub fn read(&self, entity: RotatingEntity) -> ReadOutcome {
        let now = self.clock.now();
        match Lifecycle::at(&entity.deadline, &now) {
            Lifecycle::Active => ReadOutcome::Active(entity),
            Lifecycle::Expired => {
                tracing::debug!(
                    deadline = %format_rfc3339(&entity.deadline),
                    now = %format_rfc3339(&now),
                    "rotation deadline passed"
                );
                ReadOutcome::Expired(entity)
            }
        }
    }

    /// Reattach to an entity from its identifier
    pub fn import(&self, id: &str) -> Result<RotatingEntity, ResourceError> {
        let id: ImportId = id.parse()?;
        RotatingEntity::from_import(&id)
    }
}

/// Pick the plan action and, when already determined, the base instant
fn decide(
    prior: Option<&RotatingEntity>,
    desired: &DesiredRotation,
) -> (PlanAction, Option<DateTime<Utc>>) {
    let Some(prior) = prior else {
        return (PlanAction::Create, desired.base);
    };

    match desired.base {
        Some(base) if base != prior.base => {
            return (
                PlanAction::Replace {
                    reason: "rfc3339 changed".to_string(),
                },
                Some(base),
            );
        }
        _ => {}
    }

    if desired.triggers != prior.triggers {
        return (
            PlanAction::Replace {
                reason: "triggers changed".to_string(),
            },
            desired.base,
        );
    }

    if needs_recompute(Some(&prior.schedule), &desired.schedule) {
        (PlanAction::Update, Some(prior.base))
    } else {
        (PlanAction::NoOp, Some(prior.base))
    }
}
