// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static timestamp resource
//!
//! Captures one instant (given, or "now" at creation) and keeps it until
//! `rfc3339` or `triggers` change.

use crate::clock::Clock;
use crate::error::ResourceError;
use crate::plan::{Applied, PlanAction, Planned};
use crate::timestamp::{parse_rfc3339, whole_seconds, DerivedFields};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl StaticConfig {
    /// The explicit base instant, if any
    pub fn validate(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.rfc3339
            .as_deref()
            .map(|raw| parse_rfc3339("rfc3339", raw))
            .transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticEntity {
    pub base: DateTime<Utc>,
    pub derived: DerivedFields,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub triggers: BTreeMap<String, String>,
}

impl StaticEntity {
    pub fn new(base: DateTime<Utc>, triggers: BTreeMap<String, String>) -> Self {
        Self {
            base,
            derived: DerivedFields::from_instant(&base),
            triggers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPlan {
    #[serde(flatten)]
    pub action: PlanAction,
    pub base: Planned<DateTime<Utc>>,
    pub derived: Planned<DerivedFields>,
}

#[derive(Debug, Clone)]
pub struct StaticResource<C: Clock> {
    clock: C,
}

impl<C: Clock> StaticResource<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn plan(
        &self,
        prior: Option<&StaticEntity>,
        config: &StaticConfig,
    ) -> Result<StaticPlan, ResourceError> {
        let base = config.validate()?;
        let (action, base) = decide(prior, base, &config.triggers);
        let base = Planned::from(base);
        Ok(StaticPlan {
            action,
            derived: base.map(|b| DerivedFields::from_instant(&b)),
            base,
        })
    }

    pub fn apply(
        &self,
        prior: Option<&StaticEntity>,
        config: &StaticConfig,
        plan: &StaticPlan,
    ) -> Result<Applied<StaticEntity>, ResourceError> {
        let base = config.validate()?;
        let (action, base) = decide(prior, base, &config.triggers);
        plan.action.verify(&action)?;

        let entity = match (&action, prior) {
            (PlanAction::NoOp, Some(prior)) => prior.clone(),
            _ => StaticEntity::new(
                base.unwrap_or_else(|| whole_seconds(self.clock.now())),
                config.triggers.clone(),
            ),
        };

        plan.base.verify("rfc3339", &entity.base)?;
        plan.derived.verify("derived", &entity.derived)?;

        Ok(Applied {
            entity,
            event: action.event(),
        })
    }
}

fn decide(
    prior: Option<&StaticEntity>,
    base: Option<DateTime<Utc>>,
    triggers: &BTreeMap<String, String>,
) -> (PlanAction, Option<DateTime<Utc>>) {
    let Some(prior) = prior else {
        return (PlanAction::Create, base);
    };
    let reason = match base {
        Some(base) if base != prior.base => Some("rfc3339 changed"),
        _ if *triggers != prior.triggers => Some("triggers changed"),
        _ => None,
    };
    match reason {
        Some(reason) => (
            PlanAction::Replace {
                reason: reason.to_string(),
            },
            base,
        ),
        None => (PlanAction::NoOp, Some(prior.base)),
    }
}
