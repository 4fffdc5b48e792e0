// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML manifest declaring the desired time resources
//!
//! ```toml
//! [rotating.api_key]
//! rotation_days = 30
//!
//! [offset.grace]
//! offset_days = 7
//!
//! [static.epoch]
//! rfc3339 = "2020-01-01T00:00:00Z"
//! ```

use crate::error::ResourceError;
use crate::fixed::StaticConfig;
use crate::lifecycle::ResourceKind;
use crate::offset::OffsetConfig;
use crate::rotating::RotatingConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid resource name {0:?}: use letters, digits, '-' or '_'")]
    InvalidName(String),
    #[error("{kind}.{name}: {source}")]
    Resource {
        kind: ResourceKind,
        name: String,
        source: ResourceError,
    },
}

/// Every resource the host should converge, keyed by name within a kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub rotating: BTreeMap<String, RotatingConfig>,
    #[serde(default)]
    pub offset: BTreeMap<String, OffsetConfig>,
    #[serde(default, rename = "static")]
    pub fixed: BTreeMap<String, StaticConfig>,
}

impl Manifest {
    pub fn is_empty(&self) -> bool {
        self.rotating.is_empty() && self.offset.is_empty() && self.fixed.is_empty()
    }

    /// Declared `(kind, name)` pairs in a stable order
    pub fn entries(&self) -> Vec<(ResourceKind, &str)> {
        let rotating = self
            .rotating
            .keys()
            .map(|n| (ResourceKind::Rotating, n.as_str()));
        let offset = self.offset.keys().map(|n| (ResourceKind::Offset, n.as_str()));
        let fixed = self.fixed.keys().map(|n| (ResourceKind::Static, n.as_str()));
        rotating.chain(offset).chain(fixed).collect()
    }

    pub fn declares(&self, kind: ResourceKind, name: &str) -> bool {
        match kind {
            ResourceKind::Rotating => self.rotating.contains_key(name),
            ResourceKind::Offset => self.offset.contains_key(name),
            ResourceKind::Static => self.fixed.contains_key(name),
        }
    }

    /// Validate every declaration without touching any state
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (kind, name) in self.entries() {
            if !is_valid_name(name) {
                return Err(ManifestError::InvalidName(name.to_string()));
            }
            let checked = match kind {
                ResourceKind::Rotating => self.rotating[name].validate().map(|_| ()),
                ResourceKind::Offset => self.offset[name].validate().map(|_| ()),
                ResourceKind::Static => self.fixed[name].validate().map(|_| ()),
            };
            checked.map_err(|source| ManifestError::Resource {
                kind,
                name: name.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parse and validate a manifest from TOML content
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = toml::from_str(content)?;
    manifest.validate()?;
    Ok(manifest)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
