// reorg: Phased Source-Tree Reorganizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phase plan data model.
//!
//! # Structure
//!
//! ```text
//! PhasePlan
//!   phases (ascending PhaseId)
//!     Phase
//!       moves:    [MoveOperation]    src-relative paths
//!       manifest: Option<ManifestSpec>
//!       rewrites: [RewriteRule]      applied in declaration order
//!   finalize: Option<ManifestSpec>   top-level manifest, "all" only
//! ```
//!
//! A plan is immutable data. [`table::standard`] builds the built-in one.
//!
//! # Rule Ordering
//!
//! Rules of one phase run in order, and a later rule sees the text produced
//! by earlier ones. [`PhasePlan::order_dependent_rules`] lists the pairs
//! where that can happen so they can be reviewed; nothing is reordered.

pub mod table;


use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{PlanError, ReorgResult};

use super::manifest::ManifestSpec;

/// Statically numbered phase identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseId {
    Primitives = 1,
    Model = 2,
    View = 3,
    Input = 4,
    Services = 5,
    App = 6,
    ViewStream = 7,
}

impl PhaseId {
    /// Every phase, in execution order.
    pub const ALL: [Self; 7] = [
        Self::Primitives,
        Self::Model,
        Self::View,
        Self::Input,
        Self::Services,
        Self::App,
        Self::ViewStream,
    ];

    /// Phase for a 1-based number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Primitives),
            2 => Some(Self::Model),
            3 => Some(Self::View),
            4 => Some(Self::Input),
            5 => Some(Self::Services),
            6 => Some(Self::App),
            7 => Some(Self::ViewStream),
            _ => None,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primitives => "primitives",
            Self::Model => "model",
            Self::View => "view",
            Self::Input => "input",
            Self::Services => "services",
            Self::App => "app",
            Self::ViewStream => "view-stream",
        }
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {} ({})", self.number(), self.name())
    }
}

/// Relocation of one file or directory, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOperation {
    pub source_path: String,
    pub destination_path: String,
}

impl MoveOperation {
    #[must_use]
    pub fn new(source_path: impl Into<String>, destination_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

/// Replacement of one symbolic (module) path by another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteRule {
    pub old_symbol: String,
    pub new_symbol: String,
}

impl RewriteRule {
    #[must_use]
    pub fn new(old_symbol: impl Into<String>, new_symbol: impl Into<String>) -> Self {
        Self {
            old_symbol: old_symbol.into(),
            new_symbol: new_symbol.into(),
        }
    }

    /// Returns whether the rule maps a path to itself.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.old_symbol == self.new_symbol
    }

    /// Returns whether applying the rule twice rewrites its own output,
    /// e.g. `view` -> `view::stream`.
    #[must_use]
    pub fn rewrites_own_output(&self) -> bool {
        extends(&self.new_symbol, &self.old_symbol)
    }

    fn validate(&self) -> ReorgResult<()> {
        let invalid = |message: &str| PlanError::InvalidRule {
            old: self.old_symbol.clone(),
            new: self.new_symbol.clone(),
            message: message.to_string(),
        };

        for symbol in [&self.old_symbol, &self.new_symbol] {
            if symbol.is_empty() {
                return Err(invalid("symbolic paths must not be empty").into());
            }
            if symbol.starts_with("::") || symbol.ends_with("::") {
                return Err(invalid("symbolic paths must not start or end with '::'").into());
            }
            if symbol.chars().any(|c| c.is_whitespace() || matches!(c, ';' | '{' | '}')) {
                return Err(invalid("symbolic paths must be plain module paths").into());
            }
        }
        Ok(())
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old_symbol, self.new_symbol)
    }
}

/// `longer` is `shorter` followed by at least one more path segment.
fn extends(longer: &str, shorter: &str) -> bool {
    longer
        .strip_prefix(shorter)
        .is_some_and(|rest| rest.starts_with("::"))
}

/// One unit of reorganization work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub id: PhaseId,
    pub moves: Vec<MoveOperation>,
    pub manifest: Option<ManifestSpec>,
    pub rewrites: Vec<RewriteRule>,
}

impl Phase {
    #[must_use]
    pub const fn new(id: PhaseId) -> Self {
        Self {
            id,
            moves: Vec::new(),
            manifest: None,
            rewrites: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_move(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        self.moves.push(MoveOperation::new(source, destination));
        self
    }

    #[must_use]
    pub fn with_manifest(mut self, manifest: ManifestSpec) -> Self {
        self.manifest = Some(manifest);
        self
    }

    #[must_use]
    pub fn with_rewrite(
        mut self,
        old_symbol: impl Into<String>,
        new_symbol: impl Into<String>,
    ) -> Self {
        self.rewrites.push(RewriteRule::new(old_symbol, new_symbol));
        self
    }

    /// Directories this phase needs before moving: the manifest directory
    /// and the parent of every destination, sorted and deduplicated.
    #[must_use]
    pub fn directories(&self) -> Vec<String> {
        let manifest_dir = self
            .manifest
            .as_ref()
            .map(|m| m.directory.clone())
            .filter(|dir| !dir.is_empty());

        let parents = self.moves.iter().filter_map(|op| {
            Path::new(&op.destination_path)
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(|parent| parent.to_string_lossy().into_owned())
        });

        manifest_dir
            .into_iter()
            .chain(parents)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// A pair of rules in one phase where the later rule can match text the
/// earlier rule produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDependency {
    pub phase: PhaseId,
    pub earlier: RewriteRule,
    pub later: RewriteRule,
}

impl fmt::Display for RuleDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' runs after '{}' and can match its output",
            self.phase, self.later, self.earlier
        )
    }
}

/// Ordered, immutable set of phases plus the finalize manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhasePlan {
    phases: Vec<Phase>,
    finalize: Option<ManifestSpec>,
}

impl PhasePlan {
    /// Builds a plan, ordering phases by identifier.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::DuplicatePhase` if two phases share an identifier,
    /// or `PlanError::InvalidRule` for a rule that cannot be anchored.
    pub fn new(mut phases: Vec<Phase>, finalize: Option<ManifestSpec>) -> ReorgResult<Self> {
        phases.sort_by_key(|phase| phase.id);
        if let Some(pair) = phases.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(PlanError::DuplicatePhase(pair[0].id.number()).into());
        }
        for rule in phases.iter().flat_map(|phase| &phase.rewrites) {
            rule.validate()?;
        }
        Ok(Self { phases, finalize })
    }

    /// The built-in plan.
    #[must_use]
    pub fn standard() -> Self {
        table::standard()
    }

    /// Phases in ascending order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Looks up a phase by identifier.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::PhaseNotDefined` if the plan has no such phase.
    pub fn phase(&self, id: PhaseId) -> ReorgResult<&Phase> {
        self.phases
            .iter()
            .find(|phase| phase.id == id)
            .ok_or_else(|| PlanError::PhaseNotDefined(id.number()).into())
    }

    #[must_use]
    pub const fn finalize(&self) -> Option<&ManifestSpec> {
        self.finalize.as_ref()
    }

    /// Lists rule pairs whose outcome depends on declaration order.
    ///
    /// A later rule depends on an earlier one when its `old_symbol` equals
    /// the earlier `new_symbol`, or either extends the other by whole
    /// `::` segments.
    #[must_use]
    pub fn order_dependent_rules(&self) -> Vec<RuleDependency> {
        let mut found = Vec::new();
        for phase in &self.phases {
            for (i, earlier) in phase.rewrites.iter().enumerate() {
                for later in &phase.rewrites[i + 1..] {
                    let produced = &earlier.new_symbol;
                    let matched = &later.old_symbol;
                    if matched == produced
                        || extends(matched, produced)
                        || extends(produced, matched)
                    {
                        found.push(RuleDependency {
                            phase: phase.id,
                            earlier: earlier.clone(),
                            later: later.clone(),
                        });
                    }
                }
            }
        }
        found
    }
}
