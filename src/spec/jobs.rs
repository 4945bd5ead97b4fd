//! Job definitions: presubmits, postsubmits and periodics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spec::is_false;
use crate::spec::plugins::MergeMethod;
use crate::spec::protection::{ProtectionPolicies, RepoContextPolicy};
use crate::spec::replaceable::{ReplaceableMapOfStringString, ReplaceableSliceOfStrings};

/// The list a job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Presubmit,
    Postsubmit,
    Periodic,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presubmit => write!(f, "presubmit"),
            Self::Postsubmit => write!(f, "postsubmit"),
            Self::Periodic => write!(f, "periodic"),
        }
    }
}

/// Fields shared by every job kind.
///
/// Unknown keys are rejected by the job struct that flattens this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobBase {
    /// Job name; the identity used to match jobs across layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Build agent that runs the job (e.g. `tekton`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    /// Maximum number of concurrent runs; zero means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<ReplaceableMapOfStringString>,
}

impl JobBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Branch filters. Entries are regular expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Brancher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_branches: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<ReplaceableSliceOfStrings>,
}

/// Run the job only when a changed path matches `run_if_changed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RegexpChangeMatcher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_if_changed: Option<String>,
}

/// A saved pull request search used by the merge pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Query {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orgs: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_repos: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_labels: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included_branches: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_branches: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub review_approved_required: bool,
}

/// A check that runs against pull requests before merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Presubmit {
    #[serde(flatten)]
    pub job: JobBase,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brancher: Option<Brancher>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp_change_matcher: Option<RegexpChangeMatcher>,

    /// Status context the job reports under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_run: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// Comment regex that triggers the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerun_command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_type: Option<MergeMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_policy: Option<RepoContextPolicy>,

    /// Branches the protection `policy` applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<ProtectionPolicies>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<Query>>,
}

impl Presubmit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            job: JobBase::named(name),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A job that runs after changes land on a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Postsubmit {
    #[serde(flatten)]
    pub job: JobBase,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brancher: Option<Brancher>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regexp_change_matcher: Option<RegexpChangeMatcher>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<bool>,
}

impl Postsubmit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            job: JobBase::named(name),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A job run on a cron schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Periodic {
    #[serde(flatten)]
    pub job: JobBase,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Pre-merge checks, reconciled by name across layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Presubmits {
    pub items: Vec<Presubmit>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

/// Post-merge jobs, reconciled by name across layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Postsubmits {
    pub items: Vec<Postsubmit>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

/// Scheduled jobs. Always taken wholesale from the most specific layer that sets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Periodics {
    pub items: Vec<Periodic>,
}

/// A job that can be matched by name across layers.
pub trait NamedJob {
    const KIND: JobKind;

    fn base(&self) -> &JobBase;

    fn name(&self) -> Option<&str> {
        self.base().name.as_deref()
    }
}

impl NamedJob for Presubmit {
    const KIND: JobKind = JobKind::Presubmit;

    fn base(&self) -> &JobBase {
        &self.job
    }
}

impl NamedJob for Postsubmit {
    const KIND: JobKind = JobKind::Postsubmit;

    fn base(&self) -> &JobBase {
        &self.job
    }
}

impl NamedJob for Periodic {
    const KIND: JobKind = JobKind::Periodic;

    fn base(&self) -> &JobBase {
        &self.job
    }
}
