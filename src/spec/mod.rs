//! The Scheduler document model.
//!
//! A [`SchedulerSpec`] is used both for the partial documents authored at
//! each level of the hierarchy (team, org, repository) and for the resolved
//! document produced by folding them. Every field is optional: `None` means
//! "not specified at this layer" and defers to less specific layers.

mod jobs;
mod plugins;
mod protection;
mod replaceable;

use serde::{Deserialize, Serialize};

pub use jobs::{
    Brancher, JobBase, JobKind, NamedJob, Periodic, Periodics, Postsubmit, Postsubmits, Presubmit,
    Presubmits, Query, RegexpChangeMatcher,
};
pub use plugins::{Approve, ExternalPlugin, Lgtm, MergeMethod, Merger, Trigger};
pub use protection::{
    ContextPolicy, GlobalProtectionPolicy, ProtectionPolicies, ProtectionPolicy,
    RepoContextPolicy, Restrictions, ReviewPolicy,
};
pub use replaceable::{
    ReplaceableMapOfStringContextPolicy, ReplaceableMapOfStringString,
    ReplaceableSliceOfExternalPlugins, ReplaceableSliceOfStrings,
};

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Build agent selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SchedulerAgent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// Extra links rendered alongside job results. Opaque to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Attachment {
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

/// A partial or resolved scheduler policy document.
///
/// # Examples
///
/// ```
/// use pipeline_scheduler::SchedulerSpec;
///
/// let spec: SchedulerSpec = serde_yaml::from_str(
///     "plugins:\n  items: [approve, lgtm]\n",
/// ).unwrap();
///
/// assert_eq!(spec.plugins.unwrap().items, vec!["approve", "lgtm"]);
/// assert!(spec.presubmits.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SchedulerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_agent: Option<SchedulerAgent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<GlobalProtectionPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presubmits: Option<Presubmits>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postsubmits: Option<Postsubmits>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodics: Option<Periodics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve: Option<Approve>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lgtm: Option<Lgtm>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_plugins: Option<ReplaceableSliceOfExternalPlugins>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merger: Option<Merger>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl SchedulerSpec {
    /// Returns true if no section is specified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Looks up a presubmit by name.
    #[must_use]
    pub fn presubmit(&self, name: &str) -> Option<&Presubmit> {
        self.presubmits
            .as_ref()?
            .items
            .iter()
            .find(|p| p.name() == Some(name))
    }

    /// Looks up a postsubmit by name.
    #[must_use]
    pub fn postsubmit(&self, name: &str) -> Option<&Postsubmit> {
        self.postsubmits
            .as_ref()?
            .items
            .iter()
            .find(|p| p.name() == Some(name))
    }
}
