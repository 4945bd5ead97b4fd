//! Chat-ops plugin sections: trigger, approve, lgtm, merger and external plugins.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spec::protection::ContextPolicy;
use crate::spec::replaceable::ReplaceableSliceOfStrings;

/// How a pull request is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    Rebase,
    Squash,
}

impl fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
            Self::Squash => write!(f, "squash"),
        }
    }
}

/// Who may trigger tests on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Trigger {
    /// Org whose members are trusted to trigger jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_org: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_org_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_org_members: Option<bool>,

    /// Ignore `/ok-to-test` comments from trusted users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_ok_to_test: Option<bool>,
}

/// Approval workflow settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Approve {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_self_approval: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lgtm_acts_as_approve: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_review_state: Option<bool>,
}

/// "Looks good to me" review settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Lgtm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_acts_as_lgtm: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_tree_hash: Option<bool>,

    /// Members of this team keep their LGTM across new pushes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_lgtm_team: Option<String>,
}

/// Automatic merge settings.
///
/// Periods are duration strings (`"1m"`, `"30s"`) handed through to the
/// merge bot untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Merger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_update_period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_status_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocker_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_goroutines: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_type: Option<MergeMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_policy: Option<ContextPolicy>,
}

/// A webhook-driven plugin hosted outside the bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ExternalPlugin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Webhook event types forwarded to the plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<ReplaceableSliceOfStrings>,
}

impl ExternalPlugin {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            endpoint: Some(endpoint.into()),
            events: None,
        }
    }

    #[must_use]
    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = Some(ReplaceableSliceOfStrings::new(events));
        self
    }
}
