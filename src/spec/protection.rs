//! Branch protection and status-context policy sections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::spec::is_false;
use crate::spec::replaceable::{ReplaceableMapOfStringContextPolicy, ReplaceableSliceOfStrings};

/// Which status contexts gate a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ContextPolicy {
    /// Ignore contexts that are neither required nor optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_unknown_contexts: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_contexts: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_if_present_contexts: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_contexts: Option<ReplaceableSliceOfStrings>,

    /// Also require the contexts configured through branch protection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_branch_protection: Option<bool>,
}

/// Context policy for a repository, with per-branch overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RepoContextPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_policy: Option<ContextPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<ReplaceableMapOfStringContextPolicy>,
}

/// Teams and users allowed to act on a protected branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Restrictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<ReplaceableSliceOfStrings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<ReplaceableSliceOfStrings>,
}

/// Pull request review requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal_restrictions: Option<Restrictions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_stale: Option<bool>,

    /// Require a review from a code owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_owners: Option<bool>,

    /// Number of approving reviews required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approvals: Option<u32>,
}

/// Branch protection settings applied by the git provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProtectionPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_pull_request_reviews: Option<ReviewPolicy>,

    /// Enforce the policy for repository administrators too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,
}

/// The organization-wide protection policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GlobalProtectionPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_policy: Option<ProtectionPolicy>,

    /// Protect branches that have tests even when not explicitly listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_tested: Option<bool>,
}

/// A default protection policy plus named per-branch policies.
///
/// Per-branch entries are combined key by key: a child entry always wins
/// over a parent entry for the same branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProtectionPolicies {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_policy: Option<ProtectionPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<BTreeMap<String, ProtectionPolicy>>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}
