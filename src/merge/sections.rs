//! Merge rules for the nested policy sections.
//!
//! These are plain "coalesce or recurse" rules: each scalar is filled from the
//! parent when unset and each nested section is merged recursively.

use std::collections::BTreeMap;

use crate::merge::{fill, fill_or_merge, Merge};
use crate::spec::{
    Approve, Brancher, ContextPolicy, GlobalProtectionPolicy, JobBase, Lgtm, Merger,
    ProtectionPolicies, ProtectionPolicy, RegexpChangeMatcher, RepoContextPolicy, Restrictions,
    ReviewPolicy, SchedulerAgent, Trigger,
};

impl Merge for SchedulerAgent {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.agent, &parent.agent);
    }
}

impl Merge for Trigger {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.trusted_org, &parent.trusted_org);
        fill(&mut self.join_org_url, &parent.join_org_url);
        fill(&mut self.only_org_members, &parent.only_org_members);
        fill(&mut self.ignore_ok_to_test, &parent.ignore_ok_to_test);
    }
}

impl Merge for Approve {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.issue_required, &parent.issue_required);
        fill(&mut self.require_self_approval, &parent.require_self_approval);
        fill(&mut self.lgtm_acts_as_approve, &parent.lgtm_acts_as_approve);
        fill(&mut self.ignore_review_state, &parent.ignore_review_state);
    }
}

impl Merge for Lgtm {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.review_acts_as_lgtm, &parent.review_acts_as_lgtm);
        fill(&mut self.store_tree_hash, &parent.store_tree_hash);
        fill(&mut self.sticky_lgtm_team, &parent.sticky_lgtm_team);
    }
}

impl Merge for Merger {
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.context_policy, &parent.context_policy);
        fill(&mut self.merge_type, &parent.merge_type);
        fill(&mut self.max_goroutines, &parent.max_goroutines);
        fill(&mut self.squash_label, &parent.squash_label);
        fill(&mut self.blocker_label, &parent.blocker_label);
        fill(&mut self.pr_status_base_url, &parent.pr_status_base_url);
        fill(&mut self.target_url, &parent.target_url);
        fill(&mut self.sync_period, &parent.sync_period);
        fill(&mut self.status_update_period, &parent.status_update_period);
    }
}

impl Merge for ContextPolicy {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.from_branch_protection, &parent.from_branch_protection);
        fill(&mut self.skip_unknown_contexts, &parent.skip_unknown_contexts);
        fill_or_merge(&mut self.optional_contexts, &parent.optional_contexts);
        fill_or_merge(&mut self.required_contexts, &parent.required_contexts);
        fill_or_merge(
            &mut self.required_if_present_contexts,
            &parent.required_if_present_contexts,
        );
    }
}

impl Merge for RepoContextPolicy {
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.context_policy, &parent.context_policy);
        fill_or_merge(&mut self.branches, &parent.branches);
    }
}

impl Merge for Restrictions {
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.teams, &parent.teams);
        fill_or_merge(&mut self.users, &parent.users);
    }
}

impl Merge for ReviewPolicy {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.approvals, &parent.approvals);
        fill(&mut self.dismiss_stale, &parent.dismiss_stale);
        fill(&mut self.require_owners, &parent.require_owners);
        fill_or_merge(&mut self.dismissal_restrictions, &parent.dismissal_restrictions);
    }
}

impl Merge for ProtectionPolicy {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.protect, &parent.protect);
        fill(&mut self.admins, &parent.admins);
        fill_or_merge(&mut self.restrictions, &parent.restrictions);
        fill_or_merge(
            &mut self.required_pull_request_reviews,
            &parent.required_pull_request_reviews,
        );
    }
}

impl Merge for GlobalProtectionPolicy {
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.protection_policy, &parent.protection_policy);
        fill(&mut self.protect_tested, &parent.protect_tested);
    }
}

impl Merge for ProtectionPolicies {
    /// Merges the default policy recursively; per-branch policies are
    /// first-write-wins by branch name. Absent items behave as an empty map
    /// for `replace`.
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.protection_policy, &parent.protection_policy);

        if self.replace {
            return;
        }
        if let Some(parent_items) = &parent.items {
            let items = self.items.get_or_insert_with(BTreeMap::new);
            for (branch, policy) in parent_items {
                items
                    .entry(branch.clone())
                    .or_insert_with(|| policy.clone());
            }
        }
        self.replace = parent.replace;
    }
}

impl Merge for JobBase {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.name, &parent.name);
        fill(&mut self.namespace, &parent.namespace);
        fill(&mut self.agent, &parent.agent);
        fill(&mut self.cluster, &parent.cluster);
        fill(&mut self.max_concurrency, &parent.max_concurrency);
        fill_or_merge(&mut self.labels, &parent.labels);
    }
}

impl Merge for Brancher {
    fn merge_from(&mut self, parent: &Self) {
        fill_or_merge(&mut self.branches, &parent.branches);
        fill_or_merge(&mut self.skip_branches, &parent.skip_branches);
    }
}

impl Merge for RegexpChangeMatcher {
    fn merge_from(&mut self, parent: &Self) {
        fill(&mut self.run_if_changed, &parent.run_if_changed);
    }
}
