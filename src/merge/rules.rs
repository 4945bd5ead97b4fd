//! Merge rules for replaceable containers.
//!
//! A child with `replace` set keeps its items and ignores the parent. A
//! non-replacing child absorbs the parent's items and then inherits the
//! parent's `replace` flag, so a replace declared at a middle layer still
//! cuts off every layer below it.

use std::collections::HashSet;

use crate::merge::Merge;
use crate::spec::{
    ReplaceableMapOfStringContextPolicy, ReplaceableMapOfStringString,
    ReplaceableSliceOfExternalPlugins, ReplaceableSliceOfStrings,
};

impl Merge for ReplaceableSliceOfStrings {
    /// Appends parent items the child does not already contain, keeping the
    /// child's order and the parent's relative order.
    fn merge_from(&mut self, parent: &Self) {
        if self.replace {
            return;
        }

        let mut seen: HashSet<String> = self.items.iter().cloned().collect();
        for item in &parent.items {
            if seen.insert(item.clone()) {
                self.items.push(item.clone());
            }
        }
        self.replace = parent.replace;
    }
}

impl Merge for ReplaceableSliceOfExternalPlugins {
    /// Concatenates parent plugins after the child's, without de-duplication.
    /// Absent items behave as an empty list, so `{replace: true}` alone still
    /// discards every less specific plugin.
    fn merge_from(&mut self, parent: &Self) {
        if self.replace {
            return;
        }

        if let Some(parent_items) = &parent.items {
            self.items
                .get_or_insert_with(Vec::new)
                .extend(parent_items.iter().cloned());
        }
        self.replace = parent.replace;
    }
}

impl Merge for ReplaceableMapOfStringString {
    /// Adds parent keys missing from the child. Existing child keys are never overwritten.
    fn merge_from(&mut self, parent: &Self) {
        if self.replace {
            return;
        }

        for (key, value) in &parent.items {
            self.items
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self.replace = parent.replace;
    }
}

impl Merge for ReplaceableMapOfStringContextPolicy {
    /// Adds parent branches missing from the child and merges the policies of
    /// branches both sides define.
    fn merge_from(&mut self, parent: &Self) {
        if self.replace {
            return;
        }

        for (branch, parent_policy) in &parent.items {
            match self.items.get_mut(branch) {
                Some(policy) => policy.merge_from(parent_policy),
                None => {
                    self.items.insert(branch.clone(), parent_policy.clone());
                }
            }
        }
        self.replace = parent.replace;
    }
}
