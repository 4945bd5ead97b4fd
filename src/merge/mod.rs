//! Field-merge rules.
//!
//! Every rule has the same shape: a *child* value (more specific, already
//! accumulated) absorbs a *parent* value (less specific) in place. The child
//! always wins for fields it sets; the parent only fills gaps. The parent is
//! borrowed and never written to.
//!
//! Rules by field category:
//!
//! | Category | Rule |
//! |---|---|
//! | optional scalar | [`fill`] |
//! | optional nested section | [`fill_or_merge`] + [`Merge`] |
//! | replaceable list / map | [`Merge`] impls in `rules` |
//! | name-keyed job list | [`reconcile_jobs`] |

mod jobs;
mod rules;
mod sections;

use crate::config::QueryMergeMode;

pub use jobs::{reconcile_jobs, JobList, MergeJob};

/// A value that can absorb the settings of a less specific layer.
pub trait Merge {
    /// Fills whatever `self` leaves unspecified from `parent`.
    fn merge_from(&mut self, parent: &Self);
}

/// Per-call settings threaded through the job-level rules.
#[derive(Debug, Clone, Copy)]
pub struct MergeContext<'a> {
    /// Name of the parent layer being applied, used in errors and logs.
    pub layer: &'a str,

    pub query_merge: QueryMergeMode,
}

/// Takes the parent's value when the child has none.
#[inline]
pub fn fill<T: Clone>(child: &mut Option<T>, parent: &Option<T>) {
    if child.is_none() {
        child.clone_from(parent);
    }
}

/// Takes the parent's section wholesale when the child has none, otherwise
/// merges the two field by field.
#[inline]
pub fn fill_or_merge<T: Merge + Clone>(child: &mut Option<T>, parent: &Option<T>) {
    match (child.as_mut(), parent) {
        (None, _) => child.clone_from(parent),
        (Some(c), Some(p)) => c.merge_from(p),
        (Some(_), None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{ReplaceableSliceOfStrings, Trigger};

    #[test]
    fn test_fill_keeps_child_value() {
        let mut child = Some(1);
        fill(&mut child, &Some(2));
        assert_eq!(child, Some(1));
    }

    #[test]
    fn test_fill_takes_parent_when_unset() {
        let mut child: Option<String> = None;
        fill(&mut child, &Some("parent".to_string()));
        assert_eq!(child.as_deref(), Some("parent"));

        let mut still_none: Option<u32> = None;
        fill(&mut still_none, &None);
        assert!(still_none.is_none());
    }

    #[test]
    fn test_fill_or_merge_recurses_when_both_set() {
        let mut child = Some(Trigger {
            trusted_org: Some("child-org".to_string()),
            ..Trigger::default()
        });
        let parent = Some(Trigger {
            trusted_org: Some("parent-org".to_string()),
            only_org_members: Some(true),
            ..Trigger::default()
        });

        fill_or_merge(&mut child, &parent);

        let child = child.unwrap();
        assert_eq!(child.trusted_org.as_deref(), Some("child-org"));
        assert_eq!(child.only_org_members, Some(true));
    }

    #[test]
    fn test_fill_or_merge_takes_parent_section_wholesale() {
        let mut child: Option<ReplaceableSliceOfStrings> = None;
        let parent = Some(ReplaceableSliceOfStrings::replacing(["a"]));
        fill_or_merge(&mut child, &parent);
        assert_eq!(child, parent);
    }
}
