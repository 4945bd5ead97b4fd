//! Name-keyed reconciliation of presubmit and postsubmit lists.

use std::collections::HashMap;

use tracing::debug;

use crate::config::QueryMergeMode;
use crate::error::ResolveError;
use crate::merge::{fill, fill_or_merge, Merge, MergeContext};
use crate::spec::{NamedJob, Postsubmit, Postsubmits, Presubmit, Presubmits, Query};

/// A job that can absorb the matching job of a less specific layer.
pub trait MergeJob: NamedJob + Clone {
    fn merge_job(&mut self, parent: &Self, ctx: &MergeContext<'_>);
}

/// A replaceable, name-keyed list of jobs.
pub trait JobList {
    type Job: MergeJob;

    fn jobs(&self) -> &[Self::Job];

    fn replace(&self) -> bool;

    fn parts_mut(&mut self) -> (&mut Vec<Self::Job>, &mut bool);
}

impl JobList for Presubmits {
    type Job = Presubmit;

    fn jobs(&self) -> &[Presubmit] {
        &self.items
    }

    fn replace(&self) -> bool {
        self.replace
    }

    fn parts_mut(&mut self) -> (&mut Vec<Presubmit>, &mut bool) {
        (&mut self.items, &mut self.replace)
    }
}

impl JobList for Postsubmits {
    type Job = Postsubmit;

    fn jobs(&self) -> &[Postsubmit] {
        &self.items
    }

    fn replace(&self) -> bool {
        self.replace
    }

    fn parts_mut(&mut self) -> (&mut Vec<Postsubmit>, &mut bool) {
        (&mut self.items, &mut self.replace)
    }
}

/// Applies the parent's jobs to the child list.
///
/// For every parent job, the child jobs with the same name are looked up:
/// none appends the parent job, one absorbs the parent job, more than one is
/// an [`ResolveError::AmbiguousJobName`]. Jobs without a name never match.
/// Duplicate child names that no parent job refers to are kept as they are.
///
/// # Errors
///
/// Returns `AmbiguousJobName` on the first parent job that matches more than
/// one child job. The child list may be partially updated at that point; the
/// resolver discards it.
pub fn reconcile_jobs<L: JobList>(
    child: &mut L,
    parent: &L,
    ctx: &MergeContext<'_>,
) -> Result<(), ResolveError> {
    let (items, replace) = child.parts_mut();
    if *replace {
        return Ok(());
    }

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (pos, job) in items.iter().enumerate() {
        if let Some(name) = job.name() {
            index.entry(name.to_string()).or_default().push(pos);
        }
    }
    for (name, positions) in index.iter().filter(|(_, p)| p.len() > 1) {
        debug!(
            layer = ctx.layer,
            kind = %<L::Job as NamedJob>::KIND,
            name = %name,
            count = positions.len(),
            "duplicate job name, only an error if the parent names it"
        );
    }

    for parent_job in parent.jobs() {
        let Some(name) = parent_job.name() else {
            items.push(parent_job.clone());
            continue;
        };

        let matches = index.get(name).cloned().unwrap_or_default();
        match matches.as_slice() {
            [] => {
                index.entry(name.to_string()).or_default().push(items.len());
                items.push(parent_job.clone());
            }
            [pos] => items[*pos].merge_job(parent_job, ctx),
            many => {
                return Err(ResolveError::AmbiguousJobName {
                    kind: <L::Job as NamedJob>::KIND,
                    name: name.to_string(),
                    layer: ctx.layer.to_string(),
                    matches: many.len(),
                });
            }
        }
    }

    *replace = parent.replace();
    Ok(())
}

fn merge_queries(child: &mut Option<Vec<Query>>, parent: &Option<Vec<Query>>, ctx: &MergeContext<'_>) {
    match (child.as_mut(), parent) {
        (Some(queries), Some(parent_queries)) => match ctx.query_merge {
            QueryMergeMode::ChildAuthoritative => {
                debug!(
                    layer = ctx.layer,
                    dropped = parent_queries.len(),
                    "keeping child queries, parent queries ignored"
                );
            }
            QueryMergeMode::Append => queries.extend(parent_queries.iter().cloned()),
        },
        _ => fill(child, parent),
    }
}

impl MergeJob for Presubmit {
    fn merge_job(&mut self, parent: &Self, ctx: &MergeContext<'_>) {
        self.job.merge_from(&parent.job);
        fill_or_merge(&mut self.regexp_change_matcher, &parent.regexp_change_matcher);
        fill_or_merge(&mut self.brancher, &parent.brancher);
        fill(&mut self.context, &parent.context);
        fill(&mut self.report, &parent.report);
        fill(&mut self.always_run, &parent.always_run);
        fill(&mut self.optional, &parent.optional);
        fill(&mut self.trigger, &parent.trigger);
        fill(&mut self.rerun_command, &parent.rerun_command);
        fill(&mut self.merge_type, &parent.merge_type);
        fill_or_merge(&mut self.context_policy, &parent.context_policy);
        fill_or_merge(&mut self.branches, &parent.branches);
        fill_or_merge(&mut self.policy, &parent.policy);
        merge_queries(&mut self.queries, &parent.queries, ctx);
    }
}

impl MergeJob for Postsubmit {
    fn merge_job(&mut self, parent: &Self, _ctx: &MergeContext<'_>) {
        self.job.merge_from(&parent.job);
        fill_or_merge(&mut self.regexp_change_matcher, &parent.regexp_change_matcher);
        fill_or_merge(&mut self.brancher, &parent.brancher);
        fill(&mut self.context, &parent.context);
        fill(&mut self.report, &parent.report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Brancher, JobKind, ReplaceableSliceOfStrings};

    fn ctx(mode: QueryMergeMode) -> MergeContext<'static> {
        MergeContext {
            layer: "parent",
            query_merge: mode,
        }
    }

    fn presubmits(items: Vec<Presubmit>) -> Presubmits {
        Presubmits { items, replace: false }
    }

    #[test]
    fn test_matching_presubmit_is_merged() {
        let mut child = presubmits(vec![Presubmit::named("x")]);
        let parent = presubmits(vec![Presubmit::named("x").with_context("ctx1")]);

        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();

        assert_eq!(child.items.len(), 1);
        assert_eq!(child.items[0].context.as_deref(), Some("ctx1"));
    }

    #[test]
    fn test_unmatched_parent_jobs_are_appended_in_order() {
        let mut child = presubmits(vec![Presubmit::named("b")]);
        let parent = presubmits(vec![Presubmit::named("a"), Presubmit::named("b"), Presubmit::named("c")]);

        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();

        let names: Vec<_> = child.items.iter().map(|p| p.name().unwrap()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_child_names_are_fatal() {
        let mut child = presubmits(vec![Presubmit::named("x"), Presubmit::named("x")]);
        let parent = presubmits(vec![Presubmit::named("x")]);

        let err = reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap_err();

        assert_eq!(
            err,
            ResolveError::AmbiguousJobName {
                kind: JobKind::Presubmit,
                name: "x".to_string(),
                layer: "parent".to_string(),
                matches: 2,
            }
        );
    }

    #[test]
    fn test_duplicate_child_names_without_parent_match_are_tolerated() {
        let mut child = presubmits(vec![Presubmit::named("x"), Presubmit::named("x")]);
        let parent = presubmits(vec![Presubmit::named("y")]);
        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();
        assert_eq!(child.items.len(), 3);
    }

    #[test]
    fn test_nameless_parent_jobs_never_match() {
        let mut child = presubmits(vec![Presubmit::default()]);
        let parent = presubmits(vec![Presubmit::default().with_context("anon")]);
        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();
        assert_eq!(child.items.len(), 2);
        assert!(child.items[0].context.is_none());
    }

    #[test]
    fn test_replacing_child_ignores_parent_jobs() {
        let mut child = Presubmits {
            items: vec![Presubmit::named("only")],
            replace: true,
        };
        let parent = presubmits(vec![Presubmit::named("other")]);
        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();
        assert_eq!(child.items.len(), 1);
    }

    #[test]
    fn test_postsubmit_brancher_merges() {
        let mut child = Postsubmits {
            items: vec![Postsubmit {
                brancher: Some(Brancher {
                    branches: Some(ReplaceableSliceOfStrings::new(["main"])),
                    skip_branches: None,
                }),
                ..Postsubmit::named("release")
            }],
            replace: false,
        };
        let parent = Postsubmits {
            items: vec![Postsubmit {
                brancher: Some(Brancher {
                    branches: Some(ReplaceableSliceOfStrings::new(["release-.*"])),
                    skip_branches: Some(ReplaceableSliceOfStrings::new(["wip-.*"])),
                }),
                report: Some(true),
                ..Postsubmit::named("release")
            }],
            replace: false,
        };

        reconcile_jobs(&mut child, &parent, &ctx(QueryMergeMode::default())).unwrap();

        let job = &child.items[0];
        assert_eq!(job.report, Some(true));
        let brancher = job.brancher.as_ref().unwrap();
        assert_eq!(brancher.branches.as_ref().unwrap().items, vec!["main", "release-.*"]);
        assert_eq!(brancher.skip_branches.as_ref().unwrap().items, vec!["wip-.*"]);
    }

    #[test]
    fn test_queries_are_child_authoritative_by_default() {
        let child_query = Query {
            repos: vec!["acme/app".to_string()],
            ..Query::default()
        };
        let parent_query = Query {
            labels: vec!["approved".to_string()],
            ..Query::default()
        };
        let mut child = Presubmit {
            queries: Some(vec![child_query.clone()]),
            ..Presubmit::named("x")
        };
        let parent = Presubmit {
            queries: Some(vec![parent_query.clone()]),
            ..Presubmit::named("x")
        };

        let mut appended = child.clone();

        child.merge_job(&parent, &ctx(QueryMergeMode::ChildAuthoritative));
        assert_eq!(child.queries, Some(vec![child_query.clone()]));

        appended.merge_job(&parent, &ctx(QueryMergeMode::Append));
        assert_eq!(appended.queries, Some(vec![child_query, parent_query]));
    }

    #[test]
    fn test_queries_fill_when_child_has_none() {
        let parent_query = Query {
            milestone: Some("v1".to_string()),
            ..Query::default()
        };
        let mut child = Presubmit::named("x");
        let parent = Presubmit {
            queries: Some(vec![parent_query.clone()]),
            ..Presubmit::named("x")
        };
        child.merge_job(&parent, &ctx(QueryMergeMode::ChildAuthoritative));
        assert_eq!(child.queries, Some(vec![parent_query]));
    }
}
