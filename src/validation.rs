//! Layer validation.
//!
//! Checks a single layer document for problems that would make it unusable
//! or make a later merge ambiguous. Merge semantics never depend on these
//! checks: the resolver accepts any document, this module is for callers
//! that read layers from untrusted files.

use std::collections::HashSet;

use regex::Regex;

use crate::error::ValidationError;
use crate::spec::{
    Brancher, NamedJob, Periodics, Postsubmits, Presubmits, RegexpChangeMatcher, SchedulerSpec,
};

/// Validates one layer document.
///
/// # Errors
///
/// Returns the first problem found, checking jobs before plugin sections.
pub fn validate_spec(spec: &SchedulerSpec) -> Result<(), ValidationError> {
    if let Some(presubmits) = &spec.presubmits {
        validate_presubmits(presubmits)?;
    }
    if let Some(postsubmits) = &spec.postsubmits {
        validate_postsubmits(postsubmits)?;
    }
    if let Some(periodics) = &spec.periodics {
        validate_periodics(periodics)?;
    }
    if let Some(merger) = &spec.merger {
        if merger.max_goroutines == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "merger.maxGoroutines".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_presubmits(presubmits: &Presubmits) -> Result<(), ValidationError> {
    validate_names(&presubmits.items, true)?;
    for job in &presubmits.items {
        validate_matchers(job.brancher.as_ref(), job.regexp_change_matcher.as_ref())?;
    }
    Ok(())
}

fn validate_postsubmits(postsubmits: &Postsubmits) -> Result<(), ValidationError> {
    validate_names(&postsubmits.items, true)?;
    for job in &postsubmits.items {
        validate_matchers(job.brancher.as_ref(), job.regexp_change_matcher.as_ref())?;
    }
    Ok(())
}

fn validate_periodics(periodics: &Periodics) -> Result<(), ValidationError> {
    validate_names(&periodics.items, false)
}

/// Every job needs a non-empty name; merged lists also need unique names.
fn validate_names<J: NamedJob>(jobs: &[J], unique: bool) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, job) in jobs.iter().enumerate() {
        let name = match job.name().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(ValidationError::MissingJobName {
                    kind: J::KIND,
                    index,
                })
            }
        };
        if unique && !seen.insert(name) {
            return Err(ValidationError::DuplicateJobName {
                kind: J::KIND,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_matchers(
    brancher: Option<&Brancher>,
    matcher: Option<&RegexpChangeMatcher>,
) -> Result<(), ValidationError> {
    if let Some(pattern) = matcher.and_then(|m| m.run_if_changed.as_deref()) {
        validate_pattern("runIfChanged", pattern)?;
    }
    let Some(brancher) = brancher else {
        return Ok(());
    };
    for (field, list) in [
        ("branches", &brancher.branches),
        ("skipBranches", &brancher.skip_branches),
    ] {
        for pattern in list.iter().flat_map(|l| l.items.iter()) {
            validate_pattern(field, pattern)?;
        }
    }
    Ok(())
}

fn validate_pattern(field: &'static str, pattern: &str) -> Result<(), ValidationError> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}
