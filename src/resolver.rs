//! The policy resolver: folds an ordered list of layers into one document.
//!
//! Layers are ordered least specific first. The most specific layer seeds
//! the result and every earlier layer, walked backwards, only fills in what
//! the more specific layers left unspecified.

use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::merge::{fill, fill_or_merge, reconcile_jobs, JobList, MergeContext};
use crate::spec::SchedulerSpec;

/// A layer document with a human-readable name (scheduler name or file path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    pub spec: SchedulerSpec,
}

impl Layer {
    pub fn new(name: impl Into<String>, spec: SchedulerSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }
}

/// Resolves layered scheduler documents.
///
/// The resolver holds no state besides its configuration and never modifies
/// the layers it is given; independent calls may run on separate threads.
///
/// # Examples
///
/// ```
/// use pipeline_scheduler::{ReplaceableSliceOfStrings, Resolver, SchedulerSpec};
///
/// let org = SchedulerSpec {
///     plugins: Some(ReplaceableSliceOfStrings::new(["a", "b"])),
///     ..SchedulerSpec::default()
/// };
/// let repo = SchedulerSpec {
///     plugins: Some(ReplaceableSliceOfStrings::new(["b", "c"])),
///     ..SchedulerSpec::default()
/// };
///
/// let resolved = Resolver::default().resolve(&[org, repo]).unwrap();
/// assert_eq!(resolved.plugins.unwrap().items, vec!["b", "c", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves unnamed layers; errors refer to them as `layer[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::AmbiguousJobName`] when a job of a less
    /// specific layer matches more than one accumulated job by name. No
    /// partial result is returned.
    ///
    /// Duplicate names inside one layer are only detected when a less
    /// specific layer has a job of that name. Layers that did not go through
    /// [`validate_spec`](crate::validate_spec) must keep job names unique.
    pub fn resolve(&self, layers: &[SchedulerSpec]) -> Result<SchedulerSpec, ResolveError> {
        let names: Vec<String> = (0..layers.len()).map(|i| format!("layer[{i}]")).collect();
        let named: Vec<(&str, &SchedulerSpec)> = names
            .iter()
            .map(String::as_str)
            .zip(layers.iter())
            .collect();
        self.fold(&named)
    }

    /// Resolves named layers, least specific first.
    ///
    /// Layers from [`load_layer`](crate::load_layer) are already validated.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn resolve_layers(&self, layers: &[Layer]) -> Result<SchedulerSpec, ResolveError> {
        let named: Vec<(&str, &SchedulerSpec)> = layers
            .iter()
            .map(|layer| (layer.name.as_str(), &layer.spec))
            .collect();
        self.fold(&named)
    }

    fn fold(&self, layers: &[(&str, &SchedulerSpec)]) -> Result<SchedulerSpec, ResolveError> {
        let Some((&(top, most_specific), parents)) = layers.split_last() else {
            debug!("no layers to resolve");
            return Ok(SchedulerSpec::default());
        };

        let mut resolved = most_specific.clone();
        for &(name, parent) in parents.iter().rev() {
            debug!(layer = name, "applying parent layer");
            let ctx = MergeContext {
                layer: name,
                query_merge: self.config.query_merge,
            };
            apply_parent(&mut resolved, parent, &ctx)?;
        }

        debug!(layers = layers.len(), most_specific = top, "resolved scheduler policy");
        Ok(resolved)
    }
}

/// Resolves layers with the default configuration.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(layers: &[SchedulerSpec]) -> Result<SchedulerSpec, ResolveError> {
    Resolver::default().resolve(layers)
}

fn merge_job_list<L: JobList + Clone>(
    child: &mut Option<L>,
    parent: &Option<L>,
    ctx: &MergeContext<'_>,
) -> Result<(), ResolveError> {
    match (child.as_mut(), parent) {
        (None, _) => child.clone_from(parent),
        (Some(jobs), Some(parent_jobs)) => reconcile_jobs(jobs, parent_jobs, ctx)?,
        (Some(_), None) => {}
    }
    Ok(())
}

/// Applies one less specific layer to the accumulated document.
fn apply_parent(
    child: &mut SchedulerSpec,
    parent: &SchedulerSpec,
    ctx: &MergeContext<'_>,
) -> Result<(), ResolveError> {
    fill_or_merge(&mut child.scheduler_agent, &parent.scheduler_agent);
    fill_or_merge(&mut child.policy, &parent.policy);
    merge_job_list(&mut child.presubmits, &parent.presubmits, ctx)?;
    merge_job_list(&mut child.postsubmits, &parent.postsubmits, ctx)?;
    fill_or_merge(&mut child.trigger, &parent.trigger);
    fill_or_merge(&mut child.approve, &parent.approve);
    fill_or_merge(&mut child.lgtm, &parent.lgtm);
    fill_or_merge(&mut child.external_plugins, &parent.external_plugins);
    fill_or_merge(&mut child.plugins, &parent.plugins);
    fill_or_merge(&mut child.merger, &parent.merger);
    fill(&mut child.periodics, &parent.periodics);
    fill(&mut child.attachments, &parent.attachments);
    Ok(())
}
