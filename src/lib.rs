//! # pipeline-scheduler - Layered Scheduler Policy Resolution
//!
//! A pipeline's effective scheduler policy is assembled from several
//! `Scheduler` documents: organization defaults, repository settings,
//! per-environment overrides. This crate folds such an ordered list of layers
//! into one document where the more specific layer always wins and less
//! specific layers only fill in what was left unspecified.
//!
//! ## Core Concepts
//!
//! - **Layer**: One [`SchedulerSpec`] document; layers are ordered least specific first
//! - **Gap-filling**: An unset field takes the value of the nearest less specific layer that sets it
//! - **Replaceable container**: A list or map that unions with its parent unless `replace` is set
//! - **Job reconciliation**: Presubmits and postsubmits are matched across layers by name
//!
//! ## Usage
//!
//! ```rust
//! use pipeline_scheduler::{parse_document, resolve, DocumentFormat};
//!
//! let org = parse_document(
//!     "plugins:\n  items: [approve, lgtm]\ntrigger:\n  trustedOrg: acme\n",
//!     DocumentFormat::Yaml,
//! )?;
//! let repo = parse_document(
//!     "plugins:\n  items: [lgtm, hold]\n",
//!     DocumentFormat::Yaml,
//! )?;
//!
//! let resolved = resolve(&[org.spec, repo.spec])?;
//! assert_eq!(resolved.plugins.unwrap().items, vec!["lgtm", "hold", "approve"]);
//! assert_eq!(resolved.trigger.unwrap().trusted_org.as_deref(), Some("acme"));
//! # Ok::<(), pipeline_scheduler::SchedulerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Document model
pub mod error;
pub mod spec;

// Resolution
pub mod config;
pub mod merge;
pub mod resolver;

// Document I/O
pub mod fingerprint;
pub mod loader;
pub mod validation;

pub use config::{QueryMergeMode, ResolverConfig};
pub use error::{
    ConfigError, LoadError, ResolveError, SchedulerError, SchedulerResult, ValidationError,
};
pub use fingerprint::{fingerprint, Fingerprint};
pub use loader::{
    load_layer, load_layers, parse_document, render_spec, DocumentFormat, ObjectMeta,
    SchedulerDocument, SCHEDULER_KIND,
};
pub use merge::{Merge, MergeContext};
pub use resolver::{resolve, Layer, Resolver};
pub use spec::{
    Approve, Attachment, Brancher, ContextPolicy, ExternalPlugin, GlobalProtectionPolicy, JobBase,
    JobKind, Lgtm, MergeMethod, Merger, NamedJob, Periodic, Periodics, Postsubmit, Postsubmits,
    Presubmit, Presubmits, ProtectionPolicies, ProtectionPolicy, Query, RegexpChangeMatcher,
    ReplaceableMapOfStringContextPolicy, ReplaceableMapOfStringString,
    ReplaceableSliceOfExternalPlugins, ReplaceableSliceOfStrings, RepoContextPolicy, Restrictions,
    ReviewPolicy, SchedulerAgent, SchedulerSpec, Trigger,
};
pub use validation::validate_spec;
