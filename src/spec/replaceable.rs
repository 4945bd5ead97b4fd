//! Replaceable containers.
//!
//! Each container pairs a payload with a `replace` flag. A more specific
//! layer that sets `replace` discards whatever the less specific layers
//! contributed to that container; otherwise the two are combined.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::spec::is_false;
use crate::spec::plugins::ExternalPlugin;
use crate::spec::protection::ContextPolicy;

/// An ordered list of strings that unions with, or replaces, its parent.
///
/// # Examples
///
/// ```
/// use pipeline_scheduler::ReplaceableSliceOfStrings;
///
/// let plugins = ReplaceableSliceOfStrings::new(["approve", "lgtm"]);
/// assert!(plugins.contains("lgtm"));
/// assert!(!plugins.replace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceableSliceOfStrings {
    pub items: Vec<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

impl ReplaceableSliceOfStrings {
    /// Creates a merging list from the given items.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            replace: false,
        }
    }

    /// Creates a list that replaces whatever its parents defined.
    pub fn replacing<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replace: true,
            ..Self::new(items)
        }
    }

    /// Returns true if `item` is present.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }
}

/// An ordered list of external plugin descriptors.
///
/// Unlike the string lists, plugins are never de-duplicated: a non-replacing
/// child simply gets the parent's plugins appended after its own.
/// When `items` is absent the parent's items are inherited even if the
/// container itself was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceableSliceOfExternalPlugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ExternalPlugin>>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

impl ReplaceableSliceOfExternalPlugins {
    pub fn new(items: Vec<ExternalPlugin>) -> Self {
        Self {
            items: Some(items),
            replace: false,
        }
    }

    pub fn replacing(items: Vec<ExternalPlugin>) -> Self {
        Self {
            items: Some(items),
            replace: true,
        }
    }
}

/// A string-to-string mapping (job labels).
///
/// Keys are kept sorted so serialized documents are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceableMapOfStringString {
    pub items: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

impl ReplaceableMapOfStringString {
    pub fn new<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            replace: false,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

/// Per-branch context policies, keyed by branch name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplaceableMapOfStringContextPolicy {
    pub items: BTreeMap<String, ContextPolicy>,

    #[serde(skip_serializing_if = "is_false")]
    pub replace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_flag_defaults_to_false_and_is_omitted() {
        let list: ReplaceableSliceOfStrings = serde_yaml::from_str("items: [a, b]").unwrap();
        assert!(!list.replace);
        assert_eq!(list.items, vec!["a", "b"]);

        let yaml = serde_yaml::to_string(&list).unwrap();
        assert!(!yaml.contains("replace"));
    }

    #[test]
    fn test_replacing_constructor_sets_flag() {
        let list = ReplaceableSliceOfStrings::replacing(["c"]);
        assert!(list.replace);
        assert!(list.contains("c"));
    }

    #[test]
    fn test_external_plugin_items_absent_is_distinct_from_empty() {
        let absent: ReplaceableSliceOfExternalPlugins = serde_yaml::from_str("replace: true").unwrap();
        assert!(absent.items.is_none());

        let empty: ReplaceableSliceOfExternalPlugins = serde_yaml::from_str("items: []").unwrap();
        assert_eq!(empty.items, Some(Vec::new()));
    }

    #[test]
    fn test_label_map_serializes_sorted() {
        let labels = ReplaceableMapOfStringString::new([("zeta", "1"), ("alpha", "2")]);
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"items":{"alpha":"2","zeta":"1"}}"#);
        assert_eq!(labels.get("alpha"), Some("2"));
    }
}
