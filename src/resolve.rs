//! Attribute-set index: resolves attribute names used by operations into
//! their typed definitions.

use crate::error::Inconsistency;
use crate::spec::{Attribute, AttributeSet, Spec};
use std::collections::{HashMap, HashSet};

/// Attribute sets of one spec, by name. Built once per generation run.
///
/// A later set with the same name replaces an earlier one.
#[derive(Debug, Clone)]
pub struct AttributeIndex<'a> {
    sets: HashMap<&'a str, &'a AttributeSet>,
}

impl<'a> AttributeIndex<'a> {
    pub fn new(spec: &'a Spec) -> Self {
        let sets = spec
            .attribute_sets
            .iter()
            .map(|set| (set.name.as_str(), set))
            .collect();
        AttributeIndex { sets }
    }

    pub fn get(&self, set: &str) -> Option<&'a AttributeSet> {
        self.sets.get(set).copied()
    }

    /// Constant prefix of a set, e.g. `ctrl-attr-`.
    pub fn name_prefix(&self, set: &str) -> Result<&'a str, Inconsistency> {
        self.get(set)
            .map(|s| s.name_prefix.as_str())
            .ok_or_else(|| Inconsistency::UnknownAttributeSet {
                set: set.to_string(),
            })
    }

    /// Resolve `wanted` against `set`, in the order of `wanted`.
    ///
    /// Names missing from the set are dropped, and so are repeats of a name
    /// already resolved. A non-empty list that matches nothing is an
    /// inconsistent spec.
    pub fn resolve(
        &self,
        set: &str,
        wanted: &[String],
    ) -> Result<Vec<&'a Attribute>, Inconsistency> {
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        if set.is_empty() {
            return Err(Inconsistency::MissingAttributeSet {
                wanted: wanted.to_vec(),
            });
        }
        let definition = self
            .get(set)
            .ok_or_else(|| Inconsistency::UnknownAttributeSet {
                set: set.to_string(),
            })?;

        let by_name: HashMap<&str, &'a Attribute> = definition
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a))
            .collect();
        let mut seen = HashSet::new();
        let attrs: Vec<&'a Attribute> = wanted
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .filter_map(|name| by_name.get(name.as_str()).copied())
            .collect();

        if attrs.is_empty() {
            return Err(Inconsistency::Unresolved {
                set: set.to_string(),
                wanted: wanted.to_vec(),
            });
        }
        Ok(attrs)
    }
}
