use crate::core::types::Feature;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Feature identifier -> position in the feature set, as supplied by the parent
///
/// Trusted as given; `is_consistent_with` exists for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureIdMapping(HashMap<String, usize>);

impl FeatureIdMapping {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Build a mapping that satisfies `features[mapping[k]].uuid == k`
    pub fn from_features(features: &[Feature]) -> Self {
        Self(
            features
                .iter()
                .enumerate()
                .map(|(idx, f)| (f.uuid.clone(), idx))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, index: usize) {
        self.0.insert(name.into(), index);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_consistent_with(&self, features: &[Feature]) -> bool {
        self.0
            .iter()
            .all(|(name, &idx)| features.get(idx).is_some_and(|f| &f.uuid == name))
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for FeatureIdMapping {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered feature identifiers, resolved once per feature set
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureIndex {
    pub fn resolve(features: &[Feature]) -> Self {
        let ids: Vec<String> = features.iter().map(|f| f.uuid.clone()).collect();
        let mut positions = HashMap::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            // first occurrence wins
            positions.entry(id.clone()).or_insert(idx);
        }
        Self { ids, positions }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
