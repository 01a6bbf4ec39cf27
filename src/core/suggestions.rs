//! Suggestion files: the features of a dataset plus the actions suggested for it.

use crate::core::error::ActionRowError;
use crate::core::features::FeatureIdMapping;
use crate::core::types::{FeatureSet, TransformerAction};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggestions {
    #[serde(default)]
    pub features: FeatureSet,
    #[serde(default)]
    pub actions: Vec<TransformerAction>,
    /// Derived from `features` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_id_mapping: Option<FeatureIdMapping>,
}

impl Suggestions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ActionRowError> {
        let content = std::fs::read_to_string(path).map_err(|source| ActionRowError::SuggestionsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ActionRowError::SuggestionsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Supplied mapping, or one built from the feature order
    pub fn mapping(&self) -> FeatureIdMapping {
        match &self.feature_id_mapping {
            Some(mapping) => {
                if !mapping.is_consistent_with(&self.features) {
                    warn!("feature id mapping does not match feature order; using it as given");
                }
                mapping.clone()
            }
            None => FeatureIdMapping::from_features(&self.features),
        }
    }
}
