//! Artifact metadata.

use serde::{Deserialize, Serialize};

use crate::features::Feature;

/// Name of the binary label column.
pub const TARGET_COLUMN: &str = "placed";

/// Introspection data stored alongside a trained artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Feature names in the order the weights are bound to.
    pub feature_names: Vec<String>,
    /// Label column the model was trained against.
    pub target: String,
    /// Number of rows the final pipeline was fitted on.
    pub n_train_samples: Option<usize>,
}

impl ModelMeta {
    /// Metadata for the canonical six-feature schema.
    pub fn canonical() -> Self {
        Self {
            feature_names: Feature::names(),
            target: TARGET_COLUMN.to_string(),
            n_train_samples: None,
        }
    }

    pub fn with_train_samples(mut self, n: usize) -> Self {
        self.n_train_samples = Some(n);
        self
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = names;
        self
    }

    /// Whether the recorded names are exactly the canonical order.
    pub fn is_canonical(&self) -> bool {
        self.feature_names.len() == Feature::ALL.len()
            && self
                .feature_names
                .iter()
                .zip(Feature::ALL)
                .all(|(name, f)| name == f.name())
    }
}

impl Default for ModelMeta {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_meta() {
        let meta = ModelMeta::canonical();
        assert!(meta.is_canonical());
        assert_eq!(meta.target, "placed");
    }

    #[test]
    fn reordered_names_are_not_canonical() {
        let mut names = Feature::names();
        names.swap(0, 1);
        assert!(!ModelMeta::canonical().with_feature_names(names).is_canonical());
    }

    #[test]
    fn serde_roundtrip() {
        let meta = ModelMeta::canonical().with_train_samples(400);
        let json = serde_json::to_string(&meta).unwrap();
        let restored: ModelMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, meta);
    }
}
