//! placement: placement-probability inference for student profiles.
//!
//! Scores a six-feature student profile with a trained logistic pipeline,
//! buckets the probability into a risk tier, ranks feature influences and
//! simulates single-feature what-if changes.
//!
//! # Key Types
//!
//! - [`FeatureVector`] - Canonical-order profile row
//! - [`PlacementModel`] - Loaded artifact with predict and explain
//! - [`PlacementService`] - Assessment with tiers, uncertainty and influences
//! - [`Session`] - Per-caller what-if baseline
//! - [`Trainer`] / [`TrainerConfig`] - Offline training
//!
//! # Serving
//!
//! Load an artifact with [`PlacementModel::load`], wrap it in an `Arc`, and
//! share it across requests through [`PlacementService`]. See the
//! [`inference`] module for details.
//!
//! # Artifacts
//!
//! Artifacts are versioned JSON documents. See the [`persist`] module.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod config;
pub mod data;
pub mod explainability;
pub mod features;
pub mod inference;
pub mod persist;
pub mod repr;
pub mod roles;
pub mod testing;
pub mod tier;
pub mod training;
pub mod whatif;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Inputs
pub use features::{Feature, FeatureError, FeatureVector, RawValue};
pub use roles::Role;

// Serving
pub use inference::{Assessment, PlacementModel, PlacementService, PredictError};
pub use tier::{RiskTier, TierThresholds, UncertaintyBand};
pub use whatif::{Session, WhatIf};

// Explanation
pub use explainability::{ExplainError, FeatureInfluence, RankingPolicy};

// Model types
pub use repr::{Artifact, ArtifactKind, ModelMeta};

// Configuration
pub use config::{ConfigError, PlacementConfig};
pub use training::{Trainer, TrainerConfig};

// Data
pub use data::{Dataset, DatasetError, DatasetLoadError};
