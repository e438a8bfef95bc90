//! Runtime model representations.
//!
//! Pure data structures plus their forward pass; training lives in
//! [`crate::training`], serialization in [`crate::persist`].

mod artifact;
mod calibration;
mod linear;
mod meta;
mod pipeline;
mod scaler;
pub mod transform;

pub use artifact::{Artifact, ArtifactKind};
pub use calibration::{CalibratedEnsemble, CalibratedModel, SigmoidCalibrator};
pub use linear::LinearModel;
pub use meta::{ModelMeta, TARGET_COLUMN};
pub use pipeline::Pipeline;
pub use scaler::StandardScaler;
