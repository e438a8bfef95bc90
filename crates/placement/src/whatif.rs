//! What-if simulation over a per-session baseline.
//!
//! A [`Session`] remembers the most recent assessed profile. Simulations read
//! that baseline, change one feature, and re-run the model; they never write
//! the baseline back, so repeated simulations all compare against the same
//! starting point.
//!
//! # Example
//!
//! ```
//! use placement::features::FeatureVector;
//! use placement::inference::PlacementModel;
//! use placement::repr::ModelMeta;
//! use placement::testing::scenario_artifact;
//! use placement::whatif::{Session, WhatIf};
//!
//! let model = PlacementModel::from_artifact(scenario_artifact(), ModelMeta::canonical()).unwrap();
//! let mut session = Session::new();
//! assert_eq!(session.simulate_skill_gain(&model, 2, 5).unwrap(), WhatIf::Unavailable);
//!
//! let student = FeatureVector::new(2.0, 20.0, 0.0, 0.0, 2.0, 1.0);
//! session.record(student, model.predict(&student).unwrap());
//!
//! match session.simulate_skill_gain(&model, 2, 5).unwrap() {
//!     WhatIf::Simulated(outcome) => {
//!         assert_eq!(outcome.to, 6.0);
//!         assert!(outcome.delta > 0.0);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::features::{Feature, FeatureVector};
use crate::inference::{PlacementModel, PredictError};
use crate::roles::{skill_score, Role};

/// The profile and probability a session last assessed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub vector: FeatureVector,
    pub probability: f64,
}

/// Set one feature to a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureChange {
    pub feature: Feature,
    pub value: f64,
}

impl FeatureChange {
    pub fn new(feature: Feature, value: f64) -> Self {
        Self { feature, value }
    }
}

/// Result of a simulated change against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub feature: Feature,
    /// Baseline value of the changed feature.
    pub from: f64,
    /// Simulated value.
    pub to: f64,
    pub baseline_probability: f64,
    pub probability: f64,
    /// `probability - baseline_probability`.
    pub delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WhatIf {
    /// No assessment has been recorded in this session yet.
    Unavailable,
    /// Every required skill is already selected; there is nothing to add.
    AllSkillsMet,
    Simulated(SimulationOutcome),
}

impl WhatIf {
    pub fn outcome(&self) -> Option<&SimulationOutcome> {
        match self {
            WhatIf::Simulated(o) => Some(o),
            _ => None,
        }
    }
}

/// Per-user session state. Not shared between users; lives only as long as
/// the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    baseline: Option<Baseline>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new baseline, replacing any previous one.
    pub fn record(&mut self, vector: FeatureVector, probability: f64) {
        self.baseline = Some(Baseline {
            vector,
            probability,
        });
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Simulate gaining one more required skill.
    ///
    /// With `selected` of `total` skills, the simulated skill score is
    /// `10 × (selected + 1) / total`. Every other feature keeps its baseline
    /// value, including a directly rated skill score being replaced.
    pub fn simulate_skill_gain(
        &self,
        model: &PlacementModel,
        selected: usize,
        total: usize,
    ) -> Result<WhatIf, PredictError> {
        if self.baseline.is_none() {
            return Ok(WhatIf::Unavailable);
        }
        if selected >= total {
            return Ok(WhatIf::AllSkillsMet);
        }
        let change = FeatureChange::new(Feature::Skills, skill_score(selected + 1, total));
        self.simulate_change(model, change)
    }

    /// [`Session::simulate_skill_gain`] with the counts taken from a role's
    /// checklist.
    pub fn simulate_next_skill<S: AsRef<str>>(
        &self,
        model: &PlacementModel,
        role: Role,
        selected: &[S],
    ) -> Result<WhatIf, PredictError> {
        self.simulate_skill_gain(model, role.selected_count(selected), role.skills().len())
    }

    /// Simulate setting one feature to a new value.
    pub fn simulate_change(
        &self,
        model: &PlacementModel,
        change: FeatureChange,
    ) -> Result<WhatIf, PredictError> {
        let Some(baseline) = &self.baseline else {
            return Ok(WhatIf::Unavailable);
        };

        let simulated = baseline.vector.with(change.feature, change.value);
        let probability = model.predict(&simulated)?;
        Ok(WhatIf::Simulated(SimulationOutcome {
            feature: change.feature,
            from: baseline.vector.get(change.feature),
            to: change.value,
            baseline_probability: baseline.probability,
            probability,
            delta: probability - baseline.probability,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::ModelMeta;
    use crate::testing::scenario_artifact;

    fn model() -> PlacementModel {
        PlacementModel::from_artifact(scenario_artifact(), ModelMeta::canonical()).unwrap()
    }

    fn weak_student() -> FeatureVector {
        FeatureVector::new(3.0, 20.0, 0.0, 0.0, 2.0, 1.0)
    }

    fn recorded(model: &PlacementModel) -> Session {
        let mut session = Session::new();
        let v = weak_student();
        session.record(v, model.predict(&v).unwrap());
        session
    }

    #[test]
    fn unavailable_without_baseline() {
        let model = model();
        let session = Session::new();
        assert_eq!(session.simulate_skill_gain(&model, 1, 5).unwrap(), WhatIf::Unavailable);
        assert_eq!(
            session
                .simulate_change(&model, FeatureChange::new(Feature::Cgpa, 9.0))
                .unwrap(),
            WhatIf::Unavailable
        );
    }

    #[test]
    fn all_skills_met() {
        let model = model();
        let session = recorded(&model);
        assert_eq!(session.simulate_skill_gain(&model, 5, 5).unwrap(), WhatIf::AllSkillsMet);
        assert_eq!(session.simulate_skill_gain(&model, 7, 5).unwrap(), WhatIf::AllSkillsMet);
    }

    #[test]
    fn delta_is_exact() {
        let model = model();
        let session = recorded(&model);
        let outcome = *session
            .simulate_skill_gain(&model, 1, 5)
            .unwrap()
            .outcome()
            .unwrap();

        let expected = model.predict(&weak_student().with(Feature::Skills, 4.0)).unwrap();
        assert_eq!(outcome.to, 4.0);
        assert_eq!(outcome.from, 2.0);
        assert_eq!(outcome.probability, expected);
        assert_eq!(outcome.delta, expected - model.predict(&weak_student()).unwrap());
    }

    #[test]
    fn simulation_keeps_baseline() {
        let model = model();
        let session = recorded(&model);
        let before = *session.baseline().unwrap();
        session
            .simulate_change(&model, FeatureChange::new(Feature::Backlogs, 0.0))
            .unwrap();
        session.simulate_skill_gain(&model, 3, 5).unwrap();
        assert_eq!(*session.baseline().unwrap(), before);
    }

    #[test]
    fn record_overwrites_and_reset_clears() {
        let model = model();
        let mut session = recorded(&model);
        let better = weak_student().with(Feature::Cgpa, 9.0);
        session.record(better, model.predict(&better).unwrap());
        assert_eq!(session.baseline().unwrap().vector, better);

        session.reset();
        assert!(session.baseline().is_none());
    }

    #[test]
    fn next_skill_from_role() {
        let model = model();
        let session = recorded(&model);
        let what_if = session
            .simulate_next_skill(&model, Role::DataAnalyst, &["Python", "SQL"])
            .unwrap();
        assert_eq!(what_if.outcome().unwrap().to, 6.0);

        let all = Role::DataAnalyst.skills();
        assert_eq!(
            session.simulate_next_skill(&model, Role::DataAnalyst, all).unwrap(),
            WhatIf::AllSkillsMet
        );
    }

    #[test]
    fn removing_backlog_helps() {
        let model = model();
        let session = recorded(&model);
        let outcome = *session
            .simulate_change(&model, FeatureChange::new(Feature::Backlogs, 0.0))
            .unwrap()
            .outcome()
            .unwrap();
        assert!(outcome.delta > 0.0);
    }
}
