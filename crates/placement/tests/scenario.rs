//! End-to-end scenario over a hand-built artifact.
//!
//! Weights cgpa 1.2, attendance 0.1, projects 0.4, internships 0.3,
//! skills 0.9, backlogs -0.8, bias -2.0, identity scaler.

use std::path::PathBuf;
use std::sync::Arc;

use approx::assert_abs_diff_eq;

use placement::explainability::RankingPolicy;
use placement::repr::transform::sigmoid;
use placement::testing::scenario_artifact;
use placement::whatif::WhatIf;
use placement::{
    Feature, FeatureVector, ModelMeta, PlacementModel, PlacementService, RiskTier, Session,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn service() -> PlacementService {
    let model = PlacementModel::load(fixture("scenario.model.json")).expect("load fixture");
    PlacementService::new(Arc::new(model))
}

fn student() -> FeatureVector {
    FeatureVector::new(8.0, 80.0, 3.0, 1.0, 7.0, 0.0)
}

#[test]
fn fixture_matches_in_memory_artifact() {
    let loaded = PlacementModel::load(fixture("scenario.model.json")).unwrap();
    assert_eq!(loaded.artifact(), &scenario_artifact());
    assert_eq!(loaded.meta(), &ModelMeta::canonical());
}

#[test]
fn strong_student_is_high_tier() {
    let service = service();
    let assessment = service.assess(&student()).unwrap();

    assert_abs_diff_eq!(assessment.probability, sigmoid(23.4), epsilon = 1e-12);
    assert!(assessment.probability > 0.999_999);
    assert_eq!(assessment.tier, RiskTier::High);
    assert!(!assessment.uncertain);

    let order: Vec<Feature> = assessment.influences.unwrap().iter().map(|i| i.feature).collect();
    assert_eq!(
        order,
        [
            Feature::Cgpa,
            Feature::Skills,
            Feature::Backlogs,
            Feature::Projects,
            Feature::Internships,
            Feature::Attendance,
        ]
    );
}

#[test]
fn backlog_lowers_probability_without_raising_tier() {
    let service = service();
    let clean = service.assess(&student()).unwrap();
    let backlog = service.assess(&student().with(Feature::Backlogs, 1.0)).unwrap();

    let margin_drop = service.model().decision_function(&student()).unwrap().unwrap()
        - service
            .model()
            .decision_function(&student().with(Feature::Backlogs, 1.0))
            .unwrap()
            .unwrap();
    assert_abs_diff_eq!(margin_drop, 0.8, epsilon = 1e-9);
    assert!(backlog.probability < clean.probability);
    assert!(backlog.tier <= clean.tier);
}

#[test]
fn named_input_in_any_order() {
    let service = service();
    let shuffled = FeatureVector::from_named([
        ("backlogs", 0.0),
        ("skills", 7.0),
        ("internships", 1.0),
        ("projects", 3.0),
        ("attendance", 80.0),
        ("cgpa", 8.0),
    ])
    .unwrap();
    assert_eq!(shuffled, student());
    assert_eq!(
        service.model().predict(&shuffled).unwrap(),
        service.model().predict(&student()).unwrap()
    );
}

#[test]
fn excluded_backlogs_only_changes_the_view() {
    let base = service();
    let filtered = base
        .clone()
        .with_ranking(RankingPolicy::excluding([Feature::Backlogs]));

    let a = base.assess(&student()).unwrap();
    let b = filtered.assess(&student()).unwrap();
    assert_eq!(a.probability, b.probability);
    assert_eq!(a.tier, b.tier);
    let names: Vec<Feature> = b.influences.unwrap().iter().map(|i| i.feature).collect();
    assert_eq!(names.len(), 5);
    assert!(!names.contains(&Feature::Backlogs));
}

#[test]
fn what_if_session_flow() {
    let service = service();
    let mut session = Session::new();
    let model = service.model();

    assert_eq!(session.simulate_skill_gain(model, 1, 5).unwrap(), WhatIf::Unavailable);

    let weak = FeatureVector::new(1.0, 10.0, 0.0, 0.0, 1.0, 1.0);
    let assessment = service.assess_in(&mut session, weak).unwrap();
    assert_eq!(assessment.tier, RiskTier::Moderate);

    let WhatIf::Simulated(outcome) = session.simulate_skill_gain(model, 1, 5).unwrap() else {
        panic!("expected a simulation");
    };
    let modified = weak.with(Feature::Skills, 4.0);
    assert_eq!(outcome.to, 4.0);
    assert_eq!(outcome.probability, model.predict(&modified).unwrap());
    assert_eq!(outcome.delta, model.predict(&modified).unwrap() - assessment.probability);
    assert_eq!(session.baseline().unwrap().vector, weak);

    assert_eq!(session.simulate_skill_gain(model, 5, 5).unwrap(), WhatIf::AllSkillsMet);

    // A new assessment replaces the baseline; reset clears it.
    service.assess_in(&mut session, student()).unwrap();
    assert_eq!(session.baseline().unwrap().vector, student());
    session.reset();
    assert_eq!(session.simulate_skill_gain(model, 1, 5).unwrap(), WhatIf::Unavailable);
}
