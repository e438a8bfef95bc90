//! Student profile features.
//!
//! The six features and their canonical column order. Trained artifacts bind
//! their weights positionally to [`Feature::ALL`], so every row handed to
//! inference is assembled through [`FeatureVector`].
//!
//! # Example
//!
//! ```
//! use placement::features::{Feature, FeatureVector};
//!
//! // Named values may arrive in any order.
//! let v = FeatureVector::from_named([
//!     ("skills", 6.0),
//!     ("cgpa", 8.2),
//!     ("backlogs", 0.0),
//!     ("attendance", 85.0),
//!     ("internships", 1.0),
//!     ("projects", 3.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(v.to_array(), [8.2, 85.0, 3.0, 1.0, 6.0, 0.0]);
//! assert_eq!(v.get(Feature::Skills), 6.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features in a profile row.
pub const N_FEATURES: usize = 6;

// =============================================================================
// Feature
// =============================================================================

/// One column of the profile row.
///
/// Declaration order is the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Cumulative grade point average, 0.0–10.0.
    Cgpa,
    /// Attendance percentage, 0–100.
    Attendance,
    /// Completed projects, 0–10.
    Projects,
    /// Completed internships, 0–2.
    Internships,
    /// Skill score, 0.0–10.0 (rated directly or computed from a role checklist).
    Skills,
    /// Backlog indicator, 0 or 1.
    Backlogs,
}

impl Feature {
    /// All features in canonical column order.
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::Cgpa,
        Feature::Attendance,
        Feature::Projects,
        Feature::Internships,
        Feature::Skills,
        Feature::Backlogs,
    ];

    /// Column index in the canonical order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column name as it appears in training data and artifacts.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Cgpa => "cgpa",
            Feature::Attendance => "attendance",
            Feature::Projects => "projects",
            Feature::Internships => "internships",
            Feature::Skills => "skills",
            Feature::Backlogs => "backlogs",
        }
    }

    /// Look up a feature by its column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Declared value domain.
    pub const fn domain(self) -> FeatureDomain {
        match self {
            Feature::Cgpa | Feature::Skills => FeatureDomain::new(0.0, 10.0),
            Feature::Attendance => FeatureDomain::new(0.0, 100.0),
            Feature::Projects => FeatureDomain::new(0.0, 10.0),
            Feature::Internships => FeatureDomain::new(0.0, 2.0),
            Feature::Backlogs => FeatureDomain::new(0.0, 1.0),
        }
    }

    /// Canonical column names, owned.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.name().to_string()).collect()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed interval a feature value is expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureDomain {
    pub min: f64,
    pub max: f64,
}

impl FeatureDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while assembling or validating a feature row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A value that is not a finite number reached the builder.
    #[error("feature `{feature}` is not numeric: {value}")]
    NonNumeric { feature: String, value: String },

    #[error("unknown feature `{0}`")]
    UnknownFeature(String),

    #[error("missing feature `{0}`")]
    MissingFeature(Feature),

    #[error("feature `{0}` supplied more than once")]
    DuplicateFeature(Feature),

    /// A value outside its declared domain.
    #[error("{feature} = {value} is outside [{min}, {max}]")]
    OutOfDomain {
        feature: Feature,
        value: f64,
        min: f64,
        max: f64,
    },
}

// =============================================================================
// RawValue
// =============================================================================

/// An untyped value at the builder boundary.
///
/// Only numbers convert; text never does, even if it looks numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Integer(i64),
    Text(String),
}

impl RawValue {
    pub(crate) fn to_f64(&self, feature: &str) -> Result<f64, FeatureError> {
        match self {
            RawValue::Number(x) if x.is_finite() => Ok(*x),
            RawValue::Integer(i) => Ok(*i as f64),
            RawValue::Number(x) => Err(FeatureError::NonNumeric {
                feature: feature.to_string(),
                value: x.to_string(),
            }),
            RawValue::Text(s) => Err(FeatureError::NonNumeric {
                feature: feature.to_string(),
                value: format!("{s:?}"),
            }),
        }
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Number(x)
    }
}

impl From<f32> for RawValue {
    fn from(x: f32) -> Self {
        RawValue::Number(x as f64)
    }
}

impl From<i64> for RawValue {
    fn from(x: i64) -> Self {
        RawValue::Integer(x)
    }
}

impl From<i32> for RawValue {
    fn from(x: i32) -> Self {
        RawValue::Integer(x as i64)
    }
}

impl From<u32> for RawValue {
    fn from(x: u32) -> Self {
        RawValue::Integer(x as i64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&serde_json::Value> for RawValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Integer(i),
                None => RawValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => RawValue::Text(s.clone()),
            other => RawValue::Text(other.to_string()),
        }
    }
}

// =============================================================================
// FeatureVector
// =============================================================================

/// A single profile row in canonical column order.
///
/// Field names match [`Feature::name`], so the serde form is the same JSON
/// object a caller would hand to [`FeatureVector::from_named`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub cgpa: f64,
    pub attendance: f64,
    pub projects: f64,
    pub internships: f64,
    pub skills: f64,
    pub backlogs: f64,
}

impl FeatureVector {
    /// Build a row from the six values in canonical order.
    pub fn new(
        cgpa: f64,
        attendance: f64,
        projects: f64,
        internships: f64,
        skills: f64,
        backlogs: f64,
    ) -> Self {
        Self {
            cgpa,
            attendance,
            projects,
            internships,
            skills,
            backlogs,
        }
    }

    /// Build a row from a canonical-order array.
    pub fn from_array(values: [f64; N_FEATURES]) -> Self {
        let [cgpa, attendance, projects, internships, skills, backlogs] = values;
        Self::new(cgpa, attendance, projects, internships, skills, backlogs)
    }

    /// Assemble a row from `(name, value)` pairs in any order.
    ///
    /// # Errors
    ///
    /// - [`FeatureError::NonNumeric`] if a value is text or non-finite
    /// - [`FeatureError::UnknownFeature`] for a name outside the schema
    /// - [`FeatureError::DuplicateFeature`] if a name repeats
    /// - [`FeatureError::MissingFeature`] if any of the six is absent
    pub fn from_named<I, K, V>(pairs: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RawValue>,
    {
        let mut slots: [Option<f64>; N_FEATURES] = [None; N_FEATURES];

        for (name, value) in pairs {
            let name = name.as_ref();
            let feature = Feature::from_name(name)
                .ok_or_else(|| FeatureError::UnknownFeature(name.to_string()))?;
            let value = value.into().to_f64(name)?;

            let slot = &mut slots[feature.index()];
            if slot.is_some() {
                return Err(FeatureError::DuplicateFeature(feature));
            }
            *slot = Some(value);
        }

        let mut values = [0.0; N_FEATURES];
        for feature in Feature::ALL {
            values[feature.index()] =
                slots[feature.index()].ok_or(FeatureError::MissingFeature(feature))?;
        }
        Ok(Self::from_array(values))
    }

    /// Values in canonical column order.
    #[inline]
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.cgpa,
            self.attendance,
            self.projects,
            self.internships,
            self.skills,
            self.backlogs,
        ]
    }

    /// Value of one feature.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Cgpa => self.cgpa,
            Feature::Attendance => self.attendance,
            Feature::Projects => self.projects,
            Feature::Internships => self.internships,
            Feature::Skills => self.skills,
            Feature::Backlogs => self.backlogs,
        }
    }

    /// Copy of this row with one feature replaced.
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        let slot = match feature {
            Feature::Cgpa => &mut self.cgpa,
            Feature::Attendance => &mut self.attendance,
            Feature::Projects => &mut self.projects,
            Feature::Internships => &mut self.internships,
            Feature::Skills => &mut self.skills,
            Feature::Backlogs => &mut self.backlogs,
        };
        *slot = value;
        self
    }

    /// `(feature, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Check every value against its declared domain.
    ///
    /// Input widgets normally clamp ranges upstream; this is for callers that
    /// take values from less constrained sources.
    pub fn validate(&self) -> Result<(), FeatureError> {
        for (feature, value) in self.iter() {
            let domain = feature.domain();
            if !domain.contains(value) {
                return Err(FeatureError::OutOfDomain {
                    feature,
                    value,
                    min: domain.min,
                    max: domain.max,
                });
            }
        }
        Ok(())
    }
}

impl From<[f64; N_FEATURES]> for FeatureVector {
    fn from(values: [f64; N_FEATURES]) -> Self {
        Self::from_array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeatureVector {
        FeatureVector::new(8.0, 80.0, 3.0, 1.0, 7.0, 0.0)
    }

    #[test]
    fn canonical_order() {
        let names: Vec<_> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            ["cgpa", "attendance", "projects", "internships", "skills", "backlogs"]
        );
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn from_name_roundtrip() {
        for f in Feature::ALL {
            assert_eq!(Feature::from_name(f.name()), Some(f));
        }
        assert_eq!(Feature::from_name("CGPA"), None);
        assert_eq!(Feature::from_name("placed"), None);
    }

    #[test]
    fn from_named_reorders() {
        let v = FeatureVector::from_named([
            ("backlogs", RawValue::Integer(0)),
            ("skills", RawValue::Number(7.0)),
            ("internships", RawValue::Integer(1)),
            ("projects", RawValue::Integer(3)),
            ("attendance", RawValue::Integer(80)),
            ("cgpa", RawValue::Number(8.0)),
        ])
        .unwrap();
        assert_eq!(v, sample());
    }

    #[test]
    fn from_named_rejects_text() {
        let err = FeatureVector::from_named([
            ("cgpa", RawValue::from("8.0")),
            ("attendance", 80.into()),
            ("projects", 3.into()),
            ("internships", 1.into()),
            ("skills", 7.0.into()),
            ("backlogs", 0.into()),
        ])
        .unwrap_err();
        assert!(matches!(err, FeatureError::NonNumeric { ref feature, .. } if feature == "cgpa"));
    }

    #[test]
    fn from_named_rejects_nan() {
        let err = FeatureVector::from_named([
            ("cgpa", 8.0),
            ("attendance", f64::NAN),
            ("projects", 3.0),
            ("internships", 1.0),
            ("skills", 7.0),
            ("backlogs", 0.0),
        ])
        .unwrap_err();
        assert!(matches!(err, FeatureError::NonNumeric { .. }));
    }

    #[test]
    fn from_named_missing_unknown_duplicate() {
        let missing = FeatureVector::from_named([("cgpa", 8.0)]).unwrap_err();
        assert_eq!(missing, FeatureError::MissingFeature(Feature::Attendance));

        let unknown = FeatureVector::from_named([("gpa", 8.0)]).unwrap_err();
        assert_eq!(unknown, FeatureError::UnknownFeature("gpa".into()));

        let dup = FeatureVector::from_named([("cgpa", 8.0), ("cgpa", 7.0)]).unwrap_err();
        assert_eq!(dup, FeatureError::DuplicateFeature(Feature::Cgpa));
    }

    #[test]
    fn with_replaces_one_field() {
        let v = sample().with(Feature::Skills, 9.0);
        assert_eq!(v.skills, 9.0);
        assert_eq!(v.cgpa, 8.0);
        assert_eq!(v.backlogs, 0.0);
    }

    #[test]
    fn validate_domains() {
        assert!(sample().validate().is_ok());

        let err = sample().with(Feature::Cgpa, -1.0).validate().unwrap_err();
        assert!(matches!(err, FeatureError::OutOfDomain { feature: Feature::Cgpa, .. }));

        let err = sample().with(Feature::Backlogs, 3.0).validate().unwrap_err();
        assert!(matches!(err, FeatureError::OutOfDomain { feature: Feature::Backlogs, .. }));
    }

    #[test]
    fn serde_uses_column_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["cgpa"], 8.0);
        assert_eq!(json["backlogs"], 0.0);

        let restored: FeatureVector = serde_json::from_value(json).unwrap();
        assert_eq!(restored, sample());
    }

    #[test]
    fn raw_value_from_json() {
        let v: serde_json::Value = serde_json::json!({"a": 3, "b": 2.5, "c": "x", "d": true});
        assert_eq!(RawValue::from(&v["a"]), RawValue::Integer(3));
        assert_eq!(RawValue::from(&v["b"]), RawValue::Number(2.5));
        assert_eq!(RawValue::from(&v["c"]), RawValue::Text("x".into()));
        assert_eq!(RawValue::from(&v["d"]), RawValue::Text("true".into()));
    }
}
