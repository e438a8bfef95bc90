//! Role skill checklists.
//!
//! Skill scores are computed from a role's checklist rather than self-rated:
//! `skills = 10 × selected / total`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target profession a student is preparing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    WebDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    DataAnalyst,
    DataScientist,
    MachineLearningEngineer,
    AiEngineer,
    SoftwareEngineer,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::WebDeveloper,
        Role::BackendDeveloper,
        Role::FullStackDeveloper,
        Role::DataAnalyst,
        Role::DataScientist,
        Role::MachineLearningEngineer,
        Role::AiEngineer,
        Role::SoftwareEngineer,
    ];

    /// Display name.
    pub const fn title(self) -> &'static str {
        match self {
            Role::WebDeveloper => "Web Developer",
            Role::BackendDeveloper => "Backend Developer",
            Role::FullStackDeveloper => "Full Stack Developer",
            Role::DataAnalyst => "Data Analyst",
            Role::DataScientist => "Data Scientist",
            Role::MachineLearningEngineer => "Machine Learning Engineer",
            Role::AiEngineer => "AI Engineer",
            Role::SoftwareEngineer => "Software Engineer",
        }
    }

    /// Parse a role from its display title or snake_case key.
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|r| {
            r.title().eq_ignore_ascii_case(s.trim())
                || r.title().to_ascii_lowercase().replace(' ', "_") == key
        })
    }

    /// The role's required skills, in checklist order.
    pub const fn skills(self) -> &'static [&'static str] {
        match self {
            Role::WebDeveloper => &["HTML/CSS", "JavaScript", "React", "Backend Basics", "Git"],
            Role::BackendDeveloper => {
                &["Python / Java", "Databases", "APIs", "System Design", "Git"]
            }
            Role::FullStackDeveloper => &[
                "HTML/CSS",
                "JavaScript",
                "Frontend Framework",
                "Backend",
                "Databases",
            ],
            Role::DataAnalyst => &["Python", "SQL", "Excel", "Statistics", "Data Visualization"],
            Role::DataScientist => &[
                "Python",
                "SQL",
                "Statistics",
                "Machine Learning",
                "Pandas / NumPy",
            ],
            Role::MachineLearningEngineer => &[
                "Python",
                "Machine Learning",
                "Deep Learning",
                "Model Deployment",
                "Data Handling",
            ],
            Role::AiEngineer => &[
                "Python",
                "Deep Learning",
                "Neural Networks",
                "AI Frameworks",
                "Math for AI",
            ],
            Role::SoftwareEngineer => {
                &["Data Structures", "Algorithms", "Programming", "OOP", "Git"]
            }
        }
    }

    /// Number of checklist skills the student has. Unknown and repeated names
    /// are ignored.
    pub fn selected_count<S: AsRef<str>>(self, selected: &[S]) -> usize {
        self.skills()
            .iter()
            .filter(|skill| selected.iter().any(|s| s.as_ref() == **skill))
            .count()
    }

    /// Skill score for the selected skills.
    pub fn skill_score<S: AsRef<str>>(self, selected: &[S]) -> f64 {
        skill_score(self.selected_count(selected), self.skills().len())
    }

    /// Checklist skills not yet selected, in checklist order.
    pub fn missing_skills<S: AsRef<str>>(self, selected: &[S]) -> Vec<&'static str> {
        self.skills()
            .iter()
            .copied()
            .filter(|skill| !selected.iter().any(|s| s.as_ref() == *skill))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// `10 × selected / total`, with `selected` capped at `total`.
///
/// An empty checklist scores 0.
pub fn skill_score(selected: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    10.0 * selected.min(total) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_five_skills() {
        for role in Role::ALL {
            assert_eq!(role.skills().len(), 5, "{role}");
        }
    }

    #[test]
    fn score_from_checklist() {
        let role = Role::DataScientist;
        assert_eq!(role.skill_score::<&str>(&[]), 0.0);
        assert_eq!(role.skill_score(&["Python", "SQL"]), 4.0);
        assert_eq!(role.skill_score(role.skills()), 10.0);
    }

    #[test]
    fn unknown_and_repeated_skills_ignored() {
        let role = Role::WebDeveloper;
        assert_eq!(role.selected_count(&["Git", "Git", "Rust"]), 1);
        assert_eq!(role.skill_score(&["Git", "Git", "Rust"]), 2.0);
    }

    #[test]
    fn missing_keeps_checklist_order() {
        let missing = Role::SoftwareEngineer.missing_skills(&["OOP", "Data Structures"]);
        assert_eq!(missing, ["Algorithms", "Programming", "Git"]);
    }

    #[test]
    fn parse_titles_and_keys() {
        assert_eq!(Role::parse("AI Engineer"), Some(Role::AiEngineer));
        assert_eq!(Role::parse("data_analyst"), Some(Role::DataAnalyst));
        assert_eq!(Role::parse("full-stack-developer"), Some(Role::FullStackDeveloper));
        assert_eq!(Role::parse("astronaut"), None);
    }

    #[test]
    fn skill_score_caps_and_handles_empty() {
        assert_eq!(skill_score(3, 5), 6.0);
        assert_eq!(skill_score(7, 5), 10.0);
        assert_eq!(skill_score(0, 0), 0.0);
    }
}
