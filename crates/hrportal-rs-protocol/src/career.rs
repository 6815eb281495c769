//! Career analytics resources (`/career/*`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Organisation-wide career analytics (Admin/HR only).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerAnalytics {
    pub total_employees: u64,
    #[serde(default)]
    pub career_progression_stats: Value,
    #[serde(default)]
    pub skills_gap_analysis: Value,
    #[serde(default)]
    pub mentorship_program_stats: Value,
    #[serde(default)]
    pub internal_mobility_rate: f64,
    #[serde(default)]
    pub career_satisfaction_score: f64,
}

/// One row of `GET /career/skills-assessment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillAssessment {
    pub name: String,
    /// Current proficiency, 0-100.
    pub current: f64,
    /// Target proficiency, 0-100.
    pub target: f64,
    #[serde(default)]
    pub category: Option<String>,
}

impl SkillAssessment {
    /// Points left to reach the target; never negative.
    pub fn gap(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SkillAssessment;
    use pretty_assertions::assert_eq;

    #[test]
    fn gap_saturates_at_zero() {
        let mut skill = SkillAssessment {
            name: "System Design".to_string(),
            current: 60.0,
            target: 85.0,
            category: Some("Technical".to_string()),
        };
        assert_eq!(skill.gap(), 25.0);
        skill.current = 90.0;
        assert_eq!(skill.gap(), 0.0);
    }
}
