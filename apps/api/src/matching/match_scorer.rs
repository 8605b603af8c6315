//! Opportunity Match Scorer: measures one member profile against one opportunity.
//!
//! Algorithm:
//! 1. Canonicalize requirements (deduplicated, catalogue order kept) and user skills
//! 2. base = round(100 × matched / requirements), or 100 when nothing is required
//! 3. +TRUST_BONUS at trust_score ≥ TRUST_BONUS_THRESHOLD
//! 4. +GOAL_ALIGNMENT_BONUS when any goal points at the opportunity type
//! 5. Clamp to 0..=100
//!
//! Pure and deterministic: no clock, no I/O.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::canonical::canonicalize;
use crate::models::{Opportunity, OpportunityType, User};

pub const TRUST_BONUS_THRESHOLD: u32 = 90;
pub const TRUST_BONUS: u32 = 5;
pub const GOAL_ALIGNMENT_BONUS: u32 = 10;

/// Goal keywords and the opportunity types they point at. A goal aligns when its
/// canonical key equals a keyword or contains it as an underscore-separated word.
const GOAL_ALIGNMENTS: &[(&str, &[OpportunityType])] = &[
    ("internship", &[OpportunityType::Job, OpportunityType::Mentor]),
    ("job", &[OpportunityType::Job]),
    ("career", &[OpportunityType::Job, OpportunityType::Mentor]),
    ("employment", &[OpportunityType::Job]),
    ("work", &[OpportunityType::Job]),
    ("grant", &[OpportunityType::Grant]),
    ("funding", &[OpportunityType::Grant]),
    ("scholarship", &[OpportunityType::Grant]),
    ("research", &[OpportunityType::Grant, OpportunityType::Mentor]),
    ("mentor", &[OpportunityType::Mentor]),
    ("mentorship", &[OpportunityType::Mentor]),
    ("networking", &[OpportunityType::Mentor]),
    ("housing", &[OpportunityType::Housing]),
    ("accommodation", &[OpportunityType::Housing]),
    ("relocation", &[OpportunityType::Housing]),
];

/// Full match report for one (user, opportunity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub gap_analysis: Vec<String>,
    pub goal_aligned: bool,
}

pub fn calculate_match_score(user: &User, opportunity: &Opportunity) -> MatchResult {
    let user_skills = user.skill_keys();

    // (canonical key, first human-readable spelling) per distinct requirement.
    let mut seen = HashSet::new();
    let requirements: Vec<(String, &str)> = opportunity
        .requirements
        .iter()
        .map(|requirement| (canonicalize(requirement), requirement.trim()))
        .filter(|(key, _)| !key.is_empty() && seen.insert(key.clone()))
        .collect();

    let (matched, missing): (Vec<_>, Vec<_>) = requirements
        .into_iter()
        .partition(|(key, _)| user_skills.contains(key));
    let missing_names: Vec<&str> = missing.iter().map(|(_, name)| *name).collect();
    let matching_skills: Vec<String> = matched.into_iter().map(|(key, _)| key).collect();
    let missing_skills: Vec<String> = missing.into_iter().map(|(key, _)| key).collect();

    let total = matching_skills.len() + missing_skills.len();
    let base = if total == 0 {
        100
    } else {
        ((matching_skills.len() as f64 / total as f64) * 100.0).round() as u32
    };

    let goal_aligned = goals_align(&user.goals, opportunity.kind);

    let mut score = base;
    if user.trust_score >= TRUST_BONUS_THRESHOLD {
        score = (score + TRUST_BONUS).min(100);
    }
    if goal_aligned {
        score = (score + GOAL_ALIGNMENT_BONUS).min(100);
    }

    let gap_analysis =
        build_gap_analysis(&missing_names, &user.goals, goal_aligned, opportunity.kind);

    MatchResult {
        score: score.min(100),
        matching_skills,
        missing_skills,
        gap_analysis,
        goal_aligned,
    }
}

/// True when any goal semantically points at `kind`.
pub fn goals_align(goals: &[String], kind: OpportunityType) -> bool {
    goals.iter().any(|goal| goal_targets(goal).contains(&kind))
}

fn goal_targets(goal: &str) -> HashSet<OpportunityType> {
    let key = canonicalize(goal);
    let words: HashSet<&str> = key.split('_').collect();
    GOAL_ALIGNMENTS
        .iter()
        .filter(|(keyword, _)| key == *keyword || words.contains(keyword))
        .flat_map(|(_, kinds)| kinds.iter().copied())
        .collect()
}

fn build_gap_analysis(
    missing_skills: &[&str],
    goals: &[String],
    goal_aligned: bool,
    kind: OpportunityType,
) -> Vec<String> {
    if missing_skills.is_empty() && goal_aligned {
        return vec![format!(
            "Strong fit: you meet every listed requirement and this {} matches your goals.",
            kind.label()
        )];
    }

    let mut gaps = Vec::new();
    if missing_skills.is_empty() {
        gaps.push("Strong skills fit: you meet every listed requirement.".to_string());
    }
    for name in missing_skills {
        gaps.push(format!("Missing required skill: {name}."));
    }
    if !goal_aligned {
        if goals.is_empty() {
            gaps.push(
                "No goals set on your profile, so goal alignment could not be assessed."
                    .to_string(),
            );
        } else {
            gaps.push(format!(
                "This {} opportunity does not line up with your stated goals.",
                kind.label()
            ));
        }
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::opportunity::fixtures::opportunity;
    use crate::models::user::fixtures::user;

    #[test]
    fn test_partial_overlap_with_trust_bonus() {
        let mut u = user(&["python", "data_analysis"], &[]);
        u.trust_score = 95;
        let opp = opportunity(
            OpportunityType::Grant,
            &["Python", "Data Analysis", "Leadership"],
            20,
        );

        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.matching_skills, vec!["python", "data_analysis"]);
        assert_eq!(result.missing_skills, vec!["leadership"]);
        // round(200/3) = 67, + trust bonus
        assert_eq!(result.score, 72);
        assert!(result
            .gap_analysis
            .contains(&"Missing required skill: Leadership.".to_string()));
    }

    #[test]
    fn test_base_score_without_bonuses() {
        let u = user(&["python", "data_analysis"], &[]);
        let opp = opportunity(
            OpportunityType::Grant,
            &["Python", "Data Analysis", "Leadership"],
            20,
        );
        assert_eq!(calculate_match_score(&u, &opp).score, 67);
    }

    #[test]
    fn test_no_requirements_scores_full() {
        let u = user(&[], &[]);
        let opp = opportunity(OpportunityType::Housing, &[], 5);
        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.score, 100);
        assert!(result.missing_skills.is_empty());
        assert!(result.matching_skills.is_empty());
    }

    #[test]
    fn test_bonuses_never_exceed_100() {
        let mut u = user(&["python"], &["Find an internship"]);
        u.trust_score = 100;
        let opp = opportunity(OpportunityType::Job, &["Python"], 5);
        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_full_overlap_reports_strong_fit() {
        let u = user(&["python", "leadership"], &["Internship"]);
        let opp = opportunity(OpportunityType::Mentor, &["Leadership", "Python"], 5);
        let result = calculate_match_score(&u, &opp);
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.gap_analysis.len(), 1);
        assert!(result.gap_analysis[0].starts_with("Strong fit"));
    }

    #[test]
    fn test_full_overlap_without_goal_alignment_still_leads_with_strong_fit() {
        let u = user(&["python"], &["Housing"]);
        let opp = opportunity(OpportunityType::Job, &["Python"], 5);
        let result = calculate_match_score(&u, &opp);
        assert!(result.missing_skills.is_empty());
        assert!(result.gap_analysis[0].starts_with("Strong skills fit"));
        assert!(result.gap_analysis[1].contains("does not line up"));
    }

    #[test]
    fn test_goal_alignment_bonus() {
        let u = user(&["python"], &["Research"]);
        let opp = opportunity(OpportunityType::Grant, &["Python", "Statistics"], 5);
        let result = calculate_match_score(&u, &opp);
        assert!(result.goal_aligned);
        assert_eq!(result.score, 50 + GOAL_ALIGNMENT_BONUS);
    }

    #[test]
    fn test_goal_keyword_inside_phrase_aligns() {
        assert!(goals_align(&["Secure research funding".to_string()], OpportunityType::Grant));
        assert!(goals_align(&["internship".to_string()], OpportunityType::Mentor));
        assert!(!goals_align(&["internship".to_string()], OpportunityType::Housing));
        assert!(!goals_align(&[], OpportunityType::Job));
    }

    #[test]
    fn test_missing_goals_explained() {
        let u = user(&[], &[]);
        let opp = opportunity(OpportunityType::Job, &["Rust"], 5);
        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.score, 0);
        assert!(result.gap_analysis.iter().any(|g| g.contains("No goals set")));
    }

    #[test]
    fn test_duplicate_requirements_counted_once() {
        let u = user(&["python"], &[]);
        let opp = opportunity(OpportunityType::Job, &["Python", "python", "SQL"], 5);
        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.score, 50);
        assert_eq!(result.missing_skills, vec!["sql"]);
    }

    #[test]
    fn test_gap_names_first_requirement_spelling() {
        let u = user(&["python"], &[]);
        let opp = opportunity(OpportunityType::Job, &["  Data Analysis ", "data_analysis"], 5);
        let result = calculate_match_score(&u, &opp);
        assert_eq!(result.missing_skills, vec!["data_analysis"]);
        assert_eq!(
            result
                .gap_analysis
                .iter()
                .filter(|g| g.starts_with("Missing"))
                .collect::<Vec<_>>(),
            vec!["Missing required skill: Data Analysis."]
        );
    }

    #[test]
    fn test_user_skill_spelling_is_canonicalized() {
        let u = user(&["Data Analysis"], &[]);
        let opp = opportunity(OpportunityType::Job, &["data  analysis"], 5);
        assert_eq!(calculate_match_score(&u, &opp).score, 100);
    }

    #[test]
    fn test_deterministic() {
        let mut u = user(&["python", "sql"], &["Career growth"]);
        u.trust_score = 92;
        let opp = opportunity(OpportunityType::Job, &["Python", "Go", "SQL", "Docker"], 5);
        assert_eq!(calculate_match_score(&u, &opp), calculate_match_score(&u, &opp));
    }
}
