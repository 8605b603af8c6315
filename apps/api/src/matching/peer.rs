//! Peer Match Scorer: networking suggestions between two members.
//!
//! score = SKILL_WEIGHT × shared / max(|skills_a|, |skills_b|)
//!       + GOAL_BONUS per shared goal (capped at GOAL_BONUS_CAP)
//!       + SAME_UNIVERSITY_BONUS + SAME_COUNTRY_BONUS
//!
//! Every term is symmetric, so swapping the two users yields the same result.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

pub const SKILL_WEIGHT: f64 = 40.0;
pub const GOAL_BONUS: u32 = 10;
pub const GOAL_BONUS_CAP: u32 = 30;
pub const SAME_UNIVERSITY_BONUS: u32 = 20;
pub const SAME_COUNTRY_BONUS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerMatchResult {
    pub score: u32, // 0 – 100
    pub shared_skills: Vec<String>,
    pub shared_goals: Vec<String>,
    pub same_university: bool,
    pub same_country: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerSuggestion {
    pub peer_id: Uuid,
    pub name: String,
    pub result: PeerMatchResult,
}

pub fn calculate_peer_match(user: &User, candidate: &User) -> PeerMatchResult {
    let user_skills: BTreeSet<String> = user.skill_keys().into_iter().collect();
    let candidate_skills: BTreeSet<String> = candidate.skill_keys().into_iter().collect();
    let shared_skills: Vec<String> = user_skills
        .intersection(&candidate_skills)
        .cloned()
        .collect();

    // Goals are catalogue identifiers and compare exactly.
    let user_goals: BTreeSet<&str> = user.goals.iter().map(String::as_str).collect();
    let candidate_goals: BTreeSet<&str> = candidate.goals.iter().map(String::as_str).collect();
    let shared_goals: Vec<String> = user_goals
        .intersection(&candidate_goals)
        .map(|g| g.to_string())
        .collect();

    let same_university = same_affiliation(&user.university, &candidate.university);
    let same_country = same_affiliation(&user.country, &candidate.country);

    let larger = user_skills.len().max(candidate_skills.len());
    let skill_term = if larger == 0 {
        0.0
    } else {
        SKILL_WEIGHT * shared_skills.len() as f64 / larger as f64
    };
    let goal_term = (shared_goals.len() as u32 * GOAL_BONUS).min(GOAL_BONUS_CAP);

    let mut score = skill_term.round() as u32 + goal_term;
    if same_university {
        score += SAME_UNIVERSITY_BONUS;
    }
    if same_country {
        score += SAME_COUNTRY_BONUS;
    }

    PeerMatchResult {
        score: score.min(100),
        shared_skills,
        shared_goals,
        same_university,
        same_country,
    }
}

/// Scores every candidate except the user themself, best first, at most `limit`.
pub fn suggest_peers(user: &User, candidates: &[User], limit: usize) -> Vec<PeerSuggestion> {
    let mut suggestions: Vec<PeerSuggestion> = candidates
        .iter()
        .filter(|c| c.id != user.id)
        .map(|c| PeerSuggestion {
            peer_id: c.id,
            name: c.name.clone(),
            result: calculate_peer_match(user, c),
        })
        .collect();
    suggestions.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    suggestions.truncate(limit);
    suggestions
}

/// Blank or missing affiliations never match each other.
fn same_affiliation(a: &Option<String>, b: &Option<String>) -> bool {
    match (a.as_deref().map(str::trim), b.as_deref().map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::user;

    fn stranger(skills: &[&str], goals: &[&str]) -> User {
        let mut u = user(skills, goals);
        u.university = Some("Universidad de Chile".to_string());
        u.country = Some("Chile".to_string());
        u
    }

    #[test]
    fn test_shared_university_raises_score() {
        let a = user(&["python", "sql", "statistics", "writing"], &["Research"]);
        let b = user(&["python", "sql", "statistics"], &["Research", "Housing"]);
        let mut c = b.clone();
        c.university = Some("Makerere University".to_string());

        let with_uni = calculate_peer_match(&a, &b);
        let without_uni = calculate_peer_match(&a, &c);

        assert_eq!(with_uni.shared_goals, vec!["Research"]);
        assert_eq!(with_uni.shared_skills.len(), 3);
        assert!(with_uni.same_university);
        assert!(!without_uni.same_university);
        assert!(with_uni.score > without_uni.score);
        // 40*3/4 = 30, +10 goal, +20 uni, +10 country
        assert_eq!(with_uni.score, 70);
    }

    #[test]
    fn test_disjoint_strangers_score_zero() {
        let a = user(&["python"], &["Research"]);
        let b = stranger(&["pottery"], &["Housing"]);
        let result = calculate_peer_match(&a, &b);
        assert_eq!(result.score, 0);
        assert!(result.shared_skills.is_empty());
        assert!(result.shared_goals.is_empty());
    }

    #[test]
    fn test_symmetric() {
        let a = user(&["python", "Data Analysis", "design"], &["Research", "Internship"]);
        let b = stranger(&["data_analysis", "python"], &["Internship"]);
        let ab = calculate_peer_match(&a, &b);
        let ba = calculate_peer_match(&b, &a);
        assert_eq!(ab, ba);
        assert_eq!(ab.shared_skills, vec!["data_analysis", "python"]);
    }

    #[test]
    fn test_goal_bonus_capped() {
        let goals = ["a", "b", "c", "d", "e"];
        let a = stranger(&[], &goals);
        let mut b = user(&[], &goals);
        b.university = None;
        b.country = None;
        assert_eq!(calculate_peer_match(&a, &b).score, GOAL_BONUS_CAP);
    }

    #[test]
    fn test_identical_profiles_clamped() {
        let skills = ["python", "sql"];
        let goals = ["a", "b", "c", "d"];
        let a = user(&skills, &goals);
        let b = user(&skills, &goals);
        assert_eq!(calculate_peer_match(&a, &b).score, 100);
    }

    #[test]
    fn test_missing_affiliations_do_not_match() {
        let mut a = user(&[], &[]);
        let mut b = user(&[], &[]);
        a.university = None;
        b.university = None;
        a.country = Some(" ".to_string());
        b.country = Some(" ".to_string());
        let result = calculate_peer_match(&a, &b);
        assert!(!result.same_university);
        assert!(!result.same_country);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_affiliation_compare_ignores_case() {
        let a = user(&[], &[]);
        let mut b = user(&[], &[]);
        b.country = Some("NIGERIA".to_string());
        assert!(calculate_peer_match(&a, &b).same_country);
    }

    #[test]
    fn test_suggest_peers_excludes_self_and_orders() {
        let me = user(&["python", "sql"], &["Research"]);
        let close = user(&["python", "sql"], &["Research"]);
        let far = stranger(&["pottery"], &[]);
        let candidates = vec![far.clone(), me.clone(), close.clone()];

        let suggestions = suggest_peers(&me, &candidates, 10);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].peer_id, close.id);
        assert_eq!(suggestions[1].peer_id, far.id);
    }

    #[test]
    fn test_suggest_peers_respects_limit() {
        let me = user(&[], &[]);
        let candidates: Vec<User> = (0..5).map(|_| user(&[], &[])).collect();
        assert_eq!(suggest_peers(&me, &candidates, 3).len(), 3);
    }
}
