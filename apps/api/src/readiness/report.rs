//! Report Synthesizer: turns the readiness index and raw profile signals into
//! the narrative report shown on the member dashboard.
//!
//! `profile_strength` is the readiness `overall_score` and the tier comes from
//! `readiness_level`; nothing here re-derives either.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;
use crate::readiness::index::{
    calculate_readiness_index, readiness_level, ReadinessArea, ReadinessGap, ReadinessLevel,
    RECOMMENDATION_THRESHOLD,
};

/// Recommendations surfaced in the report.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Goal count that earns a full goals insight.
const GOAL_TARGET: usize = 3;

/// trust, completeness, xp points, xp level, badges, bio, social links, connections
const STRUCTURAL_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictType {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Trust,
    Skills,
    Goals,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub severity: Severity,
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub reason: String,
    pub priority: Priority,
    /// Application-relative path.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub profile_strength: u32,
    pub profile_tier: ReadinessLevel,
    pub tier_label: String,
    pub tier_emoji: String,
    pub verdict: String,
    pub verdict_type: VerdictType,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub data_points_analyzed: usize,
}

pub fn generate_user_report(user: &User) -> AnalysisResult {
    let index = calculate_readiness_index(user);
    let profile_strength = index.overall_score;
    let tier = readiness_level(profile_strength);
    let skill_count = user.skill_keys().len();

    let insights = vec![
        trust_insight(user),
        skills_insight(skill_count, index.skills_score),
        goals_insight(user.goals.len()),
        network_insight(user, index.network_score),
    ];

    let (verdict, verdict_type) = build_verdict(tier, skill_count, user.trust_score);

    let recommendations: Vec<Recommendation> = index
        .gaps()
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(to_recommendation)
        .collect();

    let data_points_analyzed = user.skills.len() + user.goals.len() + STRUCTURAL_FIELDS;

    debug!(
        user_id = %user.id,
        strength = profile_strength,
        tier = tier.label(),
        recommendations = recommendations.len(),
        "user report generated"
    );

    AnalysisResult {
        profile_strength,
        profile_tier: tier,
        tier_label: tier.label().to_string(),
        tier_emoji: tier.emoji().to_string(),
        verdict,
        verdict_type,
        insights,
        recommendations,
        data_points_analyzed,
    }
}

/// High bands are positive, the lowest band is critical.
fn severity_for(score: u32) -> Severity {
    match readiness_level(score) {
        ReadinessLevel::Elite | ReadinessLevel::Strong => Severity::Positive,
        ReadinessLevel::Developing => Severity::Warning,
        ReadinessLevel::Emerging => Severity::Critical,
    }
}

fn trust_insight(user: &User) -> Insight {
    let trust = user.trust_score.min(100);
    let level = user.trust_level().label();
    let severity = severity_for(trust);
    let (title, tail) = match severity {
        Severity::Positive => (
            "Trusted reputation",
            "Verified partners see you as a reliable applicant.",
        ),
        Severity::Warning => (
            "Reputation building",
            "Verified activity and peer endorsements will raise it.",
        ),
        Severity::Critical => (
            "Low trust score",
            "Many verified partners shortlist on trust first.",
        ),
    };
    Insight {
        category: InsightCategory::Trust,
        severity,
        icon: "🛡️".to_string(),
        title: title.to_string(),
        description: format!("Trust score {trust}/100 ({level}). {tail}"),
    }
}

fn skills_insight(skill_count: usize, skills_score: u32) -> Insight {
    let severity = severity_for(skills_score);
    let title = match severity {
        Severity::Positive => "Well-rounded skill set",
        Severity::Warning => "Skill set taking shape",
        Severity::Critical => "Skills missing",
    };
    Insight {
        category: InsightCategory::Skills,
        severity,
        icon: "🧠".to_string(),
        title: title.to_string(),
        description: format!(
            "{} listed; skills score {skills_score}/100.",
            plural(skill_count, "skill")
        ),
    }
}

/// Any goal at all lifts the insight out of critical; GOAL_TARGET goals make it positive.
fn goals_insight(goal_count: usize) -> Insight {
    let (severity, title) = match goal_count {
        0 => (Severity::Critical, "No clear goals"),
        n if n < GOAL_TARGET => (Severity::Warning, "Goals partly defined"),
        _ => (Severity::Positive, "Clear direction"),
    };
    Insight {
        category: InsightCategory::Goals,
        severity,
        icon: "🎯".to_string(),
        title: title.to_string(),
        description: format!(
            "{} set. Goals drive which opportunities rank first for you.",
            plural(goal_count, "goal")
        ),
    }
}

fn network_insight(user: &User, network_score: u32) -> Insight {
    let severity = severity_for(network_score);
    let title = match severity {
        Severity::Positive => "Strong network",
        Severity::Warning => "Growing network",
        Severity::Critical => "Isolated profile",
    };
    let description = match user.connections {
        Some(n) => format!(
            "Network score {network_score}/100 from {}.",
            plural(n as usize, "connection")
        ),
        None => format!("Network score {network_score}/100, based on trust alone."),
    };
    Insight {
        category: InsightCategory::Network,
        severity,
        icon: "🤝".to_string(),
        title: title.to_string(),
        description,
    }
}

fn build_verdict(
    tier: ReadinessLevel,
    skill_count: usize,
    trust_score: u32,
) -> (String, VerdictType) {
    let skills = plural(skill_count, "skill");
    match tier {
        ReadinessLevel::Elite | ReadinessLevel::Strong => (
            format!(
                "Your profile is opportunity-ready: {skills} and a trust score of {trust_score} place you in the {} tier.",
                tier.label()
            ),
            VerdictType::Success,
        ),
        ReadinessLevel::Developing => (
            format!(
                "You're on your way: {skills} and a trust score of {trust_score}. A few improvements will move you into the Strong tier."
            ),
            VerdictType::Info,
        ),
        ReadinessLevel::Emerging => (
            format!(
                "Your profile needs attention: {skills} listed and a trust score of {trust_score}. Start with the recommendations below."
            ),
            VerdictType::Warning,
        ),
    }
}

fn to_recommendation(gap: &ReadinessGap) -> Recommendation {
    let (title, link) = match gap.area {
        ReadinessArea::Profile => ("Complete your profile", "/profile/edit"),
        ReadinessArea::Skills => ("Add more skills", "/profile/edit#skills"),
        ReadinessArea::Activity => ("Get active on opportunities", "/opportunities"),
        ReadinessArea::Network => ("Grow your network", "/community"),
    };
    Recommendation {
        id: format!("rec-{}", gap.area.as_str()),
        title: title.to_string(),
        reason: format!(
            "{}. Your {} score is {}/100.",
            gap.message,
            gap.area.as_str(),
            gap.score
        ),
        priority: priority_for(gap.score),
        link: link.to_string(),
    }
}

/// Distance below the recommendation threshold.
fn priority_for(score: u32) -> Priority {
    match RECOMMENDATION_THRESHOLD.saturating_sub(score) {
        d if d >= 30 => Priority::High,
        d if d >= 15 => Priority::Medium,
        _ => Priority::Low,
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
