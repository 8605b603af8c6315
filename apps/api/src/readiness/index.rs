//! Opportunity Readiness Index (ORI): four weighted sub-scores plus the
//! recommendations that fall out of them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;

/// Sub-score weights in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub profile: u32,
    pub skills: u32,
    pub activity: u32,
    pub network: u32,
}

impl ReadinessWeights {
    pub const fn sum(&self) -> u32 {
        self.profile + self.skills + self.activity + self.network
    }
}

pub const READINESS_WEIGHTS: ReadinessWeights = ReadinessWeights {
    profile: 25,
    skills: 30,
    activity: 20,
    network: 25,
};

const _: () = assert!(
    READINESS_WEIGHTS.sum() == 100,
    "readiness weights must sum to exactly 100"
);

/// Sub-scores below this produce a recommendation.
pub const RECOMMENDATION_THRESHOLD: u32 = 60;

/// Skill count that earns 80 points; growth past it saturates toward 100.
pub const SKILL_TARGET: usize = 5;
const SKILL_HALF_LIFE: f64 = 2.0;

const XP_CAP: u32 = 1_000;
const LEVEL_CAP: u32 = 10;
const BADGE_CAP: usize = 5;
const CONNECTION_CAP: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessArea {
    Profile,
    Skills,
    Activity,
    Network,
}

impl ReadinessArea {
    pub const ALL: [ReadinessArea; 4] = [
        ReadinessArea::Profile,
        ReadinessArea::Skills,
        ReadinessArea::Activity,
        ReadinessArea::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessArea::Profile => "profile",
            ReadinessArea::Skills => "skills",
            ReadinessArea::Activity => "activity",
            ReadinessArea::Network => "network",
        }
    }

    fn advice(&self) -> &'static str {
        match self {
            ReadinessArea::Profile => {
                "Complete your profile: add a bio and link your social accounts"
            }
            ReadinessArea::Skills => "Add more skills to your profile to unlock better matches",
            ReadinessArea::Activity => {
                "Earn XP and badges by applying to opportunities and joining challenges"
            }
            ReadinessArea::Network => "Grow your network and trust by connecting with peers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessIndex {
    pub overall_score: u32,
    pub profile_score: u32,
    pub skills_score: u32,
    pub activity_score: u32,
    pub network_score: u32,
    /// Lowest sub-score first.
    pub recommendations: Vec<String>,
}

impl ReadinessIndex {
    pub fn area_score(&self, area: ReadinessArea) -> u32 {
        match area {
            ReadinessArea::Profile => self.profile_score,
            ReadinessArea::Skills => self.skills_score,
            ReadinessArea::Activity => self.activity_score,
            ReadinessArea::Network => self.network_score,
        }
    }

    /// Structured form of `recommendations`, same order.
    pub fn gaps(&self) -> Vec<ReadinessGap> {
        let mut gaps: Vec<ReadinessGap> = ReadinessArea::ALL
            .iter()
            .map(|&area| ReadinessGap {
                area,
                score: self.area_score(area),
                message: area.advice().to_string(),
            })
            .filter(|gap| gap.score < RECOMMENDATION_THRESHOLD)
            .collect();
        gaps.sort_by_key(|gap| (gap.score, gap.area));
        gaps
    }
}

/// One qualifying recommendation with the sub-score that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessGap {
    pub area: ReadinessArea,
    pub score: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Emerging,
    Developing,
    Strong,
    Elite,
}

impl ReadinessLevel {
    pub fn emoji(&self) -> &'static str {
        match self {
            ReadinessLevel::Elite => "🏆",
            ReadinessLevel::Strong => "💪",
            ReadinessLevel::Developing => "📈",
            ReadinessLevel::Emerging => "🌱",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLevel::Elite => "Elite",
            ReadinessLevel::Strong => "Strong",
            ReadinessLevel::Developing => "Developing",
            ReadinessLevel::Emerging => "Emerging",
        }
    }
}

/// Contiguous bands over 0..=100; anything above 100 is Elite.
pub fn readiness_level(score: u32) -> ReadinessLevel {
    match score {
        s if s >= 90 => ReadinessLevel::Elite,
        s if s >= 70 => ReadinessLevel::Strong,
        s if s >= 40 => ReadinessLevel::Developing,
        _ => ReadinessLevel::Emerging,
    }
}

pub fn calculate_readiness_index(user: &User) -> ReadinessIndex {
    let profile_score = profile_score(user);
    let skills_score = skills_score(user.skill_keys().len());
    let activity_score = activity_score(user);
    let network_score = network_score(user);

    let w = READINESS_WEIGHTS;
    let weighted = w.profile * profile_score
        + w.skills * skills_score
        + w.activity * activity_score
        + w.network * network_score;
    // Half-up integer rounding.
    let overall_score = ((weighted + w.sum() / 2) / w.sum()).min(100);

    let mut index = ReadinessIndex {
        overall_score,
        profile_score,
        skills_score,
        activity_score,
        network_score,
        recommendations: Vec::new(),
    };
    index.recommendations = index.gaps().into_iter().map(|gap| gap.message).collect();

    debug!(
        user_id = %user.id,
        overall = overall_score,
        profile = profile_score,
        skills = skills_score,
        activity = activity_score,
        network = network_score,
        "readiness index computed"
    );
    index
}

/// 70% completeness, 15 for a bio, 5 per social link.
fn profile_score(user: &User) -> u32 {
    let completeness = (user.profile_completeness.min(100) * 70) as f64 / 100.0;
    let bio = if user.has_bio() { 15.0 } else { 0.0 };
    let social = (user.social_links.count().min(3) * 5) as f64;
    to_score(completeness + bio + social)
}

fn skills_score(skill_count: usize) -> u32 {
    if skill_count <= SKILL_TARGET {
        return to_score(80.0 * skill_count as f64 / SKILL_TARGET as f64);
    }
    let extra = (skill_count - SKILL_TARGET) as f64;
    to_score(80.0 + 20.0 * (1.0 - 0.5_f64.powf(extra / SKILL_HALF_LIFE)))
}

/// 40 from XP, 30 from level, 30 from badges.
fn activity_score(user: &User) -> u32 {
    let xp = user.xp_points.min(XP_CAP) as f64 / XP_CAP as f64 * 40.0;
    let level = user.xp_level.min(LEVEL_CAP) as f64 / LEVEL_CAP as f64 * 30.0;
    let badges = user.badges.len().min(BADGE_CAP) as f64 / BADGE_CAP as f64 * 30.0;
    to_score(xp + level + badges)
}

/// Trust alone when connections are unknown, otherwise 60/40 trust and connections.
fn network_score(user: &User) -> u32 {
    let trust = user.trust_score.min(100) as f64;
    match user.connections {
        None => to_score(trust),
        Some(connections) => {
            let reach = connections.min(CONNECTION_CAP) as f64 / CONNECTION_CAP as f64 * 100.0;
            to_score(0.6 * trust + 0.4 * reach)
        }
    }
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures::user;
    use crate::models::user::{Badge, SocialLinks};

    fn badge(n: usize) -> Badge {
        Badge {
            id: format!("badge-{n}"),
            name: format!("Badge {n}"),
            earned_at: None,
        }
    }

    fn maxed() -> User {
        let mut u = user(
            &["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o"],
            &["Research"],
        );
        u.profile_completeness = 100;
        u.bio = Some("Researcher and builder".to_string());
        u.social_links = SocialLinks {
            linkedin: Some("l".to_string()),
            github: Some("g".to_string()),
            website: Some("w".to_string()),
        };
        u.xp_points = 5_000;
        u.xp_level = 20;
        u.badges = (0..8).map(badge).collect();
        u.trust_score = 100;
        u.connections = Some(50);
        u
    }

    #[test]
    fn test_skills_linear_to_target_then_saturates() {
        assert_eq!(skills_score(0), 0);
        assert_eq!(skills_score(1), 16);
        assert_eq!(skills_score(SKILL_TARGET), 80);
        assert_eq!(skills_score(7), 90);
        let mut previous = 0;
        for n in 0..60 {
            let s = skills_score(n);
            assert!(s >= previous && s <= 100);
            previous = s;
        }
        // Gains past the target shrink.
        assert!(skills_score(7) - skills_score(5) > skills_score(9) - skills_score(7));
    }

    #[test]
    fn test_profile_score_components() {
        let mut u = user(&[], &[]);
        u.profile_completeness = 100;
        assert_eq!(profile_score(&u), 70);
        u.bio = Some("hello".to_string());
        assert_eq!(profile_score(&u), 85);
        u.social_links.github = Some("gh".to_string());
        assert_eq!(profile_score(&u), 90);
    }

    #[test]
    fn test_network_uses_trust_when_connections_unknown() {
        let mut u = user(&[], &[]);
        u.trust_score = 72;
        assert_eq!(network_score(&u), 72);
        u.connections = Some(10);
        // 0.6*72 + 0.4*50
        assert_eq!(network_score(&u), 63);
    }

    #[test]
    fn test_maxed_profile_scores_100() {
        let index = calculate_readiness_index(&maxed());
        assert_eq!(index.profile_score, 100);
        assert_eq!(index.activity_score, 100);
        assert_eq!(index.network_score, 100);
        assert!(index.skills_score >= 99);
        assert!(index.overall_score >= 99 && index.overall_score <= 100);
        assert!(index.recommendations.is_empty());
    }

    #[test]
    fn test_empty_profile_recommends_everything_lowest_first() {
        let mut u = user(&[], &[]);
        u.profile_completeness = 20; // profile 14
        u.xp_points = 0;
        u.xp_level = 0; // activity 0
        u.trust_score = 30; // network 30
        let index = calculate_readiness_index(&u);

        assert_eq!(index.skills_score, 0);
        assert_eq!(index.activity_score, 0);
        let areas: Vec<ReadinessArea> = index.gaps().iter().map(|g| g.area).collect();
        // skills and activity tie at 0: fixed area order breaks the tie
        assert_eq!(
            areas,
            vec![
                ReadinessArea::Skills,
                ReadinessArea::Activity,
                ReadinessArea::Profile,
                ReadinessArea::Network
            ]
        );
        assert_eq!(index.recommendations.len(), 4);
        assert!(index.recommendations[0].contains("skills"));
    }

    #[test]
    fn test_overall_is_weighted_average() {
        let mut u = user(&["a", "b", "c", "d", "e"], &[]);
        u.profile_completeness = 100; // 70
        u.xp_points = 500;
        u.xp_level = 5;
        u.badges = vec![]; // 20 + 15 = 35
        u.trust_score = 80; // 80
        let index = calculate_readiness_index(&u);
        assert_eq!(index.profile_score, 70);
        assert_eq!(index.skills_score, 80);
        assert_eq!(index.activity_score, 35);
        assert_eq!(index.network_score, 80);
        // (25*70 + 30*80 + 20*35 + 25*80) / 100 = 68.5 → 69
        assert_eq!(index.overall_score, 69);
        assert_eq!(index.recommendations.len(), 1);
    }

    #[test]
    fn test_level_bands_contiguous() {
        assert_eq!(readiness_level(0), ReadinessLevel::Emerging);
        assert_eq!(readiness_level(39), ReadinessLevel::Emerging);
        assert_eq!(readiness_level(40), ReadinessLevel::Developing);
        assert_eq!(readiness_level(69), ReadinessLevel::Developing);
        assert_eq!(readiness_level(70), ReadinessLevel::Strong);
        assert_eq!(readiness_level(89), ReadinessLevel::Strong);
        assert_eq!(readiness_level(90), ReadinessLevel::Elite);
        assert_eq!(readiness_level(100), ReadinessLevel::Elite);
        assert_eq!(readiness_level(90).emoji(), "🏆");
        assert_eq!(readiness_level(10).label(), "Emerging");
    }

    #[test]
    fn test_deterministic() {
        let u = maxed();
        assert_eq!(calculate_readiness_index(&u), calculate_readiness_index(&u));
    }
}
