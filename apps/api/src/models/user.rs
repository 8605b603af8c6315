use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::canonical::canonicalize;

/// Member profile as supplied by the profile store.
///
/// `skills` hold canonical keys (`data_analysis`), `goals` hold goal
/// identifiers in the order the member ranked them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    pub trust_score: u32,
    pub profile_completeness: u32,
    #[serde(default)]
    pub xp_points: u32,
    #[serde(default)]
    pub xp_level: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
    /// Accepted peer connections. `None` when the store does not track them.
    #[serde(default)]
    pub connections: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Number of links that are present and non-blank.
    pub fn count(&self) -> usize {
        [&self.linkedin, &self.github, &self.website]
            .into_iter()
            .filter(|link| link.as_deref().is_some_and(|l| !l.trim().is_empty()))
            .count()
    }
}

/// Reputation tier derived from `trust_score`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    Newcomer,
    Member,
    Established,
    Trusted,
}

impl TrustLevel {
    pub fn from_score(trust_score: u32) -> Self {
        match trust_score {
            s if s >= 80 => TrustLevel::Trusted,
            s if s >= 50 => TrustLevel::Established,
            s if s >= 20 => TrustLevel::Member,
            _ => TrustLevel::Newcomer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrustLevel::Newcomer => "Newcomer",
            TrustLevel::Member => "Member",
            TrustLevel::Established => "Established",
            TrustLevel::Trusted => "Trusted",
        }
    }
}

impl User {
    pub fn trust_level(&self) -> TrustLevel {
        TrustLevel::from_score(self.trust_score)
    }

    pub fn has_bio(&self) -> bool {
        self.bio.as_deref().is_some_and(|b| !b.trim().is_empty())
    }

    /// Canonical skill keys, deduplicated.
    pub fn skill_keys(&self) -> HashSet<String> {
        self.skills.iter().map(|s| canonicalize(s)).collect()
    }

    /// Rejects records that break the profile invariants. A failure here means
    /// the upstream store handed over corrupt data.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.trust_score > 100 {
            return Err(AppError::Validation(format!(
                "user {}: trust_score {} is outside 0..=100",
                self.id, self.trust_score
            )));
        }
        if self.profile_completeness > 100 {
            return Err(AppError::Validation(format!(
                "user {}: profile_completeness {} is outside 0..=100",
                self.id, self.profile_completeness
            )));
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            let key = canonicalize(skill);
            if key.is_empty() {
                return Err(AppError::Validation(format!(
                    "user {}: blank skill entry",
                    self.id
                )));
            }
            if !seen.insert(key.clone()) {
                return Err(AppError::Validation(format!(
                    "user {}: duplicate skill '{key}'",
                    self.id
                )));
            }
        }

        Ok(())
    }
}
