use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    Grant,
    Job,
    Mentor,
    Housing,
}

impl OpportunityType {
    pub fn label(&self) -> &'static str {
        match self {
            OpportunityType::Grant => "grant",
            OpportunityType::Job => "job",
            OpportunityType::Mentor => "mentorship",
            OpportunityType::Housing => "housing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

impl CompetitionLevel {
    pub fn from_applicant_count(applicants: u32) -> Self {
        match applicants {
            n if n >= 100 => CompetitionLevel::High,
            n if n >= 30 => CompetitionLevel::Medium,
            _ => CompetitionLevel::Low,
        }
    }
}

/// A listing from a partner organisation. `deadline` may already be in the past.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: OpportunityType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Human-readable requirement strings, e.g. "Data Analysis".
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub location: String,
    pub deadline: DateTime<Utc>,
    pub posted_at: DateTime<Utc>,
    pub source_partner: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub competition_level: Option<CompetitionLevel>,
    #[serde(default)]
    pub compensation: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub remote_friendly: Option<bool>,
    #[serde(default)]
    pub applicant_count: Option<u32>,
}

impl Opportunity {
    /// Provided level first, then one derived from `applicant_count`.
    pub fn effective_competition(&self) -> Option<CompetitionLevel> {
        self.competition_level
            .or_else(|| self.applicant_count.map(CompetitionLevel::from_applicant_count))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.requirements.iter().any(|r| r.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "opportunity {}: blank requirement entry",
                self.id
            )));
        }
        Ok(())
    }
}
