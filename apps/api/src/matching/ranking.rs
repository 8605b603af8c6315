//! Opportunity Ranking Engine: applies the match scorer across a catalogue.
//!
//! Ordering:
//! 1. Open opportunities before closed ones (days until deadline < 0)
//! 2. Descending score, where scores within URGENCY_TOLERANCE of a cluster's
//!    top score form one cluster
//! 3. Inside a cluster: soonest deadline, then higher score, then verified partner
//! 4. Catalogue order for anything still tied (stable sort)
//!
//! Clusters are anchored on their highest score, so two opportunities whose scores
//! differ by more than the tolerance never share one and keep score order.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::dates::{days_until, days_until_from, deadline_label, format_date};
use crate::matching::match_scorer::{calculate_match_score, MatchResult};
use crate::models::{CompetitionLevel, Opportunity, User};

pub const URGENCY_TOLERANCE: u32 = 5;

/// An opportunity paired with its match result. Ephemeral view, built per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOpportunity {
    pub opportunity: Opportunity,
    pub match_result: MatchResult,
    pub days_until_deadline: i64,
    /// "Closes today", "3 days left", "Closed", ...
    pub deadline_label: String,
    pub deadline_display: String,
    pub competition: Option<CompetitionLevel>,
}

impl RankedOpportunity {
    pub fn is_closed(&self) -> bool {
        self.days_until_deadline < 0
    }
}

/// Ranks the full catalogue against the host clock. Never filters.
pub fn rank_opportunities(user: &User, opportunities: &[Opportunity]) -> Vec<RankedOpportunity> {
    rank_with(user, opportunities, days_until)
}

pub fn rank_opportunities_at(
    user: &User,
    opportunities: &[Opportunity],
    now: DateTime<Utc>,
) -> Vec<RankedOpportunity> {
    rank_with(user, opportunities, |deadline| days_until_from(deadline, now))
}

fn rank_with(
    user: &User,
    opportunities: &[Opportunity],
    days_left: impl Fn(DateTime<Utc>) -> i64,
) -> Vec<RankedOpportunity> {
    let scored: Vec<RankedOpportunity> = opportunities
        .iter()
        .map(|opportunity| {
            let days = days_left(opportunity.deadline);
            RankedOpportunity {
                match_result: calculate_match_score(user, opportunity),
                days_until_deadline: days,
                deadline_label: deadline_label(days),
                deadline_display: format_date(opportunity.deadline),
                competition: opportunity.effective_competition(),
                opportunity: opportunity.clone(),
            }
        })
        .collect();

    let (open, closed): (Vec<_>, Vec<_>) = scored.into_iter().partition(|r| !r.is_closed());

    let mut ranked = order_open(open);
    ranked.extend(order_closed(closed));

    debug!(
        user_id = %user.id,
        catalogue = ranked.len(),
        "ranked opportunities"
    );
    ranked
}

fn order_open(mut open: Vec<RankedOpportunity>) -> Vec<RankedOpportunity> {
    open.sort_by_key(|r| Reverse(r.match_result.score));

    let mut ranked = Vec::with_capacity(open.len());
    let mut rest = open.into_iter().peekable();
    while let Some(anchor) = rest.next() {
        let floor = anchor.match_result.score.saturating_sub(URGENCY_TOLERANCE);
        let mut cluster = vec![anchor];
        while let Some(next) = rest.next_if(|r| r.match_result.score >= floor) {
            cluster.push(next);
        }
        cluster.sort_by_key(|r| {
            (
                r.days_until_deadline,
                Reverse(r.match_result.score),
                Reverse(r.opportunity.is_verified),
            )
        });
        ranked.extend(cluster);
    }
    ranked
}

fn order_closed(mut closed: Vec<RankedOpportunity>) -> Vec<RankedOpportunity> {
    closed.sort_by_key(|r| (Reverse(r.match_result.score), Reverse(r.opportunity.is_verified)));
    closed
}
