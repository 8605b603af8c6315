// Opportunity Readiness Index and the dashboard report built on top of it.

pub mod handlers;
pub mod index;
pub mod report;
