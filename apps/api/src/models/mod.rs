pub mod opportunity;
pub mod user;

pub use opportunity::{CompetitionLevel, Opportunity, OpportunityType};
pub use user::User;
