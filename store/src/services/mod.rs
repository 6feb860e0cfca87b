//! Orchestration services
//!
//! Each user-triggered action is one load-compute-save cycle over the
//! injected adapter; conflicted writes are resolved by replaying the
//! action's events over the freshest snapshot.

pub mod gamification;
pub mod plan;

pub use gamification::GamificationService;
pub use plan::{GeneratedPlan, PlanService};

/// How many times a conflicted write is attempted before giving up
pub(crate) const MAX_WRITE_ATTEMPTS: u32 = 3;
