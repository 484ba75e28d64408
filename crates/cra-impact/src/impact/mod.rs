//! Deterministic job, income, output and tax projections.

mod calculator;
mod inputs;
mod projection;

pub use calculator::{calculate_economic_impact, ANNUAL_FULL_TIME_HOURS};
pub use inputs::{ImpactAssumptions, ImpactInputs};
pub use projection::ImpactProjection;
