use crate::context::CommunityBenefits;
use serde::{Deserialize, Serialize};

/// Calculator output. Job figures are fractional because indirect jobs are
/// derived from multipliers; indirect counts are rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactProjection {
    pub direct_jobs_construction: f64,
    pub indirect_jobs_construction: f64,
    pub total_jobs_construction: f64,
    pub direct_jobs_permanent: f64,
    pub indirect_jobs_permanent: f64,
    pub total_jobs_permanent: f64,

    pub direct_construction_income: f64,
    pub total_construction_income: f64,
    pub direct_permanent_income_annual: f64,
    pub total_permanent_income_annual: f64,
    pub total_permanent_income_period: f64,

    pub direct_output: f64,
    pub total_output: f64,
    pub indirect_induced_output: f64,

    pub annual_property_tax: f64,
    pub total_property_tax_period: f64,
    pub annual_sales_tax: f64,
    pub total_sales_tax_period: f64,
    pub total_tax_revenue_period: f64,
    pub annual_tax_revenue: f64,

    pub roi_ratio: f64,
    pub payback_years: f64,
    pub leverage_ratio: f64,

    pub total_income_all_sources: f64,
    pub analysis_period_years: u32,
    pub community_benefits: CommunityBenefits,
}
