use crate::context::{ensure_non_negative, AnalysisContext, CommunityBenefits, InputError};
use serde::{Deserialize, Serialize};

use super::calculator::ANNUAL_FULL_TIME_HOURS;

/// Normalized investment and operations figures consumed by the calculator.
/// Percentages are expressed on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactInputs {
    pub total_investment: f64,
    pub cra_incentive: f64,
    pub private_funding: f64,
    pub construction_jobs: f64,
    pub construction_avg_wage: f64,
    pub permanent_jobs: f64,
    pub permanent_avg_wage: f64,
    pub construction_duration_months: f64,
    pub analysis_period_years: u32,
    pub annual_operating_costs: f64,
    pub annual_revenue: f64,
    pub property_value_increase: f64,
    pub property_tax_rate: f64,
    pub local_procurement_pct: f64,
    pub employment_multiplier: f64,
    pub income_multiplier: f64,
    pub output_multiplier: f64,
    pub sales_tax_rate: f64,
    #[serde(default)]
    pub community_benefits: CommunityBenefits,
}

/// Analyst-supplied figures the intake form does not capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactAssumptions {
    pub construction_jobs: f64,
    /// Hourly wage for construction labor.
    pub construction_avg_wage: f64,
    pub analysis_period_years: u32,
    pub local_procurement_pct: f64,
    pub sales_tax_rate: f64,
    /// Full-time equivalent weight applied to part-time positions.
    pub part_time_weight: f64,
    pub property_value_increase: Option<f64>,
    pub property_tax_rate: Option<f64>,
}

impl Default for ImpactAssumptions {
    fn default() -> Self {
        Self {
            construction_jobs: 0.0,
            construction_avg_wage: 0.0,
            analysis_period_years: 10,
            local_procurement_pct: 60.0,
            sales_tax_rate: 7.0,
            part_time_weight: 0.5,
            property_value_increase: None,
            property_tax_rate: None,
        }
    }
}

impl ImpactInputs {
    pub fn from_context(context: &AnalysisContext, assumptions: &ImpactAssumptions) -> Self {
        let project = &context.project_inputs;
        let fiscal = &context.fiscal_parameters;
        let multipliers = &context.economic_multipliers;

        let permanent_jobs = f64::from(project.full_time_jobs)
            + assumptions.part_time_weight * f64::from(project.part_time_jobs);
        let property_value_increase = assumptions
            .property_value_increase
            .unwrap_or(project.hard_costs * fiscal.hard_cost_capitalization_rate);
        let property_tax_rate = assumptions
            .property_tax_rate
            .unwrap_or(fiscal.combined_millage / 10.0);

        Self {
            total_investment: project.total_development_cost,
            cra_incentive: project.funding_request,
            private_funding: (project.total_development_cost - project.funding_request).max(0.0),
            construction_jobs: assumptions.construction_jobs,
            construction_avg_wage: assumptions.construction_avg_wage,
            permanent_jobs,
            permanent_avg_wage: project.average_wage / ANNUAL_FULL_TIME_HOURS,
            construction_duration_months: project.construction_duration_months,
            analysis_period_years: assumptions.analysis_period_years,
            annual_operating_costs: project.annual_expenses,
            annual_revenue: project.annual_revenue,
            property_value_increase,
            property_tax_rate,
            local_procurement_pct: assumptions.local_procurement_pct,
            employment_multiplier: multipliers.employment_multiplier,
            income_multiplier: multipliers.earnings_multiplier,
            output_multiplier: multipliers.output_multiplier,
            sales_tax_rate: assumptions.sales_tax_rate,
            community_benefits: project.community_benefits,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.analysis_period_years == 0 {
            return Err(InputError::AnalysisPeriod);
        }

        ensure_non_negative(&[
            ("total_investment", self.total_investment),
            ("cra_incentive", self.cra_incentive),
            ("private_funding", self.private_funding),
            ("construction_jobs", self.construction_jobs),
            ("construction_avg_wage", self.construction_avg_wage),
            ("permanent_jobs", self.permanent_jobs),
            ("permanent_avg_wage", self.permanent_avg_wage),
            ("construction_duration_months", self.construction_duration_months),
            ("annual_operating_costs", self.annual_operating_costs),
            ("annual_revenue", self.annual_revenue),
            ("property_value_increase", self.property_value_increase),
            ("property_tax_rate", self.property_tax_rate),
            ("local_procurement_pct", self.local_procurement_pct),
            ("employment_multiplier", self.employment_multiplier),
            ("income_multiplier", self.income_multiplier),
            ("output_multiplier", self.output_multiplier),
            ("sales_tax_rate", self.sales_tax_rate),
        ])
    }
}
