use super::inputs::ImpactInputs;
use super::projection::ImpactProjection;

/// Standard full-time hours worked in a year.
pub const ANNUAL_FULL_TIME_HOURS: f64 = 2080.0;

/// Pure projection of jobs, income, output and tax revenue. Zero incentive
/// or zero tax revenue yield zero ratios rather than an error.
pub fn calculate_economic_impact(inputs: &ImpactInputs) -> ImpactProjection {
    let period = f64::from(inputs.analysis_period_years);
    let spillover = inputs.employment_multiplier - 1.0;

    let direct_jobs_construction = inputs.construction_jobs;
    let indirect_jobs_construction = round_to_tenth(direct_jobs_construction * spillover);
    let total_jobs_construction = direct_jobs_construction + indirect_jobs_construction;

    let direct_jobs_permanent = inputs.permanent_jobs;
    let indirect_jobs_permanent = round_to_tenth(direct_jobs_permanent * spillover);
    let total_jobs_permanent = direct_jobs_permanent + indirect_jobs_permanent;

    let construction_hours = inputs.construction_jobs
        * ANNUAL_FULL_TIME_HOURS
        * (inputs.construction_duration_months / 12.0);
    let direct_construction_income = construction_hours * inputs.construction_avg_wage;
    let total_construction_income = direct_construction_income * inputs.income_multiplier;

    let permanent_annual_hours = inputs.permanent_jobs * ANNUAL_FULL_TIME_HOURS;
    let direct_permanent_income_annual = permanent_annual_hours * inputs.permanent_avg_wage;
    let total_permanent_income_annual = direct_permanent_income_annual * inputs.income_multiplier;
    let total_permanent_income_period = total_permanent_income_annual * period;

    let direct_output = inputs.total_investment;
    let total_output = inputs.total_investment * inputs.output_multiplier;
    let indirect_induced_output = total_output - direct_output;

    let annual_property_tax = inputs.property_value_increase * (inputs.property_tax_rate / 100.0);
    let total_property_tax_period = annual_property_tax * period;

    let local_spending = (inputs.annual_operating_costs + inputs.annual_revenue)
        * (inputs.local_procurement_pct / 100.0);
    let annual_sales_tax = local_spending * (inputs.sales_tax_rate / 100.0);
    let total_sales_tax_period = annual_sales_tax * period;

    let total_tax_revenue_period = total_property_tax_period + total_sales_tax_period;
    let annual_tax_revenue = annual_property_tax + annual_sales_tax;

    let (roi_ratio, payback_years) = if inputs.cra_incentive > 0.0 {
        let payback = if annual_tax_revenue > 0.0 {
            inputs.cra_incentive / annual_tax_revenue
        } else {
            0.0
        };
        (total_tax_revenue_period / inputs.cra_incentive, payback)
    } else {
        (0.0, 0.0)
    };

    let leverage_ratio = if inputs.cra_incentive > 0.0 {
        inputs.private_funding / inputs.cra_incentive
    } else {
        0.0
    };

    ImpactProjection {
        direct_jobs_construction,
        indirect_jobs_construction,
        total_jobs_construction,
        direct_jobs_permanent,
        indirect_jobs_permanent,
        total_jobs_permanent,
        direct_construction_income,
        total_construction_income,
        direct_permanent_income_annual,
        total_permanent_income_annual,
        total_permanent_income_period,
        direct_output,
        total_output,
        indirect_induced_output,
        annual_property_tax,
        total_property_tax_period,
        annual_sales_tax,
        total_sales_tax_period,
        total_tax_revenue_period,
        annual_tax_revenue,
        roi_ratio,
        payback_years,
        leverage_ratio,
        total_income_all_sources: total_construction_income + total_permanent_income_period,
        analysis_period_years: inputs.analysis_period_years,
        community_benefits: inputs.community_benefits,
    }
}

/// Rounds to one decimal with ties away from zero (`f64::round`). Ties do not
/// go to the even digit: 0.25 becomes 0.3 here where banker's rounding gives 0.2.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_tenths_away_from_zero() {
        assert_eq!(round_to_tenth(1.8999999999999995), 1.9);
        assert_eq!(round_to_tenth(3.04), 3.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn exact_ties_round_up_not_to_even() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(2.25), 2.3);
        assert_eq!(round_to_tenth(0.75), 0.8);
    }
}
