use serde::{Deserialize, Serialize};

pub const DEFAULT_PROPOSED_USE: &str = "restaurant";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    #[default]
    Rent,
    Own,
}

impl Tenure {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::Own => "Own",
        }
    }
}

/// Community benefit counts passed through to the projection untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityBenefits {
    pub affordable_housing_units: u32,
    pub public_space_sqft: u32,
    pub parking_spaces: u32,
    pub retail_units: u32,
}

/// Project record as submitted by the intake form. Numeric fields that are
/// absent deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub project_name: String,
    pub address: String,

    pub building_size: f64,
    pub building_bay_size: f64,
    pub parcel_size: f64,
    pub current_sf: f64,

    pub proposed_use: String,
    pub tenure: Tenure,
    pub purchase_price: f64,

    pub total_development_cost: f64,
    pub hard_costs: f64,
    pub soft_costs: f64,
    pub financing_costs: f64,
    pub ffe_costs: f64,
    pub construction_duration_months: f64,

    pub full_time_jobs: u32,
    pub part_time_jobs: u32,
    pub average_wage: f64,
    pub occupancy_capacity: u32,
    pub table_count: u32,
    pub annual_revenue: f64,
    pub annual_expenses: f64,
    pub annual_rent: f64,
    pub rent_per_sf: f64,

    pub funding_request: f64,

    #[serde(flatten)]
    pub community_benefits: CommunityBenefits,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be a finite, non-negative number")]
    Negative { field: &'static str },
    #[error("analysis period must be at least one year")]
    AnalysisPeriod,
}

impl ProjectInput {
    /// Applies the area and proposed-use defaults.
    pub fn normalized(&self) -> Self {
        let mut input = self.clone();

        if input.building_size > 0.0 {
            if input.current_sf <= 0.0 {
                input.current_sf = input.building_size;
            }
            if input.building_bay_size <= 0.0 {
                input.building_bay_size = input.building_size;
            }
        }

        if input.proposed_use.trim().is_empty() {
            input.proposed_use = DEFAULT_PROPOSED_USE.to_string();
        }

        input
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let amounts = [
            ("building_size", self.building_size),
            ("building_bay_size", self.building_bay_size),
            ("parcel_size", self.parcel_size),
            ("current_sf", self.current_sf),
            ("purchase_price", self.purchase_price),
            ("total_development_cost", self.total_development_cost),
            ("hard_costs", self.hard_costs),
            ("soft_costs", self.soft_costs),
            ("financing_costs", self.financing_costs),
            ("ffe_costs", self.ffe_costs),
            ("construction_duration_months", self.construction_duration_months),
            ("average_wage", self.average_wage),
            ("annual_revenue", self.annual_revenue),
            ("annual_expenses", self.annual_expenses),
            ("annual_rent", self.annual_rent),
            ("rent_per_sf", self.rent_per_sf),
            ("funding_request", self.funding_request),
        ];

        ensure_non_negative(&amounts)
    }
}

pub(crate) fn ensure_non_negative(amounts: &[(&'static str, f64)]) -> Result<(), InputError> {
    match amounts
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        Some((field, _)) => Err(InputError::Negative { field: *field }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn areas_default_to_building_size() {
        let input = ProjectInput {
            building_size: 2400.0,
            ..ProjectInput::default()
        };

        let normalized = input.normalized();
        assert_eq!(normalized.current_sf, 2400.0);
        assert_eq!(normalized.building_bay_size, 2400.0);
        assert_eq!(normalized.proposed_use, "restaurant");
    }

    #[test]
    fn explicit_areas_are_preserved() {
        let input = ProjectInput {
            building_size: 2400.0,
            current_sf: 1800.0,
            building_bay_size: 1200.0,
            proposed_use: "Cafe".to_string(),
            ..ProjectInput::default()
        };

        let normalized = input.normalized();
        assert_eq!(normalized.current_sf, 1800.0);
        assert_eq!(normalized.building_bay_size, 1200.0);
        assert_eq!(normalized.proposed_use, "Cafe");
    }

    #[test]
    fn zero_building_size_leaves_areas_unset() {
        let normalized = ProjectInput::default().normalized();
        assert_eq!(normalized.current_sf, 0.0);
        assert_eq!(normalized.building_bay_size, 0.0);
    }

    #[test]
    fn validate_names_the_offending_field() {
        let input = ProjectInput {
            hard_costs: -5.0,
            ..ProjectInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(InputError::Negative {
                field: "hard_costs"
            })
        );

        let input = ProjectInput {
            annual_rent: f64::NAN,
            ..ProjectInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(InputError::Negative {
                field: "annual_rent"
            })
        );
    }

    #[test]
    fn deserializes_partial_form_payload() {
        let input: ProjectInput = serde_json::from_value(json!({
            "project_name": "Downtown Cafe",
            "proposed_use": "Downtown Cafe",
            "tenure": "own",
            "building_size": 2400.0,
            "full_time_jobs": 8,
            "parking_spaces": 12
        }))
        .expect("form payload deserializes");

        assert_eq!(input.tenure, Tenure::Own);
        assert_eq!(input.full_time_jobs, 8);
        assert_eq!(input.community_benefits.parking_spaces, 12);
        assert_eq!(input.total_development_cost, 0.0);
    }
}
