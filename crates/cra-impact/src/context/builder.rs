use super::input::ProjectInput;
use super::property::resolve_property_type;
use crate::regional::{Dataset, Geography, RegionalTables};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicMultipliersSection {
    pub category: String,
    pub naics_code: String,
    pub industry_name: String,
    pub output_multiplier: f64,
    pub employment_multiplier: f64,
    pub earnings_multiplier: f64,
    pub indirect_multiplier: f64,
    pub induced_multiplier: f64,
    pub default_applied: bool,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsSection {
    pub population: u64,
    pub median_income: f64,
    pub labor_force: u64,
    pub unemployment_rate: f64,
    pub median_age: f64,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstateSection {
    pub property_type: String,
    pub avg_rent_psf: f64,
    pub occupancy_rate: f64,
    pub cap_rate: f64,
    pub market_rent: f64,
    pub default_applied: bool,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalSection {
    pub city_millage: f64,
    pub county_millage: f64,
    pub combined_millage: f64,
    pub cra_capture_rate: f64,
    pub hard_cost_capitalization_rate: f64,
    pub property_value_annual_growth: f64,
    pub applicable: bool,
    pub source: String,
}

/// Condensed, serializable bundle handed to the report generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub geography: Geography,
    pub geography_display: String,
    pub project_inputs: ProjectInput,
    pub economic_multipliers: EconomicMultipliersSection,
    pub demographics: DemographicsSection,
    pub real_estate: RealEstateSection,
    pub fiscal_parameters: FiscalSection,
}

impl AnalysisContext {
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn project_name(&self) -> &str {
        &self.project_inputs.project_name
    }
}

/// Resolves a project record against the injected regional tables.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    tables: Arc<RegionalTables>,
}

impl ContextBuilder {
    pub fn new(tables: Arc<RegionalTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RegionalTables {
        &self.tables
    }

    pub fn build(&self, input: &ProjectInput, geography: Geography) -> AnalysisContext {
        let project_inputs = input.normalized();
        let proposed_use = project_inputs.proposed_use.as_str();
        let property_type = resolve_property_type(proposed_use);

        let multipliers = self.tables.lookup_multiplier(proposed_use, geography);
        let real_estate = self.tables.lookup_real_estate(property_type, geography);
        let fiscal = self.tables.lookup_fiscal_parameters(geography);
        let demographics = self.tables.lookup_demographics(geography);

        let multiplier_row = multipliers.row;
        let real_estate_row = real_estate.row;

        AnalysisContext {
            geography,
            geography_display: geography.label().to_string(),
            economic_multipliers: EconomicMultipliersSection {
                category: multiplier_row.category,
                naics_code: multiplier_row.naics_code,
                industry_name: multiplier_row.industry_name,
                output_multiplier: multiplier_row.output_multiplier,
                employment_multiplier: multiplier_row.employment_multiplier,
                earnings_multiplier: multiplier_row.earnings_multiplier,
                indirect_multiplier: multiplier_row.indirect_multiplier,
                induced_multiplier: multiplier_row.induced_multiplier,
                default_applied: multipliers.was_default,
                source: self.source(Dataset::EconomicMultipliers, geography),
            },
            demographics: DemographicsSection {
                population: demographics.population,
                median_income: demographics.median_income,
                labor_force: demographics.labor_force,
                unemployment_rate: demographics.unemployment_rate,
                median_age: demographics.median_age,
                source: self.source(Dataset::Demographics, geography),
            },
            real_estate: RealEstateSection {
                property_type: real_estate_row.property_type,
                avg_rent_psf: real_estate_row.avg_rent_psf,
                occupancy_rate: real_estate_row.occupancy_rate,
                cap_rate: real_estate_row.cap_rate,
                market_rent: real_estate_row.market_rent,
                default_applied: real_estate.was_default,
                source: self.source(Dataset::RealEstate, geography),
            },
            fiscal_parameters: FiscalSection {
                applicable: fiscal.is_applicable(),
                city_millage: fiscal.city_millage,
                county_millage: fiscal.county_millage,
                combined_millage: fiscal.combined_millage,
                cra_capture_rate: fiscal.cra_capture_rate,
                hard_cost_capitalization_rate: fiscal.hard_cost_capitalization_rate,
                property_value_annual_growth: fiscal.property_value_annual_growth,
                source: self.source(Dataset::FiscalParameters, geography),
            },
            project_inputs,
        }
    }

    fn source(&self, dataset: Dataset, geography: Geography) -> String {
        self.tables
            .source_note(dataset, geography)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} regional tables", geography.label()))
    }
}
