use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of geographies the regional tables carry row sets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geography {
    HomesteadCra,
    FloridaStatewide,
}

impl Geography {
    pub const fn ordered() -> [Self; 2] {
        [Self::HomesteadCra, Self::FloridaStatewide]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::HomesteadCra => "homestead_cra",
            Self::FloridaStatewide => "florida_statewide",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HomesteadCra => "Homestead CRA District",
            Self::FloridaStatewide => "State of Florida",
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Geography {
    type Err = UnknownGeography;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "homestead_cra" | "homestead" | "local" => Ok(Self::HomesteadCra),
            "florida_statewide" | "florida" | "statewide" => Ok(Self::FloridaStatewide),
            _ => Err(UnknownGeography(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown geography '{0}'")]
pub struct UnknownGeography(pub String);

/// Data categories that carry a source attribution in the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    EconomicMultipliers,
    Demographics,
    RealEstate,
    FiscalParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryMultiplierRow {
    pub category: String,
    pub naics_code: String,
    pub industry_name: String,
    pub output_multiplier: f64,
    pub employment_multiplier: f64,
    pub earnings_multiplier: f64,
    pub indirect_multiplier: f64,
    pub induced_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstateBenchmarkRow {
    pub property_type: String,
    pub avg_rent_psf: f64,
    pub occupancy_rate: f64,
    pub cap_rate: f64,
    pub market_rent: f64,
}

/// Millage and capture parameters for a geography. All-zero rates mark a
/// geography without local jurisdiction data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalParameters {
    pub city_millage: f64,
    pub county_millage: f64,
    pub combined_millage: f64,
    pub cra_capture_rate: f64,
    pub hard_cost_capitalization_rate: f64,
    pub property_value_annual_growth: f64,
}

impl FiscalParameters {
    pub fn is_applicable(&self) -> bool {
        self.combined_millage > 0.0 || self.cra_capture_rate > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsRow {
    pub population: u64,
    pub median_income: f64,
    pub labor_force: u64,
    pub unemployment_rate: f64,
    pub median_age: f64,
}

/// Result of a category lookup; `was_default` is set when the requested key
/// missed and the table default row was substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<T> {
    pub row: T,
    pub was_default: bool,
}

impl<T> Lookup<T> {
    pub(crate) fn matched(row: T) -> Self {
        Self {
            row,
            was_default: false,
        }
    }

    pub(crate) fn defaulted(row: T) -> Self {
        Self {
            row,
            was_default: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geography_parses_slugs_and_aliases() {
        assert_eq!("homestead_cra".parse(), Ok(Geography::HomesteadCra));
        assert_eq!(" Statewide ".parse(), Ok(Geography::FloridaStatewide));
        assert_eq!("florida-statewide".parse(), Ok(Geography::FloridaStatewide));
        assert_eq!(
            "miami".parse::<Geography>(),
            Err(UnknownGeography("miami".to_string()))
        );
    }

    #[test]
    fn zero_rates_mark_fiscal_parameters_not_applicable() {
        let sentinel = FiscalParameters {
            city_millage: 0.0,
            county_millage: 0.0,
            combined_millage: 0.0,
            cra_capture_rate: 0.0,
            hard_cost_capitalization_rate: 0.0,
            property_value_annual_growth: 0.0,
        };
        assert!(!sentinel.is_applicable());
    }
}
