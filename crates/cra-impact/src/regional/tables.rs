use super::domain::{
    Dataset, DemographicsRow, FiscalParameters, Geography, IndustryMultiplierRow, Lookup,
    RealEstateBenchmarkRow,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use tracing::{debug, warn};

pub const TABLE_VERSION: &str = "2025.1";
pub const DEFAULT_INDUSTRY: &str = "restaurant";
pub const DEFAULT_PROPERTY_TYPE: &str = "retail";

const MULTIPLIERS_CSV: &str = include_str!("../../data/multipliers.csv");
const REAL_ESTATE_CSV: &str = include_str!("../../data/real_estate.csv");
const DEMOGRAPHICS_CSV: &str = include_str!("../../data/demographics.csv");
const FISCAL_CSV: &str = include_str!("../../data/fiscal.csv");
const SOURCES_CSV: &str = include_str!("../../data/sources.csv");

/// Raw CSV inputs for building a table set.
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    pub version: &'a str,
    pub multipliers: &'a str,
    pub real_estate: &'a str,
    pub demographics: &'a str,
    pub fiscal: &'a str,
    pub sources: &'a str,
}

impl TableSources<'static> {
    pub const fn embedded() -> Self {
        Self {
            version: TABLE_VERSION,
            multipliers: MULTIPLIERS_CSV,
            real_estate: REAL_ESTATE_CSV,
            demographics: DEMOGRAPHICS_CSV,
            fiscal: FISCAL_CSV,
            sources: SOURCES_CSV,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("malformed {table} table: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("{table} table has no rows for {geography}")]
    MissingGeography {
        table: &'static str,
        geography: Geography,
    },
    #[error("{table} table for {geography} is missing default row '{key}'")]
    MissingDefault {
        table: &'static str,
        geography: Geography,
        key: &'static str,
    },
    #[error("{table} table lists {geography} more than once")]
    DuplicateGeography {
        table: &'static str,
        geography: Geography,
    },
}

#[derive(Debug, Deserialize)]
struct MultiplierRecord {
    geography: Geography,
    category: String,
    naics_code: String,
    industry_name: String,
    output_multiplier: f64,
    employment_multiplier: f64,
    earnings_multiplier: f64,
    indirect_multiplier: f64,
    induced_multiplier: f64,
}

#[derive(Debug, Deserialize)]
struct RealEstateRecord {
    geography: Geography,
    property_type: String,
    avg_rent_psf: f64,
    occupancy_rate: f64,
    cap_rate: f64,
    market_rent: f64,
}

#[derive(Debug, Deserialize)]
struct DemographicsRecord {
    geography: Geography,
    population: u64,
    median_income: f64,
    labor_force: u64,
    unemployment_rate: f64,
    median_age: f64,
}

#[derive(Debug, Deserialize)]
struct FiscalRecord {
    geography: Geography,
    city_millage: f64,
    county_millage: f64,
    combined_millage: f64,
    cra_capture_rate: f64,
    hard_cost_capitalization_rate: f64,
    property_value_annual_growth: f64,
}

#[derive(Debug, Deserialize)]
struct SourceRecord {
    geography: Geography,
    dataset: Dataset,
    note: String,
}

#[derive(Debug, Clone)]
struct RegionTables {
    multipliers: Vec<IndustryMultiplierRow>,
    default_multiplier: usize,
    real_estate: Vec<RealEstateBenchmarkRow>,
    default_real_estate: usize,
    demographics: DemographicsRow,
    fiscal: FiscalParameters,
    sources: HashMap<Dataset, String>,
}

/// Read-only regional lookup tables. Built once and shared behind an `Arc`;
/// every geography in [`Geography::ordered`] is guaranteed to be present.
#[derive(Debug, Clone)]
pub struct RegionalTables {
    version: String,
    regions: BTreeMap<Geography, RegionTables>,
}

impl RegionalTables {
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_sources(TableSources::embedded())
    }

    pub fn from_sources(sources: TableSources<'_>) -> Result<Self, TableError> {
        let multipliers: Vec<MultiplierRecord> =
            read_records("multipliers", sources.multipliers.as_bytes())?;
        let real_estate: Vec<RealEstateRecord> =
            read_records("real_estate", sources.real_estate.as_bytes())?;
        let demographics: Vec<DemographicsRecord> =
            read_records("demographics", sources.demographics.as_bytes())?;
        let fiscal: Vec<FiscalRecord> = read_records("fiscal", sources.fiscal.as_bytes())?;
        let notes: Vec<SourceRecord> = read_records("sources", sources.sources.as_bytes())?;

        let mut regions = BTreeMap::new();
        for geography in Geography::ordered() {
            let region_multipliers: Vec<IndustryMultiplierRow> = multipliers
                .iter()
                .filter(|record| record.geography == geography)
                .map(|record| IndustryMultiplierRow {
                    category: record.category.trim().to_lowercase(),
                    naics_code: record.naics_code.clone(),
                    industry_name: record.industry_name.clone(),
                    output_multiplier: record.output_multiplier,
                    employment_multiplier: record.employment_multiplier,
                    earnings_multiplier: record.earnings_multiplier,
                    indirect_multiplier: record.indirect_multiplier,
                    induced_multiplier: record.induced_multiplier,
                })
                .collect();
            let default_multiplier = region_multipliers
                .iter()
                .position(|row| row.category == DEFAULT_INDUSTRY)
                .ok_or(TableError::MissingDefault {
                    table: "multipliers",
                    geography,
                    key: DEFAULT_INDUSTRY,
                })?;

            let region_real_estate: Vec<RealEstateBenchmarkRow> = real_estate
                .iter()
                .filter(|record| record.geography == geography)
                .map(|record| RealEstateBenchmarkRow {
                    property_type: record.property_type.trim().to_lowercase(),
                    avg_rent_psf: record.avg_rent_psf,
                    occupancy_rate: record.occupancy_rate,
                    cap_rate: record.cap_rate,
                    market_rent: record.market_rent,
                })
                .collect();
            let default_real_estate = region_real_estate
                .iter()
                .position(|row| row.property_type == DEFAULT_PROPERTY_TYPE)
                .ok_or(TableError::MissingDefault {
                    table: "real_estate",
                    geography,
                    key: DEFAULT_PROPERTY_TYPE,
                })?;

            let region_demographics =
                single_row("demographics", geography, &demographics, |r| r.geography)?;
            let region_fiscal = single_row("fiscal", geography, &fiscal, |r| r.geography)?;

            let region_sources = notes
                .iter()
                .filter(|record| record.geography == geography)
                .map(|record| (record.dataset, record.note.clone()))
                .collect();

            debug!(
                geography = geography.slug(),
                multipliers = region_multipliers.len(),
                real_estate = region_real_estate.len(),
                "regional tables loaded"
            );

            regions.insert(
                geography,
                RegionTables {
                    multipliers: region_multipliers,
                    default_multiplier,
                    real_estate: region_real_estate,
                    default_real_estate,
                    demographics: DemographicsRow {
                        population: region_demographics.population,
                        median_income: region_demographics.median_income,
                        labor_force: region_demographics.labor_force,
                        unemployment_rate: region_demographics.unemployment_rate,
                        median_age: region_demographics.median_age,
                    },
                    fiscal: FiscalParameters {
                        city_millage: region_fiscal.city_millage,
                        county_millage: region_fiscal.county_millage,
                        combined_millage: region_fiscal.combined_millage,
                        cra_capture_rate: region_fiscal.cra_capture_rate,
                        hard_cost_capitalization_rate: region_fiscal
                            .hard_cost_capitalization_rate,
                        property_value_annual_growth: region_fiscal.property_value_annual_growth,
                    },
                    sources: region_sources,
                },
            );
        }

        Ok(Self {
            version: sources.version.to_string(),
            regions,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exact key, then substring containment in either direction in table
    /// order, then the restaurant default.
    pub fn lookup_multiplier(
        &self,
        category: &str,
        geography: Geography,
    ) -> Lookup<IndustryMultiplierRow> {
        let region = &self.regions[&geography];
        let industry = category.trim().to_lowercase();

        if let Some(row) = region.multipliers.iter().find(|row| row.category == industry) {
            return Lookup::matched(row.clone());
        }

        if !industry.is_empty() {
            if let Some(row) = region.multipliers.iter().find(|row| {
                industry.contains(row.category.as_str()) || row.category.contains(industry.as_str())
            }) {
                return Lookup::matched(row.clone());
            }
        }

        warn!(
            industry = category,
            geography = geography.slug(),
            "industry not found, defaulting to {DEFAULT_INDUSTRY}"
        );
        Lookup::defaulted(region.multipliers[region.default_multiplier].clone())
    }

    /// Exact match only; misses fall back to the retail row.
    pub fn lookup_real_estate(
        &self,
        property_type: &str,
        geography: Geography,
    ) -> Lookup<RealEstateBenchmarkRow> {
        let region = &self.regions[&geography];
        let key = property_type.trim().to_lowercase();

        match region.real_estate.iter().find(|row| row.property_type == key) {
            Some(row) => Lookup::matched(row.clone()),
            None => Lookup::defaulted(region.real_estate[region.default_real_estate].clone()),
        }
    }

    pub fn lookup_fiscal_parameters(&self, geography: Geography) -> FiscalParameters {
        self.regions[&geography].fiscal.clone()
    }

    pub fn lookup_demographics(&self, geography: Geography) -> DemographicsRow {
        self.regions[&geography].demographics.clone()
    }

    pub fn source_note(&self, dataset: Dataset, geography: Geography) -> Option<&str> {
        self.regions[&geography]
            .sources
            .get(&dataset)
            .map(String::as_str)
    }

    pub fn industry_categories(&self, geography: Geography) -> Vec<&str> {
        self.regions[&geography]
            .multipliers
            .iter()
            .map(|row| row.category.as_str())
            .collect()
    }
}

fn read_records<T, R>(table: &'static str, reader: R) -> Result<Vec<T>, TableError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| TableError::Malformed { table, source })
}

fn single_row<'a, T>(
    table: &'static str,
    geography: Geography,
    records: &'a [T],
    geography_of: impl Fn(&T) -> Geography,
) -> Result<&'a T, TableError> {
    let mut matching = records
        .iter()
        .filter(|record| geography_of(*record) == geography);
    let first = matching
        .next()
        .ok_or(TableError::MissingGeography { table, geography })?;
    if matching.next().is_some() {
        return Err(TableError::DuplicateGeography { table, geography });
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> RegionalTables {
        RegionalTables::embedded().expect("embedded tables parse")
    }

    #[test]
    fn embedded_tables_cover_every_geography() {
        let tables = tables();
        assert_eq!(tables.version(), TABLE_VERSION);
        for geography in Geography::ordered() {
            assert_eq!(
                tables.industry_categories(geography),
                vec!["cafe", "restaurant", "retail", "office", "bar", "brewery", "distillery"]
            );
            assert!(tables
                .source_note(Dataset::EconomicMultipliers, geography)
                .is_some());
        }
    }

    #[test]
    fn statewide_sources_are_labelled_illustrative() {
        let tables = tables();
        for dataset in [
            Dataset::EconomicMultipliers,
            Dataset::Demographics,
            Dataset::RealEstate,
        ] {
            let note = tables
                .source_note(dataset, Geography::FloridaStatewide)
                .expect("statewide note present");
            assert!(note.starts_with("Illustrative"), "{note}");
            assert!(!note.contains("Lightcast"));

            let local = tables
                .source_note(dataset, Geography::HomesteadCra)
                .expect("local note present");
            assert!(!local.contains("Illustrative"));
        }
    }

    #[test]
    fn blank_category_resolves_to_default_instead_of_first_row() {
        let lookup = tables().lookup_multiplier("   ", Geography::HomesteadCra);
        assert!(lookup.was_default);
        assert_eq!(lookup.row.category, "restaurant");
    }

    #[test]
    fn missing_default_row_is_rejected() {
        let mut sources = TableSources::embedded();
        sources.multipliers = "geography,category,naics_code,industry_name,output_multiplier,employment_multiplier,earnings_multiplier,indirect_multiplier,induced_multiplier\n\
homestead_cra,cafe,722515,Snack Bars,1.5,1.3,1.4,0.3,0.2\n";

        let err = RegionalTables::from_sources(sources).expect_err("restaurant row required");
        assert!(matches!(
            err,
            TableError::MissingDefault {
                table: "multipliers",
                geography: Geography::HomesteadCra,
                ..
            }
        ));
    }

    #[test]
    fn unknown_geography_in_csv_is_malformed() {
        let mut sources = TableSources::embedded();
        sources.fiscal = "geography,city_millage,county_millage,combined_millage,cra_capture_rate,hard_cost_capitalization_rate,property_value_annual_growth\n\
atlantis,1,1,2,0.5,0.5,0.01\n";

        let err = RegionalTables::from_sources(sources).expect_err("unknown geography rejected");
        assert!(matches!(err, TableError::Malformed { table: "fiscal", .. }));
    }
}
