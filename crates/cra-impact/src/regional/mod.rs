//! Versioned regional lookup tables: industry multipliers, real-estate
//! benchmarks, demographics and fiscal parameters per geography.

mod domain;
mod tables;

pub use domain::{
    Dataset, DemographicsRow, FiscalParameters, Geography, IndustryMultiplierRow, Lookup,
    RealEstateBenchmarkRow, UnknownGeography,
};
pub use tables::{
    RegionalTables, TableError, TableSources, DEFAULT_INDUSTRY, DEFAULT_PROPERTY_TYPE,
    TABLE_VERSION,
};
