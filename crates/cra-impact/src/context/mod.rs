//! Resolves a project record and geography into the analysis context that
//! feeds the impact calculator and the report generator.

mod builder;
mod input;
mod property;

pub use builder::{
    AnalysisContext, ContextBuilder, DemographicsSection, EconomicMultipliersSection,
    FiscalSection, RealEstateSection,
};
pub use input::{CommunityBenefits, InputError, ProjectInput, Tenure, DEFAULT_PROPOSED_USE};
pub use property::resolve_property_type;

pub(crate) use input::ensure_non_negative;
