//! Economic impact engine for community redevelopment (CRA) incentive
//! analysis: regional lookup tables, analysis context assembly, the impact
//! calculator and the narrative report boundary.

pub mod config;
pub mod context;
pub mod error;
pub mod impact;
pub mod regional;
pub mod report;
pub mod service;
pub mod telemetry;
