//! oapath Core - Open-access pathway classification
//!
//! This crate implements the enrichment pipeline that takes a bare DOI and
//! progressively attaches open-access status and a republication-pathway
//! classification. External bibliographic services are abstracted behind
//! provider traits so the pipeline is testable without network access.

pub mod cache;
pub mod config;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pathway;
pub mod policy;
pub mod provider;
pub mod schema;
pub mod status;

// Re-exports for convenience
pub use cache::PathwayCache;
pub use config::Settings;
pub use enrich::EnrichContext;
pub use error::CoreError;
pub use logging::init_logging;
pub use metrics::{Metrics, aggregate};
pub use pathway::resolve_pathway;
pub use policy::{has_no_cost_oa_policy, retain_no_cost_permitted_oa};
pub use provider::{OaEvidence, OaEvidenceProvider, PolicyProvider, PrimaryRecord, StatusProvider};
pub use schema::{Author, OaPathway, OaStatus, Paper, PermittedOa, PublisherPolicy};
pub use status::validate_oa_status;
