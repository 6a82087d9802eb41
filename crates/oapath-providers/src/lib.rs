//! Thin HTTP clients for the external bibliographic services
//!
//! Each module is a fetch-and-parse wrapper implementing one of the
//! provider traits from `oapath-core`. Fetching is deliberately thin;
//! parsing is pure and unit-tested on canned responses.

pub mod author;
pub mod client;
pub mod crossref;
pub mod oabutton;
pub mod orcid;
pub mod semantic_scholar;
pub mod sherpa;
pub mod unpaywall;
pub mod zenodo;

pub use author::find_author_with_papers;
pub use crossref::Crossref;
pub use oabutton::OpenAccessButton;
pub use orcid::Orcid;
pub use semantic_scholar::SemanticScholar;
pub use sherpa::Sherpa;
pub use unpaywall::Unpaywall;
pub use zenodo::Zenodo;
