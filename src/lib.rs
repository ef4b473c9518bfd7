//! Credence - credibility and risk scoring for academic venues
//!
//! A deterministic scoring core that fuses call-for-papers signals, venue
//! fingerprints and citation-graph behaviour into one explainable
//! [`CredibilityAssessment`](models::CredibilityAssessment).
//!
//! ```text
//! VenueSignal ─▶ fingerprint ─▶ heuristics ─▶ citation ─▶ scoring ─▶ assessment ─▶ batch
//! ```

pub mod batch;
pub mod citation;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod heuristics;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;

pub use errors::{CredenceError, CredenceResult, ErrorKind};
pub use pipeline::{Assessor, VenueInput, VenueReport};
