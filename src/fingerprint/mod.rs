//! Venue fingerprinting
//!
//! Derives a stable, digest-based identity for a venue plus structural
//! characteristics (completeness, organizer recurrence, indexer tiers).

mod builder;
mod indexers;
mod registry;

pub use builder::{
    derive_venue_id, fingerprint_hash, syntax_signature, FingerprintBuilder, VenueFingerprint,
};
pub use indexers::{normalize_indexer, IndexerTier, KnownIndexers};
pub use registry::OrganizerRegistry;
