//! Batch assessment and venue comparison

mod compare;
mod runner;

pub use compare::{compare, RankedVenue, VenueComparison};
pub use runner::{BatchEntry, BatchReport, BatchRunner};
