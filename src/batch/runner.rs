//! Parallel batch assessment
//!
//! Venues are independent, so the batch fans out over a rayon pool with no
//! locking. Results come back in input order and one venue's failure never
//! aborts the others.

use crate::errors::CredenceResult;
use crate::fingerprint::OrganizerRegistry;
use crate::models::CredibilityAssessment;
use crate::pipeline::{Assessor, VenueInput, VenueReport};
use anyhow::Result;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Outcome for one input venue
#[derive(Debug)]
pub struct BatchEntry {
    /// Position in the input
    pub index: usize,
    pub venue_id: String,
    pub result: CredenceResult<VenueReport>,
}

/// All entries of one batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &VenueReport> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    /// Successful assessments, in input order
    pub fn assessments(&self) -> Vec<CredibilityAssessment> {
        self.succeeded().map(|r| r.assessment.clone()).collect()
    }
}

/// Runs an [`Assessor`] over many venues
pub struct BatchRunner {
    assessor: Assessor,
    workers: usize,
}

impl BatchRunner {
    /// Create a runner
    ///
    /// # Arguments
    /// * `workers` - Number of worker threads (0 = auto-detect)
    pub fn new(assessor: Assessor, workers: usize) -> Self {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .min(16)
        } else {
            workers
        };
        Self { assessor, workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Refresh the organizer reference set between batches
    pub fn set_registry(&mut self, registry: Arc<OrganizerRegistry>) {
        self.assessor.set_registry(registry);
    }

    /// Assess every venue in parallel.
    ///
    /// Fails only if the thread pool cannot be created; per-venue errors are
    /// reported in the returned entries.
    pub fn run(&self, inputs: &[VenueInput]) -> Result<BatchReport> {
        let start = Instant::now();
        info!(
            "Assessing {} venues with {} workers",
            inputs.len(),
            self.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let entries: Vec<BatchEntry> = pool.install(|| {
            inputs
                .par_iter()
                .enumerate()
                .map(|(index, input)| BatchEntry {
                    index,
                    venue_id: input.signal.venue_id.clone(),
                    result: self.assessor.assess_venue(input),
                })
                .collect()
        });

        for entry in &entries {
            if let Err(e) = &entry.result {
                warn!(
                    "Venue #{} ({}) failed [{}]: {}",
                    entry.index,
                    entry.venue_id,
                    e.kind(),
                    e
                );
            }
        }

        let report = BatchReport { entries };
        info!(
            "Batch complete: {} assessed, {} failed in {:?}",
            report.succeeded().count(),
            report.failed().count(),
            start.elapsed()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredenceConfig;
    use crate::errors::ErrorKind;
    use crate::models::{CfpSignals, VenueSignal};

    fn venue(id: &str, score: f64) -> VenueInput {
        VenueInput::new(VenueSignal::new(id, id).with_cfp(CfpSignals {
            syntax_score: score,
            professionalism_score: score,
            language_quality: score,
            ..Default::default()
        }))
    }

    fn runner(workers: usize) -> BatchRunner {
        BatchRunner::new(Assessor::new(&CredenceConfig::default()).unwrap(), workers)
    }

    #[test]
    fn test_results_keep_input_order() {
        let inputs: Vec<VenueInput> = (0..20).map(|i| venue(&format!("v{i:02}"), 0.5)).collect();
        let report = runner(4).run(&inputs).unwrap();
        assert_eq!(report.len(), 20);
        for (i, entry) in report.entries.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(entry.venue_id, format!("v{i:02}"));
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let inputs = vec![
            venue("good-1", 0.9),
            VenueInput::new(VenueSignal::new("empty", "No data")),
            venue("good-2", 0.4),
        ];
        let report = runner(2).run(&inputs).unwrap();
        assert_eq!(report.succeeded().count(), 2);
        assert!(report.has_failures());
        let failed: Vec<&BatchEntry> = report.failed().collect();
        assert_eq!(failed[0].venue_id, "empty");
        assert_eq!(
            failed[0].result.as_ref().unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs: Vec<VenueInput> = (0..8)
            .map(|i| venue(&format!("v{i}"), i as f64 / 8.0))
            .collect();
        let parallel = runner(4).run(&inputs).unwrap().assessments();
        let sequential = runner(1).run(&inputs).unwrap().assessments();
        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.venue_id, b.venue_id);
            assert_eq!(a.fingerprint_hash, b.fingerprint_hash);
            assert_eq!(a.overall_credibility, b.overall_credibility);
        }
    }

    #[test]
    fn test_zero_workers_auto_detects() {
        assert!(runner(0).workers() >= 1);
    }

    #[test]
    fn test_registry_refresh_between_batches() {
        let mut input = venue("v", 0.5);
        input.signal.organizers = vec!["Dr. Known".to_string()];
        let inputs = vec![input];

        let mut runner = runner(1);
        let before = runner.run(&inputs).unwrap();
        runner.set_registry(Arc::new(OrganizerRegistry::new(["Dr. Known"])));
        let after = runner.run(&inputs).unwrap();

        let recurrence = |r: &BatchReport| {
            r.succeeded().next().map(|v| v.fingerprint.organizer_recurrence)
        };
        assert_eq!(recurrence(&before), Some(0.5));
        assert_eq!(recurrence(&after), Some(1.0));
    }
}
