//! Accumulation of one upload batch's results under an explicit failure
//! policy.
//!
//! A single file's upload failing used to shrink the temp-id batch silently,
//! which could run a merge or split on fewer files than the user selected.
//! The policy makes that choice explicit: `BestEffort` keeps the original
//! skip-and-continue behavior but records and surfaces every failure;
//! `AbortOnFailure` stops the workflow at the first one.

/// What to do when a single file's upload fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPolicy {
    /// Log the failure, keep it on record, continue with the next file.
    #[default]
    BestEffort,
    /// Fail the whole workflow on the first failed file.
    AbortOnFailure,
}

/// One failed upload, kept for surfacing to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub file_name: String,
    pub reason: String,
}

/// Whether the sequential upload loop carries on after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchDecision {
    Continue,
    Abort,
}

/// Ordered accumulation of server temp ids plus the failure record.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBatch {
    policy: UploadPolicy,
    temp_file_ids: Vec<String>,
    failures: Vec<UploadFailure>,
}

impl UploadBatch {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            temp_file_ids: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self, temp_file_id: String) {
        self.temp_file_ids.push(temp_file_id);
    }

    pub fn record_failure(&mut self, file_name: String, reason: String) -> BatchDecision {
        self.failures.push(UploadFailure { file_name, reason });
        match self.policy {
            UploadPolicy::BestEffort => BatchDecision::Continue,
            UploadPolicy::AbortOnFailure => BatchDecision::Abort,
        }
    }

    pub fn temp_file_ids(&self) -> &[String] {
        &self.temp_file_ids
    }

    pub fn failures(&self) -> &[UploadFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_effort_skips_the_failed_file_and_keeps_order() {
        let mut batch = UploadBatch::new(UploadPolicy::BestEffort);
        batch.record_success("tmp-1".into());
        let decision = batch.record_failure("two.pdf".into(), "network error".into());
        assert_eq!(decision, BatchDecision::Continue);
        batch.record_success("tmp-3".into());

        assert_eq!(batch.temp_file_ids(), ["tmp-1", "tmp-3"]);
        assert!(batch.has_failures());
        assert_eq!(batch.failures()[0].file_name, "two.pdf");
    }

    #[test]
    fn abort_on_failure_stops_at_the_first_failed_file() {
        let mut batch = UploadBatch::new(UploadPolicy::AbortOnFailure);
        batch.record_success("tmp-1".into());
        let decision = batch.record_failure("two.pdf".into(), "network error".into());
        assert_eq!(decision, BatchDecision::Abort);
        assert_eq!(batch.temp_file_ids(), ["tmp-1"]);
    }
}
