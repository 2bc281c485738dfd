//! Job vocabulary and the client-side workflow state machine.
//!
//! A workflow run moves through a fixed set of phases:
//! `Idle → Uploading → (CheckingEncryption → AwaitingPassword)? → Submitting
//! → Processing → Completed | Failed`. Transitions are validated by
//! [`WorkflowState::advance`]; an illegal transition (including re-entering a
//! phase that is already active) is rejected with a [`PhaseError`] instead of
//! silently proceeding, so double-started uploads or polling loops are
//! impossible by construction.

use serde::{Deserialize, Serialize};

use crate::model::split::SplitOptions;
use crate::requests::JobResult;

/// The five tools the remote service offers. Fixed for the lifetime of one
/// workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Merge,
    Split,
    Compress,
    Protect,
    Unlock,
}

impl JobType {
    /// Path of the start-job endpoint for this tool, relative to the API base.
    pub fn wire_path(self) -> &'static str {
        match self {
            JobType::Merge => "/merge",
            JobType::Split => "/split",
            JobType::Compress => "/compress",
            JobType::Protect => "/protect",
            JobType::Unlock => "/unlock",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobType::Merge => "Merge PDF",
            JobType::Split => "Split PDF",
            JobType::Compress => "Compress PDF",
            JobType::Protect => "Protect PDF",
            JobType::Unlock => "Unlock PDF",
        }
    }

    /// Merge is the only tool that needs more than one input file.
    pub fn min_files(self) -> usize {
        match self {
            JobType::Merge => 2,
            _ => 1,
        }
    }

    pub fn all() -> [JobType; 5] {
        [
            JobType::Merge,
            JobType::Split,
            JobType::Compress,
            JobType::Protect,
            JobType::Unlock,
        ]
    }
}

/// Server-side job status as reported by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Compression strength for the compress tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Extreme,
    #[default]
    Recommended,
    Less,
}

impl CompressionLevel {
    pub fn label(self) -> &'static str {
        match self {
            CompressionLevel::Extreme => "Extreme compression",
            CompressionLevel::Recommended => "Recommended compression",
            CompressionLevel::Less => "Less compression",
        }
    }
}

/// Tool-specific configuration, a closed variant keyed by the job type.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOptions {
    Merge,
    Split(SplitOptions),
    Compress(CompressionLevel),
    Protect { password: String },
    Unlock { password: Option<String> },
}

impl ToolOptions {
    pub fn job_type(&self) -> JobType {
        match self {
            ToolOptions::Merge => JobType::Merge,
            ToolOptions::Split(_) => JobType::Split,
            ToolOptions::Compress(_) => JobType::Compress,
            ToolOptions::Protect { .. } => JobType::Protect,
            ToolOptions::Unlock { .. } => JobType::Unlock,
        }
    }
}

/// Client-side phase of one workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Idle,
    Uploading,
    CheckingEncryption,
    AwaitingPassword,
    Submitting,
    Processing,
    Completed,
    Failed,
}

impl JobPhase {
    /// Whether a transition from `self` to `next` is legal.
    ///
    /// `Failed` is reachable from `Uploading` (abort-on-failure policy),
    /// `Submitting` (start-job error) and `Processing` (terminal server
    /// status). Everything else follows the forward path; re-entering the
    /// current phase is never legal.
    pub fn can_advance_to(self, next: JobPhase) -> bool {
        use JobPhase::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Uploading, CheckingEncryption)
                | (Uploading, Submitting)
                | (Uploading, Failed)
                | (CheckingEncryption, AwaitingPassword)
                | (CheckingEncryption, Submitting)
                | (AwaitingPassword, Submitting)
                | (Submitting, Processing)
                | (Submitting, Failed)
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }
}

/// Rejected phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseError {
    pub from: JobPhase,
    pub to: JobPhase,
}

impl std::fmt::Display for PhaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "illegal workflow transition {:?} -> {:?}",
            self.from, self.to
        )
    }
}

impl std::error::Error for PhaseError {}

/// Terminal outcome surfaced by the polling reducer, at most once per run.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Completed(JobResult),
    Failed,
}

/// State of one workflow run, created fresh when the user enters the upload
/// phase and discarded when they return to a tool workspace or restart after
/// a download.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub phase: JobPhase,
    /// Server-issued temp ids, one per successfully uploaded file, in upload
    /// order (which equals store order).
    pub temp_file_ids: Vec<String>,
    pub job_id: Option<String>,
    pub job_type: JobType,
    pub tool_options: ToolOptions,
    pub result: Option<JobResult>,
}

impl WorkflowState {
    pub fn new(tool_options: ToolOptions) -> Self {
        Self {
            phase: JobPhase::Idle,
            temp_file_ids: Vec::new(),
            job_id: None,
            job_type: tool_options.job_type(),
            tool_options,
            result: None,
        }
    }

    /// Performs the guarded phase transition.
    pub fn advance(&mut self, next: JobPhase) -> Result<(), PhaseError> {
        if !self.phase.can_advance_to(next) {
            return Err(PhaseError {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    pub fn push_temp_file_id(&mut self, id: String) {
        self.temp_file_ids.push(id);
    }

    /// Applies one polled status document.
    ///
    /// Non-terminal statuses keep the run in `Processing` and return `None`.
    /// The first terminal status advances the phase and returns the outcome;
    /// any status that arrives after that (a stale in-flight request, a
    /// duplicate tick) returns `None` because the run is no longer in
    /// `Processing`. A `COMPLETED` document without a result payload is
    /// treated as a failure rather than surfacing a download view with
    /// nothing to download.
    pub fn apply_status(
        &mut self,
        status: JobStatus,
        result: Option<JobResult>,
    ) -> Option<PollOutcome> {
        if self.phase != JobPhase::Processing {
            return None;
        }
        match status {
            JobStatus::Completed => match result {
                Some(result) => {
                    self.advance(JobPhase::Completed).ok()?;
                    self.result = Some(result.clone());
                    Some(PollOutcome::Completed(result))
                }
                None => {
                    self.advance(JobPhase::Failed).ok()?;
                    Some(PollOutcome::Failed)
                }
            },
            JobStatus::Failed => {
                self.advance(JobPhase::Failed).ok()?;
                Some(PollOutcome::Failed)
            }
            JobStatus::Pending | JobStatus::Processing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processing_state() -> WorkflowState {
        let mut state = WorkflowState::new(ToolOptions::Merge);
        state.advance(JobPhase::Uploading).unwrap();
        state.advance(JobPhase::Submitting).unwrap();
        state.advance(JobPhase::Processing).unwrap();
        state
    }

    #[test]
    fn forward_path_is_legal() {
        let mut state = WorkflowState::new(ToolOptions::Unlock { password: None });
        state.advance(JobPhase::Uploading).unwrap();
        state.advance(JobPhase::CheckingEncryption).unwrap();
        state.advance(JobPhase::AwaitingPassword).unwrap();
        state.advance(JobPhase::Submitting).unwrap();
        state.advance(JobPhase::Processing).unwrap();
        state.advance(JobPhase::Completed).unwrap();
    }

    #[test]
    fn re_entry_is_rejected() {
        let mut state = WorkflowState::new(ToolOptions::Merge);
        state.advance(JobPhase::Uploading).unwrap();
        let err = state.advance(JobPhase::Uploading).unwrap_err();
        assert_eq!(err.from, JobPhase::Uploading);
        assert_eq!(err.to, JobPhase::Uploading);

        let mut state = processing_state();
        assert!(state.advance(JobPhase::Processing).is_err());
        assert_eq!(state.phase, JobPhase::Processing);
    }

    #[test]
    fn skipping_phases_is_rejected() {
        let mut state = WorkflowState::new(ToolOptions::Merge);
        assert!(state.advance(JobPhase::Processing).is_err());
        assert!(state.advance(JobPhase::Completed).is_err());
        assert_eq!(state.phase, JobPhase::Idle);
    }

    #[test]
    fn poll_sequence_surfaces_exactly_one_terminal_outcome() {
        let mut state = processing_state();
        let result = JobResult {
            url: "https://files.example/out.pdf".into(),
            original_size: None,
            compressed_size: None,
        };

        assert_eq!(state.apply_status(JobStatus::Pending, None), None);
        assert_eq!(state.apply_status(JobStatus::Processing, None), None);
        let outcome = state
            .apply_status(JobStatus::Completed, Some(result.clone()))
            .expect("terminal outcome");
        assert_eq!(outcome, PollOutcome::Completed(result.clone()));
        assert_eq!(state.result.as_ref().unwrap().url, result.url);

        // A late in-flight response after completion is discarded.
        assert_eq!(state.apply_status(JobStatus::Completed, Some(result)), None);
        assert_eq!(state.apply_status(JobStatus::Failed, None), None);
    }

    #[test]
    fn failed_status_ends_the_run() {
        let mut state = processing_state();
        assert_eq!(
            state.apply_status(JobStatus::Failed, None),
            Some(PollOutcome::Failed)
        );
        assert_eq!(state.phase, JobPhase::Failed);
    }

    #[test]
    fn completed_without_result_is_a_failure() {
        let mut state = processing_state();
        assert_eq!(
            state.apply_status(JobStatus::Completed, None),
            Some(PollOutcome::Failed)
        );
    }
}
