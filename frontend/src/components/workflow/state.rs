//! Component state for the PDF job workflow.
//!
//! A single component owns the whole tool lifecycle: file staging, the
//! upload pass, job submission, status polling and the download screen.
//! Which screen is shown is driven by [`Route`]; the phase machine itself
//! lives in `common::jobs::WorkflowState`.

use common::jobs::{CompressionLevel, JobType, WorkflowState};
use common::model::split::SplitOptions;
use common::model::transfer::TransferStats;
use common::model::upload::{UploadBatch, UploadPolicy};
use gloo_timers::callback::Interval;
use yew::NodeRef;

use crate::history::BackGuard;
use crate::store::JobFileStore;

/// Everything the download screen needs, captured when the job completes.
#[derive(Clone, PartialEq)]
pub struct DownloadInfo {
    pub url: String,
    pub job_type: JobType,
    pub original_size: Option<u64>,
    pub compressed_size: Option<u64>,
}

/// Which screen the workflow is currently showing.
#[derive(Clone, PartialEq)]
pub enum Route {
    Home,
    Tool(JobType),
    Uploading,
    UnlockPassword,
    Processing,
    Download(DownloadInfo),
}

/// Live state of the sequential upload pass over the staged files.
pub struct UploadRun {
    /// Index of the file whose request is currently in flight.
    pub current_index: usize,
    /// Progress telemetry for the in-flight file.
    pub stats: TransferStats,
    /// Accumulated temp file ids and failures across the whole pass.
    pub batch: UploadBatch,
    /// When the first upload started; used to hold the screen visible
    /// for a minimum duration even when uploads finish instantly.
    pub first_started_ms: f64,
    /// Short status line shown under the progress bar.
    pub status_text: &'static str,
}

pub struct WorkflowComponent {
    pub route: Route,
    pub files: JobFileStore,
    pub workflow: Option<WorkflowState>,
    pub upload: Option<UploadRun>,
    pub poll: Option<Interval>,
    pub guard: Option<BackGuard>,
    /// Bumped every time the active run is torn down or a new one starts.
    /// Async completions carry the epoch they were spawned under; stale
    /// ones are discarded in `update`.
    pub epoch: u64,
    pub upload_policy: UploadPolicy,

    // Per-tool options edited in the tool workspace.
    pub split: SplitOptions,
    pub compression: CompressionLevel,
    pub protect_password: String,
    pub protect_repeat: String,
    pub unlock_password: String,

    pub processing_text: String,
    pub error: Option<String>,
    pub drag_from: Option<usize>,
    pub file_input_ref: NodeRef,
}

impl WorkflowComponent {
    pub fn new() -> Self {
        Self {
            route: Route::Home,
            files: JobFileStore::new(),
            workflow: None,
            upload: None,
            poll: None,
            guard: None,
            epoch: 0,
            upload_policy: UploadPolicy::default(),
            split: SplitOptions::new(),
            compression: CompressionLevel::default(),
            protect_password: String::new(),
            protect_repeat: String::new(),
            unlock_password: String::new(),
            processing_text: String::new(),
            error: None,
            drag_from: None,
            file_input_ref: NodeRef::default(),
        }
    }

    /// The tool the user is working with, regardless of which screen of
    /// the workflow is showing. Used when bouncing back from a guarded view.
    pub fn active_tool(&self) -> Option<JobType> {
        if let Some(workflow) = &self.workflow {
            return Some(workflow.job_type);
        }
        match &self.route {
            Route::Tool(tool) => Some(*tool),
            Route::Download(info) => Some(info.job_type),
            _ => None,
        }
    }

    /// Page count of the first staged file, once its metadata has loaded.
    pub fn total_pages(&self) -> Option<u32> {
        self.files.first_page_count()
    }

    /// Tears down any active run and returns the component to a pristine
    /// state on the given route. Pending async completions are invalidated
    /// by the epoch bump; the poll interval and history guard are dropped.
    pub fn reset(&mut self, route: Route) {
        self.epoch += 1;
        self.route = route;
        self.files.clear();
        self.workflow = None;
        self.upload = None;
        self.poll = None;
        self.guard = None;
        self.split = SplitOptions::new();
        self.compression = CompressionLevel::default();
        self.protect_password.clear();
        self.protect_repeat.clear();
        self.unlock_password.clear();
        self.processing_text.clear();
        self.error = None;
        self.drag_from = None;
    }
}
