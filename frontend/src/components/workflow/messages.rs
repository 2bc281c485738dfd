//! Messages handled by the workflow component.

use common::jobs::CompressionLevel;
use common::jobs::JobType;
use common::model::split::{RangeField, SplitMode};
use common::requests::{
    CheckEncryptionResponse, JobStatusResponse, StartJobResponse, UploadTempResponse,
};

use crate::api::{ApiError, ProgressSample};

pub enum Msg {
    // Navigation.
    GoHome,
    SelectTool(JobType),
    LeaveGuardedView,

    // File staging.
    OpenFilePicker,
    FilesSelected(Vec<gloo_file::File>),
    ThumbnailReady {
        id: String,
        preview: Option<String>,
        page_count: Option<u32>,
    },
    RemoveFile(String),
    DragStart(usize),
    DropOn(usize),

    // Tool options.
    SetCompression(CompressionLevel),
    SetSplitMode(SplitMode),
    EditSplitRange {
        index: usize,
        field: RangeField,
        value: u32,
    },
    AddSplitRange,
    RemoveSplitRange(usize),
    ReorderSplitRanges {
        from: usize,
        to: usize,
    },
    SetFixedRange(u32),
    ToggleMergeOutput,
    SetProtectPassword(String),
    SetProtectRepeat(String),
    SetUnlockPassword(String),
    SubmitUnlockPassword,

    // Upload orchestration. Async variants carry the epoch they were
    // spawned under so completions for an abandoned run are dropped.
    StartUploadPhase,
    UploadProgress {
        epoch: u64,
        sample: ProgressSample,
    },
    UploadFinished {
        epoch: u64,
        index: usize,
        result: Result<UploadTempResponse, ApiError>,
    },
    UploadHoldElapsed {
        epoch: u64,
    },
    EncryptionChecked {
        epoch: u64,
        result: Result<CheckEncryptionResponse, ApiError>,
    },

    // Job submission and polling.
    JobStarted {
        epoch: u64,
        result: Result<StartJobResponse, ApiError>,
    },
    PollTick,
    JobStatusFetched {
        epoch: u64,
        result: Result<JobStatusResponse, ApiError>,
    },
}
