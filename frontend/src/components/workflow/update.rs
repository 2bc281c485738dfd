//! Message handling for the workflow component.
//!
//! The upload pass is strictly sequential: one request is in flight at a
//! time and the next starts only when the previous one's completion message
//! is handled. Every async completion carries the epoch it was spawned
//! under; a mismatch means the user already left that run, so the message
//! is dropped without touching state.

use gloo_console as console;
use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use uuid::Uuid;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::jobs::{JobPhase, JobType, PollOutcome, ToolOptions};
use common::model::transfer::{TransferStats, MIN_UPLOAD_SCREEN_MS};
use common::model::upload::{BatchDecision, UploadBatch};

use crate::api;
use crate::history::BackGuard;
use crate::store;

use super::helpers::show_toast;
use super::messages::Msg;
use super::state::{DownloadInfo, Route, UploadRun, WorkflowComponent};

const POLL_INTERVAL_MS: u32 = 3_000;

pub fn update(component: &mut WorkflowComponent, ctx: &Context<WorkflowComponent>, msg: Msg) -> bool {
    match msg {
        Msg::GoHome => {
            component.reset(Route::Home);
            true
        }

        Msg::SelectTool(tool) => {
            component.reset(Route::Tool(tool));
            true
        }

        Msg::LeaveGuardedView => {
            let tool = component.active_tool().unwrap_or(JobType::Merge);
            component.reset(Route::Tool(tool));
            true
        }

        Msg::OpenFilePicker => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }

        Msg::FilesSelected(selected) => {
            if selected.is_empty() {
                return false;
            }
            for file in selected {
                let staged = store::stage(file);
                let id = staged.id.clone();
                let blob: gloo_file::Blob = (*staged.file).clone();
                component.files.push(staged);

                // Thumbnail and page count load in the background; the card
                // shows a placeholder until ThumbnailReady lands.
                let link = ctx.link().clone();
                spawn_local(async move {
                    let msg = match gloo_file::futures::read_as_bytes(&blob).await {
                        Ok(bytes) => {
                            let preview = common::pdf::preview_data_url(&bytes);
                            let pages = common::pdf::page_count(&bytes);
                            Msg::ThumbnailReady {
                                id,
                                preview: (!preview.is_empty()).then_some(preview),
                                page_count: (pages > 0).then_some(pages),
                            }
                        }
                        Err(err) => {
                            console::error!(format!("reading selected file failed: {err}"));
                            Msg::ThumbnailReady {
                                id,
                                preview: None,
                                page_count: None,
                            }
                        }
                    };
                    link.send_message(msg);
                });
            }
            true
        }

        Msg::ThumbnailReady {
            id,
            preview,
            page_count,
        } => {
            // If the file was removed (or the list cleared) in the meantime
            // the store ignores the unknown id.
            component.files.set_preview(&id, preview, page_count);
            if matches!(component.route, Route::Tool(JobType::Split))
                && component.split.ranges.is_empty()
            {
                if let Some(total) = component.total_pages() {
                    component
                        .split
                        .seed_full_range(Uuid::new_v4().to_string(), total);
                }
            }
            true
        }

        Msg::RemoveFile(id) => {
            component.files.remove(&id);
            true
        }

        Msg::DragStart(index) => {
            component.drag_from = Some(index);
            false
        }

        Msg::DropOn(index) => {
            if let Some(from) = component.drag_from.take() {
                // The list may have changed since the drag started.
                let len = component.files.len();
                if from != index && from < len && index < len {
                    component.files.reorder(from, index);
                }
                return true;
            }
            false
        }

        Msg::SetCompression(level) => {
            component.compression = level;
            true
        }

        Msg::SetSplitMode(mode) => {
            component.split.mode = mode;
            true
        }

        Msg::EditSplitRange {
            index,
            field,
            value,
        } => {
            let total = component.total_pages().unwrap_or(1);
            component.split.update_range(index, field, value, total);
            true
        }

        Msg::AddSplitRange => {
            let total = component.total_pages().unwrap_or(1);
            component
                .split
                .add_range(Uuid::new_v4().to_string(), total);
            true
        }

        Msg::RemoveSplitRange(index) => {
            component.split.remove_range(index);
            true
        }

        Msg::ReorderSplitRanges { from, to } => {
            if component.split.can_reorder() {
                component.split.reorder_ranges(from, to);
                return true;
            }
            false
        }

        Msg::SetFixedRange(pages) => {
            component.split.fixed_range = pages.max(1);
            true
        }

        Msg::ToggleMergeOutput => {
            component.split.merge_output = !component.split.merge_output;
            true
        }

        Msg::SetProtectPassword(value) => {
            component.protect_password = value;
            true
        }

        Msg::SetProtectRepeat(value) => {
            component.protect_repeat = value;
            true
        }

        Msg::SetUnlockPassword(value) => {
            component.unlock_password = value;
            true
        }

        Msg::SubmitUnlockPassword => {
            if component.unlock_password.is_empty() {
                return false;
            }
            if let Some(workflow) = component.workflow.as_mut() {
                workflow.tool_options = ToolOptions::Unlock {
                    password: Some(component.unlock_password.clone()),
                };
            }
            submit_job(component, ctx);
            true
        }

        Msg::StartUploadPhase => start_upload_phase(component, ctx),

        Msg::UploadProgress { epoch, sample } => {
            if epoch != component.epoch {
                return false;
            }
            if let Some(run) = component.upload.as_mut() {
                run.stats.record(sample.loaded, sample.total, sample.now_ms);
                return true;
            }
            false
        }

        Msg::UploadFinished {
            epoch,
            index,
            result,
        } => {
            if epoch != component.epoch {
                return false;
            }
            handle_upload_finished(component, ctx, index, result)
        }

        Msg::UploadHoldElapsed { epoch } => {
            if epoch != component.epoch {
                return false;
            }
            finish_upload_phase(component, ctx)
        }

        Msg::EncryptionChecked { epoch, result } => {
            if epoch != component.epoch {
                return false;
            }
            handle_encryption_checked(component, ctx, result)
        }

        Msg::JobStarted { epoch, result } => {
            if epoch != component.epoch {
                return false;
            }
            handle_job_started(component, ctx, result)
        }

        Msg::PollTick => {
            poll_job_status(component, ctx);
            false
        }

        Msg::JobStatusFetched { epoch, result } => {
            if epoch != component.epoch {
                return false;
            }
            handle_job_status(component, ctx, result)
        }
    }
}

/// Validates the tool workspace, builds the tool options, creates a fresh
/// workflow run and kicks off the first upload.
fn start_upload_phase(component: &mut WorkflowComponent, ctx: &Context<WorkflowComponent>) -> bool {
    let Route::Tool(tool) = &component.route else {
        return false;
    };
    let tool = *tool;
    if component.files.len() < tool.min_files() {
        return false;
    }

    let options = match tool {
        JobType::Merge => ToolOptions::Merge,
        JobType::Split => ToolOptions::Split(component.split.clone()),
        JobType::Compress => ToolOptions::Compress(component.compression),
        JobType::Protect => {
            if component.protect_password.is_empty()
                || component.protect_password != component.protect_repeat
            {
                return false;
            }
            ToolOptions::Protect {
                password: component.protect_password.clone(),
            }
        }
        // The password, if one turns out to be needed, is collected after
        // the encryption check.
        JobType::Unlock => ToolOptions::Unlock { password: None },
    };

    let mut workflow = common::jobs::WorkflowState::new(options);
    if let Err(err) = workflow.advance(JobPhase::Uploading) {
        console::error!(err.to_string());
        return false;
    }

    component.epoch += 1;
    component.workflow = Some(workflow);
    component.error = None;
    let now = js_sys::Date::now();
    component.upload = Some(UploadRun {
        current_index: 0,
        stats: TransferStats::start(now),
        batch: UploadBatch::new(component.upload_policy),
        first_started_ms: now,
        status_text: "UPLOADING",
    });
    component.route = Route::Uploading;
    start_upload(component, ctx, 0);
    true
}

/// Fires the upload request for the file at `index`.
fn start_upload(component: &mut WorkflowComponent, ctx: &Context<WorkflowComponent>, index: usize) {
    let Some(file) = component.files.get(index) else {
        return;
    };
    let epoch = component.epoch;
    if let Some(run) = component.upload.as_mut() {
        run.current_index = index;
        run.stats = TransferStats::start(js_sys::Date::now());
    }
    let link = ctx.link();
    let on_progress = link.callback(move |sample| Msg::UploadProgress { epoch, sample });
    let on_complete = link.callback(move |result| Msg::UploadFinished {
        epoch,
        index,
        result,
    });
    api::upload_temp_file(file, on_progress, on_complete);
}

fn handle_upload_finished(
    component: &mut WorkflowComponent,
    ctx: &Context<WorkflowComponent>,
    index: usize,
    result: Result<common::requests::UploadTempResponse, api::ApiError>,
) -> bool {
    let Some(run) = component.upload.as_mut() else {
        return false;
    };

    match result {
        Ok(response) => {
            if let Some(workflow) = component.workflow.as_mut() {
                workflow.push_temp_file_id(response.temp_file_id.clone());
            }
            run.batch.record_success(response.temp_file_id);
        }
        Err(err) => {
            let name = component
                .files
                .get(index)
                .map(|f| f.name.clone())
                .unwrap_or_default();
            console::error!(format!("upload of {name} failed: {err}"));
            match run.batch.record_failure(name.clone(), err.to_string()) {
                BatchDecision::Continue => {
                    show_toast(&format!("Could not upload {name}. Continuing without it."));
                }
                BatchDecision::Abort => {
                    if let Some(workflow) = component.workflow.as_mut() {
                        let _ = workflow.advance(JobPhase::Failed);
                    }
                    let tool = component.active_tool().unwrap_or(JobType::Merge);
                    component.reset(Route::Tool(tool));
                    component.error = Some(format!("Upload failed for {name}."));
                    return true;
                }
            }
        }
    }

    let next = index + 1;
    if next < component.files.len() {
        start_upload(component, ctx, next);
        return true;
    }

    // All uploads settled. Keep the telemetry on screen for a minimum
    // duration before moving on, even when everything finished instantly.
    let elapsed = js_sys::Date::now() - run.first_started_ms;
    let remaining = (MIN_UPLOAD_SCREEN_MS - elapsed).max(0.0) as u32;
    let epoch = component.epoch;
    let link = ctx.link().clone();
    spawn_local(async move {
        TimeoutFuture::new(remaining).await;
        link.send_message(Msg::UploadHoldElapsed { epoch });
    });
    true
}

/// Runs once the upload pass is over and the minimum screen time has
/// elapsed. Unlock detours through the encryption check; every other tool
/// submits straight away.
fn finish_upload_phase(component: &mut WorkflowComponent, ctx: &Context<WorkflowComponent>) -> bool {
    let Some(workflow) = component.workflow.as_mut() else {
        return false;
    };
    if workflow.temp_file_ids.is_empty() {
        let tool = workflow.job_type;
        let _ = workflow.advance(JobPhase::Failed);
        component.reset(Route::Tool(tool));
        component.error = Some("None of the selected files could be uploaded.".into());
        return true;
    }

    if component
        .upload
        .as_ref()
        .is_some_and(|run| run.batch.has_failures())
    {
        show_toast("Some files could not be uploaded and were skipped.");
    }

    if workflow.job_type == JobType::Unlock {
        if let Err(err) = workflow.advance(JobPhase::CheckingEncryption) {
            console::error!(err.to_string());
            return false;
        }
        if let Some(run) = component.upload.as_mut() {
            run.status_text = "CHECKING DOCUMENT";
        }
        let files = workflow.temp_file_ids.clone();
        let epoch = component.epoch;
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::check_encryption(files).await;
            link.send_message(Msg::EncryptionChecked { epoch, result });
        });
        return true;
    }

    submit_job(component, ctx);
    true
}

fn handle_encryption_checked(
    component: &mut WorkflowComponent,
    ctx: &Context<WorkflowComponent>,
    result: Result<common::requests::CheckEncryptionResponse, api::ApiError>,
) -> bool {
    let encrypted = match result {
        Ok(response) => response.is_encrypted,
        Err(err) => {
            // The server rechecks during the actual unlock, so treat the
            // document as unencrypted and let the job decide.
            console::error!(format!("encryption check failed: {err}"));
            false
        }
    };

    if encrypted {
        let Some(workflow) = component.workflow.as_mut() else {
            return false;
        };
        if let Err(err) = workflow.advance(JobPhase::AwaitingPassword) {
            console::error!(err.to_string());
            return false;
        }
        component.route = Route::UnlockPassword;
        return true;
    }

    submit_job(component, ctx);
    true
}

/// Advances into `Submitting`, shows the processing screen with its
/// navigation trap armed, and fires the start-job request.
fn submit_job(component: &mut WorkflowComponent, ctx: &Context<WorkflowComponent>) {
    let Some(workflow) = component.workflow.as_mut() else {
        return;
    };
    if let Err(err) = workflow.advance(JobPhase::Submitting) {
        console::error!(err.to_string());
        return;
    }

    component.processing_text = match workflow.job_type {
        JobType::Merge => "Merging your PDFs...",
        JobType::Split => "Splitting your PDF...",
        JobType::Compress => "Compressing your PDF...",
        JobType::Protect => "Protecting your PDF...",
        JobType::Unlock => "Unlocking your PDF...",
    }
    .to_string();
    component.route = Route::Processing;
    component.upload = None;
    component.guard = BackGuard::arm(true, ctx.link().callback(|_| Msg::LeaveGuardedView));

    let files = workflow.temp_file_ids.clone();
    let options = workflow.tool_options.clone();
    let epoch = component.epoch;
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = api::start_job(files, &options).await;
        link.send_message(Msg::JobStarted { epoch, result });
    });
}

fn handle_job_started(
    component: &mut WorkflowComponent,
    ctx: &Context<WorkflowComponent>,
    result: Result<common::requests::StartJobResponse, api::ApiError>,
) -> bool {
    let Some(workflow) = component.workflow.as_mut() else {
        return false;
    };
    match result {
        Ok(response) => {
            workflow.job_id = Some(response.job_id);
            if let Err(err) = workflow.advance(JobPhase::Processing) {
                console::error!(err.to_string());
                return false;
            }
            let link = ctx.link().clone();
            component.poll = Some(Interval::new(POLL_INTERVAL_MS, move || {
                link.send_message(Msg::PollTick);
            }));
            true
        }
        Err(err) => {
            console::error!(format!("starting job failed: {err}"));
            let _ = workflow.advance(JobPhase::Failed);
            component.processing_text = "The job could not be started. Please try again.".into();
            true
        }
    }
}

/// One poll tick: fetch the status document if a run is still processing.
/// Overlap is harmless since the reducer surfaces at most one terminal
/// outcome, but a tick without a run in flight does nothing.
fn poll_job_status(component: &WorkflowComponent, ctx: &Context<WorkflowComponent>) {
    let Some(workflow) = component.workflow.as_ref() else {
        return;
    };
    if workflow.phase != JobPhase::Processing {
        return;
    }
    let Some(job_id) = workflow.job_id.clone() else {
        return;
    };
    let epoch = component.epoch;
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = api::get_job_status(&job_id).await;
        link.send_message(Msg::JobStatusFetched { epoch, result });
    });
}

fn handle_job_status(
    component: &mut WorkflowComponent,
    ctx: &Context<WorkflowComponent>,
    result: Result<common::requests::JobStatusResponse, api::ApiError>,
) -> bool {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            // Transient poll errors are logged and the interval keeps going.
            console::error!(format!("polling job status failed: {err}"));
            return false;
        }
    };
    let Some(workflow) = component.workflow.as_mut() else {
        return false;
    };

    match workflow.apply_status(response.status, response.result) {
        Some(PollOutcome::Completed(result)) => {
            component.poll = None;
            let info = DownloadInfo {
                url: result.url,
                job_type: workflow.job_type,
                original_size: result.original_size,
                compressed_size: result.compressed_size,
            };
            component.route = Route::Download(info);
            component.guard = BackGuard::arm(false, ctx.link().callback(|_| Msg::LeaveGuardedView));
            true
        }
        Some(PollOutcome::Failed) => {
            component.poll = None;
            component.processing_text =
                "The job failed. Please go back and try again.".into();
            true
        }
        None => false,
    }
}
