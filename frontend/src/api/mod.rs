//! Typed client for the remote processing service.
//!
//! Every call is independent and stateless. JSON endpoints go through
//! `gloo_net`; the temp-file upload uses a raw `XmlHttpRequest` because it is
//! the one call that needs upload-progress events, and reports through
//! callbacks so the owning component can fold the events into its message
//! loop.

use common::jobs::ToolOptions;
use common::requests::{
    CheckEncryptionRequest, CheckEncryptionResponse, CompressJobRequest, JobStatusResponse,
    MergeJobRequest, ProtectJobRequest, SplitJobRequest, StartJobResponse, UnlockJobRequest,
    UploadTempResponse,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};
use yew::Callback;

use crate::store::JobFile;

pub const API_BASE: &str = "/api";

/// Failure of one remote call. Transient by definition: the orchestrators
/// decide whether to retry, skip or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    Network(String),
    /// Non-2xx HTTP status.
    Status(u16),
    /// The response body did not match the wire contract.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status(code) => write!(f, "server responded with status {code}"),
            ApiError::Decode(msg) => write!(f, "unexpected response body: {msg}"),
        }
    }
}

/// One upload-progress event: cumulative bytes, optional total (absent when
/// the content length is unknown), and the event's timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    pub loaded: f64,
    pub total: Option<f64>,
    pub now_ms: f64,
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = Request::post(&format!("{API_BASE}{path}"))
        .json(body)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Starts the job for the given tool with the uploaded temp file ids.
pub async fn start_job(
    files: Vec<String>,
    options: &ToolOptions,
) -> Result<StartJobResponse, ApiError> {
    let path = options.job_type().wire_path();
    match options {
        ToolOptions::Merge => post_json(path, &MergeJobRequest { files }).await,
        ToolOptions::Split(split) => {
            post_json(path, &SplitJobRequest::from_options(files, split)).await
        }
        ToolOptions::Compress(level) => {
            post_json(
                path,
                &CompressJobRequest {
                    files,
                    compression_level: *level,
                },
            )
            .await
        }
        ToolOptions::Protect { password } => {
            post_json(
                path,
                &ProtectJobRequest {
                    files,
                    password: password.clone(),
                },
            )
            .await
        }
        ToolOptions::Unlock { password } => {
            post_json(
                path,
                &UnlockJobRequest {
                    files,
                    password: password.clone(),
                },
            )
            .await
        }
    }
}

pub async fn check_encryption(files: Vec<String>) -> Result<CheckEncryptionResponse, ApiError> {
    post_json("/check-encryption", &CheckEncryptionRequest { files }).await
}

pub async fn get_job_status(job_id: &str) -> Result<JobStatusResponse, ApiError> {
    let response = Request::get(&format!("{API_BASE}/{job_id}"))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<JobStatusResponse>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Uploads one staged file to temporary storage.
///
/// `on_progress` fires for every browser progress event; `on_complete` fires
/// exactly once. The caller drives sequencing: the next file's upload starts
/// only after this one's completion message is handled.
pub fn upload_temp_file(
    file: &JobFile,
    on_progress: Callback<ProgressSample>,
    on_complete: Callback<Result<UploadTempResponse, ApiError>>,
) {
    if let Err(err) = begin_upload(file, on_progress, on_complete.clone()) {
        on_complete.emit(Err(ApiError::Network(format!("{err:?}"))));
    }
}

fn begin_upload(
    file: &JobFile,
    on_progress: Callback<ProgressSample>,
    on_complete: Callback<Result<UploadTempResponse, ApiError>>,
) -> Result<(), JsValue> {
    let xhr = XmlHttpRequest::new()?;
    xhr.open_with_async("POST", &format!("{API_BASE}/uploads/temp"), true)?;

    let form = FormData::new()?;
    let blob: &web_sys::Blob = (*file.file).as_ref();
    form.append_with_blob_and_filename("file", blob, &file.name)?;

    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        let total = if event.length_computable() {
            Some(event.total())
        } else {
            None
        };
        on_progress.emit(ProgressSample {
            loaded: event.loaded(),
            total,
            now_ms: js_sys::Date::now(),
        });
    });
    xhr.upload()?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let xhr_done = xhr.clone();
    let complete = on_complete.clone();
    let onload = Closure::<dyn FnMut(ProgressEvent)>::new(move |_event: ProgressEvent| {
        complete.emit(read_upload_response(&xhr_done));
    });
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));

    let onerror = Closure::<dyn FnMut(ProgressEvent)>::new(move |_event: ProgressEvent| {
        on_complete.emit(Err(ApiError::Network("upload request failed".into())));
    });
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    // The browser owns the handlers for the lifetime of the request.
    progress.forget();
    onload.forget();
    onerror.forget();

    xhr.send_with_opt_form_data(Some(&form))
}

fn read_upload_response(xhr: &XmlHttpRequest) -> Result<UploadTempResponse, ApiError> {
    let status = xhr.status().unwrap_or(0);
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }
    let body = xhr.response_text().ok().flatten().unwrap_or_default();
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}
