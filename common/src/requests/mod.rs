//! Wire payloads for the remote processing service, camelCase on the wire.
//!
//! | Operation        | Method/Path             | Types                                        |
//! |------------------|-------------------------|----------------------------------------------|
//! | Upload temp file | POST `/uploads/temp`    | multipart → [`UploadTempResponse`]           |
//! | Start merge      | POST `/merge`           | [`MergeJobRequest`] → [`StartJobResponse`]   |
//! | Start split      | POST `/split`           | [`SplitJobRequest`] → [`StartJobResponse`]   |
//! | Start compress   | POST `/compress`        | [`CompressJobRequest`] → [`StartJobResponse`]|
//! | Start protect    | POST `/protect`         | [`ProtectJobRequest`] → [`StartJobResponse`] |
//! | Start unlock     | POST `/unlock`          | [`UnlockJobRequest`] → [`StartJobResponse`]  |
//! | Check encryption | POST `/check-encryption`| [`CheckEncryptionRequest`] → [`CheckEncryptionResponse`] |
//! | Job status       | GET `/{jobId}`          | [`JobStatusResponse`]                        |

use serde::{Deserialize, Serialize};

use crate::jobs::{CompressionLevel, JobStatus};
use crate::model::split::{SplitMode, SplitOptions};

/// Response to uploading one file to temporary storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTempResponse {
    pub temp_file_id: String,
    pub original_name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeJobRequest {
    /// Temp file ids in processing order.
    pub files: Vec<String>,
}

/// A page range in wire form. The UI edits `from`/`to`; the service expects
/// `start`/`end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitJobRequest {
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<WireRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_range: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<bool>,
}

impl SplitJobRequest {
    /// Translates the UI options to wire form: `ranges` only in custom mode,
    /// `fixedRange` only in fixed mode, `merge` in both.
    pub fn from_options(files: Vec<String>, options: &SplitOptions) -> Self {
        let (ranges, fixed_range) = match options.mode {
            SplitMode::Custom => (
                Some(
                    options
                        .ranges
                        .iter()
                        .map(|r| WireRange {
                            start: r.from,
                            end: r.to,
                        })
                        .collect(),
                ),
                None,
            ),
            SplitMode::Fixed => (None, Some(options.fixed_range)),
        };
        Self {
            files,
            ranges,
            fixed_range,
            merge: Some(options.merge_output),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressJobRequest {
    pub files: Vec<String>,
    pub compression_level: CompressionLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectJobRequest {
    pub files: Vec<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockJobRequest {
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckEncryptionRequest {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEncryptionResponse {
    pub is_encrypted: bool,
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Response to any of the five start-job calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobResponse {
    pub job_id: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Download payload of a completed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_size: Option<u64>,
}

/// Status document returned by GET `/{jobId}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub result: Option<JobResult>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::split::SplitRange;

    #[test]
    fn custom_split_translates_from_to_into_start_end() {
        let mut options = SplitOptions::new();
        options.ranges.push(SplitRange {
            id: "r1".into(),
            from: 1,
            to: 4,
        });
        options.ranges.push(SplitRange {
            id: "r2".into(),
            from: 7,
            to: 9,
        });
        options.merge_output = true;

        let request = SplitJobRequest::from_options(vec!["tmp-1".into()], &options);
        assert_eq!(
            request.ranges.as_deref(),
            Some(&[WireRange { start: 1, end: 4 }, WireRange { start: 7, end: 9 }][..])
        );
        assert_eq!(request.fixed_range, None);
        assert_eq!(request.merge, Some(true));
    }

    #[test]
    fn fixed_split_sends_only_the_chunk_size() {
        let mut options = SplitOptions::new();
        options.mode = SplitMode::Fixed;
        options.fixed_range = 10;
        options.ranges.push(SplitRange {
            id: "r1".into(),
            from: 1,
            to: 25,
        });

        let request = SplitJobRequest::from_options(vec!["tmp-1".into()], &options);
        assert_eq!(request.ranges, None);
        assert_eq!(request.fixed_range, Some(10));
        assert_eq!(request.merge, Some(false));
    }

    #[test]
    fn status_document_parses_the_service_shape() {
        let body = r#"{
            "id": "job-7",
            "status": "COMPLETED",
            "createdAt": "2026-08-30T10:00:00Z",
            "type": "compress",
            "result": {"url": "https://files.example/out.pdf", "originalSize": 1000000, "compressedSize": 400000},
            "completedAt": "2026-08-30T10:00:09Z"
        }"#;
        let parsed: JobStatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, JobStatus::Completed);
        let result = parsed.result.unwrap();
        assert_eq!(result.original_size, Some(1_000_000));
        assert_eq!(result.compressed_size, Some(400_000));

        let pending: JobStatusResponse =
            serde_json::from_str(r#"{"id": "job-8", "status": "PENDING"}"#).unwrap();
        assert_eq!(pending.status, JobStatus::Pending);
        assert_eq!(pending.result, None);
    }
}
