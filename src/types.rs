// Typed request and response shapes for the SpeakWrite API.
//
// Requests are plain structs the facade turns into ordered form fields;
// they are never serialized with serde. Responses come back as JSON and
// deserialize with camel-case field names; the service has historically
// emitted Pascal-case too, so every field carries an alias for it.

use serde::Deserialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Application ID identifying this client library to the service. Used
/// when a request does not override it.
pub const DEFAULT_APPLICATION_ID: Uuid = uuid::uuid!("4ab34c28-5306-4e47-ba35-827e81e478f8");

/// Account identification shared by every request: the application ID,
/// the caller's account number and their PIN.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Identifies the requesting application. A default is provided.
    pub application_id: Uuid,
    /// Your SpeakWrite account number.
    pub account_number: String,
    /// Your SpeakWrite PIN / password.
    pub pin: String,
}

impl Credentials {
    pub fn new(account_number: impl Into<String>, pin: impl Into<String>) -> Self {
        Credentials {
            application_id: DEFAULT_APPLICATION_ID,
            account_number: account_number.into(),
            pin: pin.into(),
        }
    }
}

/// Request to submit a new transcription job.
#[derive(Debug, Clone)]
pub struct JobUploadRequest {
    pub credentials: Credentials,
    /// Path to the source audio file. Must exist and be readable when the
    /// request is submitted.
    pub audio_file: PathBuf,
    /// Optional caller-chosen name the service keeps alongside its own
    /// generated file name, so jobs can be correlated with an external
    /// tracking system.
    pub custom_file_name: Option<String>,
    /// Whether the recording is a conversation between multiple speakers.
    pub is_group_conversation: bool,
}

impl JobUploadRequest {
    pub fn new(credentials: Credentials, audio_file: impl Into<PathBuf>) -> Self {
        JobUploadRequest {
            credentials,
            audio_file: audio_file.into(),
            custom_file_name: None,
            is_group_conversation: false,
        }
    }
}

/// Which artifact of a completed job to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadKind {
    /// The completed, typed document.
    #[default]
    Document,
    /// The submitted source audio.
    SourceAudio,
}

impl DownloadKind {
    /// Value sent in the `filetype` form field.
    pub fn wire_value(self) -> &'static str {
        match self {
            DownloadKind::Document => "document",
            DownloadKind::SourceAudio => "audio-source",
        }
    }
}

/// Request to download a completed job.
///
/// Exactly one of `file_name` (the service-assigned name) or
/// `custom_file_name` (the caller-chosen name given at upload) must be
/// set; the request is rejected before any network I/O otherwise.
#[derive(Debug, Clone)]
pub struct JobDownloadRequest {
    pub credentials: Credentials,
    /// The unique, service-assigned file name of the job.
    pub file_name: Option<String>,
    /// The caller-chosen name supplied at upload time.
    pub custom_file_name: Option<String>,
    pub kind: DownloadKind,
    /// Local path the downloaded content is written to. Overwritten if it
    /// already exists.
    pub destination: PathBuf,
}

impl JobDownloadRequest {
    pub fn new(credentials: Credentials, destination: impl Into<PathBuf>) -> Self {
        JobDownloadRequest {
            credentials,
            file_name: None,
            custom_file_name: None,
            kind: DownloadKind::Document,
            destination: destination.into(),
        }
    }
}

/// Request to list jobs that have finished transcription.
#[derive(Debug, Clone)]
pub struct CompletedJobsRequest {
    pub credentials: Credentials,
    /// Optional age filter, sent verbatim as the `maxage` field. The
    /// service expects a preformatted time string.
    pub max_age: Option<String>,
}

impl CompletedJobsRequest {
    pub fn new(credentials: Credentials) -> Self {
        CompletedJobsRequest {
            credentials,
            max_age: None,
        }
    }
}

/// Response to a job upload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobUploadResponse {
    #[serde(alias = "Success")]
    pub success: bool,
    /// Populated with a human-readable error when `success` is false.
    #[serde(alias = "Message")]
    pub message: Option<String>,
    /// The unique, service-generated file name for the new job.
    #[serde(alias = "FileName")]
    pub file_name: Option<String>,
}

/// Response to a job download.
///
/// A successful download carries no payload here: success means the
/// file was written to the request's destination path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDownloadResponse {
    #[serde(alias = "Success")]
    pub success: bool,
    #[serde(alias = "Message")]
    pub message: Option<String>,
}

/// Response to a completed-jobs listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletedJobsResponse {
    #[serde(alias = "Success")]
    pub success: bool,
    #[serde(alias = "Message")]
    pub message: Option<String>,
    /// Jobs which are complete and may be downloaded.
    #[serde(alias = "Jobs")]
    pub jobs: Vec<CompletedJob>,
}

/// One finished job in a completed-jobs listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletedJob {
    /// The caller-chosen name supplied when the job was created.
    #[serde(alias = "CustomFileName")]
    pub custom_file_name: Option<String>,
    /// The unique, service-assigned file name for the job.
    #[serde(alias = "FileName")]
    pub file_name: Option<String>,
    /// Account number of the job's owner.
    #[serde(alias = "AccountNumber")]
    pub account_number: Option<String>,
}
