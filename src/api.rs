// API client module: a small blocking HTTP client for the SpeakWrite
// transcription service. Each operation is one synchronous round trip:
// typed request -> ordered form fields -> POST -> decoded typed response.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::encode;
use crate::error::{Error, Result};
use crate::transport;
use crate::types::{
    CompletedJobsRequest, CompletedJobsResponse, JobDownloadRequest, JobDownloadResponse,
    JobUploadRequest, JobUploadResponse,
};

/// Mime type reported for submitted audio.
const AUDIO_CONTENT_TYPE: &str = "audio/mp3";

/// Client for the SpeakWrite API. Holds a blocking HTTP client and the
/// base URL of the service, both fixed at construction.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from a loaded configuration. The base URL is
    /// captured here and never changes afterwards.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: config.api_base_url,
        })
    }

    /// Create a client configured from the environment / config file.
    /// See [`Config::load`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::load()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Submit a new job to SpeakWrite for transcription.
    ///
    /// The audio file is attached as the single file part of a multipart
    /// POST; it must exist and be readable, which is checked before any
    /// network I/O.
    pub fn upload_job(&self, request: &JobUploadRequest) -> Result<JobUploadResponse> {
        let url = self.endpoint("submitjob.ashx");
        debug!("upload request to {}", url);

        let fields = vec![
            (
                "applicationid",
                request.credentials.application_id.to_string(),
            ),
            (
                "customFilename",
                request.custom_file_name.clone().unwrap_or_default(),
            ),
            ("accountnumber", request.credentials.account_number.clone()),
            ("pin", request.credentials.pin.clone()),
            (
                "isGroupConversation",
                // the service parses .NET-style booleans
                if request.is_group_conversation {
                    "True".to_string()
                } else {
                    "False".to_string()
                },
            ),
        ];

        let body =
            encode::multipart_body(&fields, "audiofile", &request.audio_file, AUDIO_CONTENT_TYPE)?;
        let content_type = body.content_type();
        let response = transport::post(&self.client, &url, &content_type, body.bytes)?;
        transport::decode_json(response)
    }

    /// Download a completed job, writing the result to the request's
    /// destination path.
    ///
    /// On HTTP success the body is the raw file content and is streamed
    /// to disk; on any other status the body is the service's JSON error
    /// and is decoded into the returned response.
    pub fn download(&self, request: &JobDownloadRequest) -> Result<JobDownloadResponse> {
        let mut fields = vec![
            (
                "applicationid",
                request.credentials.application_id.to_string(),
            ),
            ("accountnumber", request.credentials.account_number.clone()),
            ("pin", request.credentials.pin.clone()),
            ("filetype", request.kind.wire_value().to_string()),
        ];

        let file_name = request.file_name.as_deref().filter(|n| !n.is_empty());
        let custom_name = request.custom_file_name.as_deref().filter(|n| !n.is_empty());
        match (file_name, custom_name) {
            (Some(name), None) => fields.push(("filename", name.to_string())),
            (None, Some(name)) => fields.push(("customfilename", name.to_string())),
            (None, None) => {
                return Err(Error::InvalidRequest(
                    "must provide either the file name or the custom file name of the file to download"
                        .to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(Error::InvalidRequest(
                    "provide either the file name or the custom file name, not both".to_string(),
                ))
            }
        }

        let url = self.endpoint("download.ashx");
        debug!("download request to {}", url);
        let body = encode::urlencoded_body(&fields);
        let response = transport::post(
            &self.client,
            &url,
            encode::FORM_URLENCODED,
            body.into_bytes(),
        )?;

        if !response.status().is_success() {
            return transport::decode_json(response);
        }

        transport::stream_to_file(response, &request.destination)?;
        Ok(JobDownloadResponse {
            success: true,
            message: None,
        })
    }

    /// List jobs which have finished transcription and can be downloaded
    /// via [`ApiClient::download`].
    pub fn get_completed_jobs(
        &self,
        request: &CompletedJobsRequest,
    ) -> Result<CompletedJobsResponse> {
        let mut fields = vec![
            (
                "applicationid",
                request.credentials.application_id.to_string(),
            ),
            ("accountnumber", request.credentials.account_number.clone()),
            ("pin", request.credentials.pin.clone()),
        ];
        if let Some(max_age) = &request.max_age {
            fields.push(("maxage", max_age.clone()));
        }

        let url = self.endpoint("completedjobs.ashx");
        debug!("requesting completed jobs: {}", url);
        let body = encode::urlencoded_body(&fields);
        let response = transport::post(
            &self.client,
            &url,
            encode::FORM_URLENCODED,
            body.into_bytes(),
        )?;
        transport::decode_json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Credentials, DownloadKind};
    use mockito::Matcher;

    fn client_for(url: String) -> ApiClient {
        ApiClient::new(Config { api_base_url: url }).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials::new("1001", "1234")
    }

    #[test]
    fn upload_job_posts_multipart_and_decodes_response() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/submitjob.ashx")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=.+".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(
                    "name=\"applicationid\"\r\n\r\n4ab34c28-5306-4e47-ba35-827e81e478f8".into(),
                ),
                Matcher::Regex("name=\"accountnumber\"\r\n\r\n1001".into()),
                Matcher::Regex("name=\"pin\"\r\n\r\n1234".into()),
                Matcher::Regex("name=\"isGroupConversation\"\r\n\r\nFalse".into()),
                Matcher::Regex("name=\"audiofile\"; filename=\"note.mp3\"".into()),
                Matcher::Regex("Content-Type: audio/mp3".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"fileName":"SW-20120101-01"}"#)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("note.mp3");
        std::fs::write(&audio, b"mp3 bytes").unwrap();

        let request = JobUploadRequest::new(credentials(), &audio);
        let response = client_for(server.url()).upload_job(&request).unwrap();

        mock.assert();
        assert!(response.success);
        assert_eq!(response.file_name.as_deref(), Some("SW-20120101-01"));
    }

    #[test]
    fn upload_job_missing_audio_file_fails_before_network() {
        // unroutable base URL: the error must happen before any dispatch
        let client = client_for("http://127.0.0.1:1".to_string());
        let request = JobUploadRequest::new(credentials(), "/nonexistent/audio.mp3");
        let err = client.upload_job(&request).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn completed_jobs_sends_exact_form_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/completedjobs.ashx")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::Exact(
                "applicationid=4ab34c28-5306-4e47-ba35-827e81e478f8&accountnumber=1001&pin=1234"
                    .into(),
            ))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"jobs":[{"customFileName":"mine-01","fileName":"SW-1","accountNumber":"1001"}]}"#,
            )
            .create();

        let request = CompletedJobsRequest::new(credentials());
        let response = client_for(server.url())
            .get_completed_jobs(&request)
            .unwrap();

        mock.assert();
        assert!(response.success);
        assert_eq!(response.jobs.len(), 1);
        assert_eq!(response.jobs[0].file_name.as_deref(), Some("SW-1"));
    }

    #[test]
    fn completed_jobs_forwards_max_age() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/completedjobs.ashx")
            .match_body(Matcher::Regex("&maxage=5%3A00%3A00\\+PM$".into()))
            .with_body(r#"{"success":true,"jobs":[]}"#)
            .create();

        let mut request = CompletedJobsRequest::new(credentials());
        request.max_age = Some("5:00:00 PM".to_string());
        client_for(server.url())
            .get_completed_jobs(&request)
            .unwrap();
        mock.assert();
    }

    #[test]
    fn service_error_status_is_absorbed_into_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/completedjobs.ashx")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":false,"message":"invalid pin"}"#)
            .create();

        let request = CompletedJobsRequest::new(credentials());
        let response = client_for(server.url())
            .get_completed_jobs(&request)
            .unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("invalid pin"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/completedjobs.ashx")
            .with_body("<html>service fell over</html>")
            .create();

        let request = CompletedJobsRequest::new(credentials());
        let err = client_for(server.url())
            .get_completed_jobs(&request)
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn download_requires_exactly_one_name() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_for("http://127.0.0.1:1".to_string());

        let mut request = JobDownloadRequest::new(credentials(), dir.path().join("out.doc"));
        // neither name set
        let err = client.download(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        // empty strings count as unset
        request.file_name = Some(String::new());
        request.custom_file_name = Some(String::new());
        let err = client.download(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));

        // both set is rejected rather than silently preferring one
        request.file_name = Some("SW-1".to_string());
        request.custom_file_name = Some("mine-01".to_string());
        let err = client.download(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn download_streams_body_to_destination() {
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/download.ashx")
            .match_body(Matcher::Exact(
                "applicationid=4ab34c28-5306-4e47-ba35-827e81e478f8&accountnumber=1001&pin=1234&filetype=document&filename=SW-1"
                    .into(),
            ))
            .with_header("content-type", "application/msword")
            .with_body(content.clone())
            .create();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("SW-1.doc");
        let mut request = JobDownloadRequest::new(credentials(), &dest);
        request.file_name = Some("SW-1".to_string());

        let response = client_for(server.url()).download(&request).unwrap();

        mock.assert();
        assert!(response.success);
        assert_eq!(std::fs::read(&dest).unwrap(), content);
    }

    #[test]
    fn download_by_custom_name_requests_source_audio() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/download.ashx")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("filetype=audio-source".into()),
                Matcher::Regex("customfilename=mine-01".into()),
            ]))
            .with_body(b"audio".to_vec())
            .create();

        let dir = tempfile::tempdir().unwrap();
        let mut request = JobDownloadRequest::new(credentials(), dir.path().join("mine-01.mp3"));
        request.custom_file_name = Some("mine-01".to_string());
        request.kind = DownloadKind::SourceAudio;

        let response = client_for(server.url()).download(&request).unwrap();
        mock.assert();
        assert!(response.success);
    }

    #[test]
    fn download_error_status_decodes_service_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/download.ashx")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":false,"message":"no such job"}"#)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.doc");
        let mut request = JobDownloadRequest::new(credentials(), &dest);
        request.file_name = Some("SW-404".to_string());

        let response = client_for(server.url()).download(&request).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("no such job"));
        // nothing was written on the error path
        assert!(!dest.exists());
    }
}
