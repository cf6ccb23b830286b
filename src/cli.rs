// CLI layer: subcommand definitions and the handlers that turn parsed
// arguments into API calls and print the results.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::ApiClient;
use crate::types::{
    CompletedJobsRequest, Credentials, DownloadKind, JobDownloadRequest, JobUploadRequest,
};

#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(about = "Submit, list and download SpeakWrite transcription jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit an audio file for transcription.
    Upload {
        /// Your SpeakWrite account number.
        account_number: String,

        /// Path to the audio file to submit.
        audio_file: PathBuf,

        /// Custom name the service will keep alongside its own generated
        /// file name, for correlating jobs with your own tracking.
        custom_file_name: Option<String>,

        /// Account PIN. Prompted for with hidden input when omitted.
        #[arg(short, long)]
        pin: Option<String>,

        /// Mark the recording as a conversation between multiple speakers.
        #[arg(long)]
        group: bool,
    },

    /// List completed jobs available for download.
    Completed {
        /// Your SpeakWrite account number.
        account_number: String,

        /// Account PIN. Prompted for with hidden input when omitted.
        #[arg(short, long)]
        pin: Option<String>,

        /// Only list jobs newer than this service-formatted time value.
        #[arg(long)]
        max_age: Option<String>,
    },

    /// Download a completed job.
    Download {
        /// Your SpeakWrite account number.
        account_number: String,

        /// The service-assigned file name of the job.
        file_name: String,

        /// Account PIN. Prompted for with hidden input when omitted.
        #[arg(short, long)]
        pin: Option<String>,

        /// Destination path. Defaults to the job's file name plus an
        /// extension, in the current directory.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Download the submitted source audio instead of the typed
        /// document.
        #[arg(long)]
        audio: bool,
    },
}

/// Dispatch a parsed command against the API client.
pub fn run(cli: Cli, api: ApiClient) -> Result<()> {
    match cli.command {
        Command::Upload {
            account_number,
            audio_file,
            custom_file_name,
            pin,
            group,
        } => handle_upload(&api, account_number, pin, audio_file, custom_file_name, group),
        Command::Completed {
            account_number,
            pin,
            max_age,
        } => handle_completed(&api, account_number, pin, max_age),
        Command::Download {
            account_number,
            file_name,
            pin,
            out,
            audio,
        } => handle_download(&api, account_number, pin, file_name, out, audio),
    }
}

/// Use the PIN from the command line if given, otherwise prompt for it
/// with hidden input.
fn resolve_pin(pin: Option<String>) -> Result<String> {
    match pin {
        Some(pin) => Ok(pin),
        None => Ok(Password::new().with_prompt("PIN").interact()?),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);
    spinner
}

fn handle_upload(
    api: &ApiClient,
    account_number: String,
    pin: Option<String>,
    audio_file: PathBuf,
    custom_file_name: Option<String>,
    group: bool,
) -> Result<()> {
    if !audio_file.exists() {
        anyhow::bail!("audio file not found: {}", audio_file.display());
    }
    let pin = resolve_pin(pin)?;

    let mut request = JobUploadRequest::new(Credentials::new(account_number, pin), audio_file);
    request.custom_file_name = custom_file_name;
    request.is_group_conversation = group;

    let spinner = spinner("Uploading...");
    let result = api.upload_job(&request);
    spinner.finish_and_clear();

    match result {
        Ok(response) if response.success => {
            println!(
                "Successfully created job with filename {}",
                response.file_name.unwrap_or_default()
            );
        }
        Ok(response) => println!(
            "Upload failed: {}",
            response.message.unwrap_or_else(|| "unknown error".into())
        ),
        Err(e) => println!("Upload failed: {}", e),
    }
    Ok(())
}

fn handle_completed(
    api: &ApiClient,
    account_number: String,
    pin: Option<String>,
    max_age: Option<String>,
) -> Result<()> {
    let pin = resolve_pin(pin)?;

    let mut request = CompletedJobsRequest::new(Credentials::new(account_number, pin));
    request.max_age = max_age;

    let spinner = spinner("Fetching completed jobs...");
    let result = api.get_completed_jobs(&request);
    spinner.finish_and_clear();

    match result {
        Ok(response) if response.success => {
            println!("Successfully retrieved {} completed jobs", response.jobs.len());
            for job in &response.jobs {
                println!(
                    "{}  custom: {}  account: {}",
                    job.file_name.as_deref().unwrap_or("-"),
                    job.custom_file_name.as_deref().unwrap_or("-"),
                    job.account_number.as_deref().unwrap_or("-"),
                );
            }
        }
        Ok(response) => println!(
            "Listing failed: {}",
            response.message.unwrap_or_else(|| "unknown error".into())
        ),
        Err(e) => println!("Listing failed: {}", e),
    }
    Ok(())
}

fn handle_download(
    api: &ApiClient,
    account_number: String,
    pin: Option<String>,
    file_name: String,
    out: Option<PathBuf>,
    audio: bool,
) -> Result<()> {
    let pin = resolve_pin(pin)?;

    let kind = if audio {
        DownloadKind::SourceAudio
    } else {
        DownloadKind::Document
    };
    let destination = out.unwrap_or_else(|| {
        let extension = match kind {
            DownloadKind::Document => "doc",
            DownloadKind::SourceAudio => "mp3",
        };
        PathBuf::from(format!("{}.{}", file_name, extension))
    });

    let mut request = JobDownloadRequest::new(Credentials::new(account_number, pin), &destination);
    request.file_name = Some(file_name);
    request.kind = kind;

    let spinner = spinner("Downloading...");
    let result = api.download(&request);
    spinner.finish_and_clear();

    match result {
        Ok(response) if response.success => println!("Saved to {}", destination.display()),
        Ok(response) => println!(
            "Download failed: {}",
            response.message.unwrap_or_else(|| "unknown error".into())
        ),
        Err(e) => println!("Download failed: {}", e),
    }
    Ok(())
}
