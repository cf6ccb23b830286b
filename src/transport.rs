// HTTP dispatch and the two response decode paths.
//
// Dispatch returns the response whether or not the status is an error:
// the service encodes business failures as JSON bodies on non-200
// statuses, so only connectivity failures are errors at this layer. The
// caller picks the decode path.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

/// Chunk size for streaming a download body to disk.
const CHUNK_SIZE: usize = 4096;

/// POST a prepared body. Network-level failures (DNS, refused, timeout)
/// surface as `Error::Transport`; HTTP error statuses do not — the
/// response comes back with its status for the caller to inspect.
pub fn post(client: &Client, url: &str, content_type: &str, body: Vec<u8>) -> Result<Response> {
    debug!(url, "sending request");
    let response = client
        .post(url)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .send()?;
    debug!(status = %response.status(), "received response");
    Ok(response)
}

/// Read the full body as text and decode it into `T`. Malformed JSON is
/// a hard `Error::Decode` carrying the offending body.
pub fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    debug!("received response content: {}", body);
    serde_json::from_str(&body).map_err(|source| Error::Decode { source, body })
}

/// Stream the response body into a newly created file at `destination`,
/// in fixed-size chunks, overwriting any existing file. Both the file
/// and the network stream are released on every exit path.
pub fn stream_to_file(mut response: Response, destination: &Path) -> Result<u64> {
    copy_chunked(&mut response, destination)
}

fn copy_chunked<R: Read>(reader: &mut R, destination: &Path) -> Result<u64> {
    let mut file = File::create(destination)?;
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])?;
        written += read as u64;
    }
    debug!(bytes = written, file = %destination.display(), "wrote download");
    Ok(written)
}
