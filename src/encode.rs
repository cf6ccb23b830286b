// Wire-body builders for the two encodings the service accepts.
//
// The service expects percent-encoded values inside multipart text parts
// and a fixed part layout, which reqwest's multipart builder does not
// produce, so both bodies are assembled by hand and handed to the
// transport as raw bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use url::form_urlencoded;
use uuid::Uuid;

use crate::error::Result;

/// Content type sent with form-urlencoded bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Fixed replacement written to logs in place of the PIN value.
const PIN_MASK: &str = "XXXX";

/// An ordered list of form fields. Order is preserved into the body, so
/// encoding a given request is deterministic.
pub type FormFields = Vec<(&'static str, String)>;

/// Build an `application/x-www-form-urlencoded` body from ordered fields.
/// Keys and values are percent-encoded; pairs are joined with `&` in
/// insertion order.
pub fn urlencoded_body(fields: &[(&'static str, String)]) -> String {
    log_form_fields(fields);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// A fully assembled `multipart/form-data` body plus the boundary token
/// that separates its parts.
#[derive(Debug)]
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    /// Content type header value carrying the boundary token.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Build a `multipart/form-data` body: every text field percent-encoded,
/// then a single file part holding the file's raw bytes, then the closing
/// boundary marker. The file is read in fixed-size chunks.
pub fn multipart_body(
    fields: &[(&'static str, String)],
    file_field: &str,
    file_path: &Path,
    file_content_type: &str,
) -> Result<MultipartBody> {
    let boundary = format!("---------------------------{}", Uuid::new_v4().simple());
    let delimiter = format!("\r\n--{}\r\n", boundary);

    log_form_fields(fields);
    let mut bytes = Vec::new();
    for (key, value) in fields {
        bytes.extend_from_slice(delimiter.as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                percent_encode(key),
                percent_encode(value)
            )
            .as_bytes(),
        );
    }

    bytes.extend_from_slice(delimiter.as_bytes());
    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio");
    bytes.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file_field, file_name, file_content_type
        )
        .as_bytes(),
    );

    let mut file = File::open(file_path)?;
    debug!(
        file = %file_path.display(),
        field = file_field,
        "attaching file"
    );
    let mut buffer = [0u8; 4096];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&buffer[..read]);
    }

    bytes.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    Ok(MultipartBody { boundary, bytes })
}

fn percent_encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes()).collect()
}

/// Value of a field as it may appear in log output. The PIN is never
/// logged in cleartext.
fn loggable_value<'a>(key: &str, value: &'a str) -> &'a str {
    if key.eq_ignore_ascii_case("pin") {
        PIN_MASK
    } else {
        value
    }
}

fn log_form_fields(fields: &[(&'static str, String)]) {
    for (key, value) in fields {
        debug!("form parameter: {} => {}", key, loggable_value(key, value));
    }
}
