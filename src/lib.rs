// Library root
// -----------
// Client library for the SpeakWrite transcription API. The `sw` binary
// (`main.rs`) is a reference CLI built on top of it.
//
// Module responsibilities:
// - `api`: the client facade — the three operations (upload a job, list
//   completed jobs, download a result).
// - `types`: typed request/response shapes.
// - `encode`: wire-body builders (form-urlencoded and multipart).
// - `transport`: blocking HTTP dispatch and the two decode paths
//   (JSON, raw stream to file).
// - `config`: base URL loading from the environment or a config file.
// - `error`: the crate-wide error type.
// - `logging` / `cli`: glue for the binary.

pub mod api;
pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod logging;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
