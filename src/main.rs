// Entrypoint for the `sw` reference CLI.
// Keeps `main` small: init logging, load config, create an API client
// and hand the parsed command to the CLI layer.

use clap::Parser;

use speakwrite::cli::{self, Cli};
use speakwrite::{ApiClient, Config};

fn main() -> anyhow::Result<()> {
    speakwrite::logging::init();

    let args = Cli::parse();

    // Base URL comes from SPEAKWRITE_API_URL or ~/.speakwrite.json; see
    // `config::Config::load`.
    let config = Config::load()?;
    let api = ApiClient::new(config)?;

    cli::run(args, api)
}
