//! Simple CLI that reads an HTML payload from stdin and prints its
//! HTML-Metadata JSON to stdout.
//!
//! Usage: `extract_stdin [CONTENT-TYPE] < page.html`
//!
//! The optional argument is the HTTP `Content-Type` of the payload, used to
//! pick its character encoding. Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, Read};

use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webarchive_extract::{extract_bytes, Options};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second initialization only happens in tests; ignore it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn main() {
    init_logging();

    let content_type = std::env::args().nth(1);

    let mut payload = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut payload) {
        error!(%err, "failed to read from stdin");
        std::process::exit(1);
    }
    debug!(bytes = payload.len(), content_type = ?content_type, "read payload");

    let metadata = extract_bytes(&payload, content_type.as_deref(), &Options::default());

    match serde_json::to_string(&metadata) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!(%err, "failed to serialize metadata");
            std::process::exit(1);
        }
    }
}
