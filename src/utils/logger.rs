use std::io::{self, Stderr};
use tracing_subscriber::{
    fmt::{
        self,
        format::{DefaultFields, Format},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type StderrLayer = fmt::Layer<Registry, DefaultFields, Format, fn() -> Stderr>;

pub fn init_cli_logger(verbose: bool) {
    init(verbose, stderr_layer().compact().boxed());
}

/// One JSON object per line, for log shippers.
pub fn init_json_logger(verbose: bool) {
    init(verbose, stderr_layer().json().boxed());
}

fn init(verbose: bool, layer: Box<dyn Layer<Registry> + Send + Sync>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry().with(layer).with(filter).init();
}

// stdout carries command output
fn stderr_layer() -> StderrLayer {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(io::stderr as fn() -> Stderr)
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "keelung_sights=debug,info"
    } else {
        "keelung_sights=info"
    }
}
