use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count: warn by default, info at one, debug beyond.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber. Events go to stderr so stdout carries only reports.
pub fn init(verbosity: u8) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(verbosity)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
