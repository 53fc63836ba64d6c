use std::io;

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Initializes the tracing subscriber, writing to stderr so the entry
/// listing on stdout stays pipeable.
pub fn set_up_logger(verbose: bool) {
    let log_level = if verbose {
        format!("{}=debug", APP_NAME)
    } else {
        format!("{}=warn", APP_NAME)
    };

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
