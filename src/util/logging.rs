// LogSheet - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Preset file: [logging] level = "debug"
//
// Output: stderr. Cell values and file contents are never logged above
// debug level.

use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// Priority: RUST_LOG env var > CLI --debug flag > preset level > default "info".
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = select_filter(std::env::var("RUST_LOG").ok().as_deref(), debug_flag, config_level);

    // `try_init` so a second call (tests, embedding) is a no-op rather than a panic.
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            filter = %filter,
            "Logging initialised"
        );
    }
}

/// Resolve the filter directive from the competing sources.
fn select_filter(env: Option<&str>, debug_flag: bool, config_level: Option<&str>) -> String {
    if let Some(env) = env.filter(|v| !v.trim().is_empty()) {
        env.to_string()
    } else if debug_flag {
        "debug".to_string()
    } else if let Some(level) = config_level {
        level.to_string()
    } else {
        super::constants::DEFAULT_LOG_LEVEL.to_string()
    }
}
