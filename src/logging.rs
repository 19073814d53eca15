use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "VOCABVAULT_LOG";

/// Initialize file logging when `VOCABVAULT_LOG` names a path.
///
/// Nothing is ever written to stdout or stderr while the TUI owns the
/// terminal, so without the variable tracing stays uninitialized.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|p| !p.trim().is_empty()) else {
        return;
    };

    // One file per process so concurrent instances do not interleave.
    let pid = std::process::id();
    let unique_path = format!("{}.{}", log_path, pid);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
