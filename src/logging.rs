use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize logging for the binary.
///
/// Defaults to `warn` unless overridden by `SPEAKWRITE_LOG`. Form
/// parameters (with the PIN masked) and response bodies show up at
/// `debug`.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var("SPEAKWRITE_LOG")
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
