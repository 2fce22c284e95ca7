use tracing::Level;

/// Initialize the global tracing subscriber.
///
/// `level` is parsed leniently ("info", "DEBUG", ...); anything that does
/// not name a level falls back to INFO. Uses `try_init` so tests and
/// libraries can call this multiple times without panicking.
pub fn init(level: &str) {
    let lvl = level.parse().unwrap_or(Level::INFO);

    let _ = tracing_subscriber::fmt()
        .with_max_level(lvl)
        .with_target(false)
        .try_init();
}
