use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once, later calls are ignored.
///
/// Defaults to `info`, `RUST_LOG` overrides it using the
/// `env_logger` filter syntax (e.g. "learn_gl=debug").
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.format_timestamp(None);

        if let Err(error) = builder.try_init() {
            eprintln!("error: logger already set: {}", error);
        }

        log::debug!("logging initialized");
    });
}
