use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "walkthru_hlr=debug"). When unset, `RUST_LOG` is used, then `info`.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Debug output when `verbose` is set.
    pub fn from_verbosity(verbose: bool) -> Self {
        Self {
            filter: verbose.then(|| "debug".to_string()),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.format_timestamp(None);
        builder.init();

        log::debug!("logging initialized");
    });
}
