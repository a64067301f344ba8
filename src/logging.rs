use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Lets the level from the settings file take over once it has been read.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// No-op when `RUST_LOG` chose the filter.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(EnvFilter::new(level)) {
            warn!(error = %e, level, "Failed to change log level");
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_level`.
/// Returns `None` if a subscriber was already installed.
pub fn init_logging(default_level: &str) -> Option<LogHandle> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, handle) = reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok()?;

    Some(LogHandle {
        filter: handle,
        from_env,
    })
}
