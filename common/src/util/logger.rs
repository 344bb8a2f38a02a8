use env_logger::{Builder, Env};

/// Installs the global logger. `RUST_LOG` overrides the default `info` level.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp_millis()
        .init();
}
