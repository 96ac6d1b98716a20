use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu and naga are chatty at `info`; they are capped at `warn`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "cuboid_engine=debug,wgpu_core=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
/// Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(config.env_filter.as_deref(), env.as_deref());

        env_logger::Builder::new()
            .parse_filters(filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized ({filter})");
    });
}

fn resolve_filter<'a>(configured: Option<&'a str>, env: Option<&'a str>) -> &'a str {
    configured
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_wins() {
        assert_eq!(resolve_filter(Some("debug"), Some("warn")), "debug");
    }

    #[test]
    fn env_used_without_config() {
        assert_eq!(resolve_filter(None, Some("cuboid_engine=trace")), "cuboid_engine=trace");
    }

    #[test]
    fn default_when_unset_or_blank() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, Some("  ")), DEFAULT_FILTER);
    }
}
