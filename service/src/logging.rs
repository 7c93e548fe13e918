use crate::config::Config;
use log::LevelFilter;
use simplelog::{self, ConfigBuilder};

/// Dependencies whose log output is suppressed unless the level is Trace.
/// The HTTP client stack is chatty on every call to the sentiment and
/// generation services.
const FILTERED_MODULES: &[&str] = &[
    "sqlx",
    "sea_orm",
    "tower",
    "tracing",
    "hyper",
    "hyper_util",
    "axum",
    "reqwest",
    "reqwest_retry",
    "rustls",
    "h2",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the level held in `config`.
    pub fn init_logger(config: &Config) {
        let apply_filters = Self::should_filter_dependencies(config.log_level_filter);

        simplelog::TermLogger::init(
            Self::convert_level_filter(config.log_level_filter),
            Self::build_log_config(apply_filters),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
        .expect("Failed to start simplelog");
    }

    fn convert_level_filter(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_client_modules_are_filtered() {
        for module in ["reqwest", "reqwest_retry", "hyper", "h2"] {
            assert!(
                FILTERED_MODULES.contains(&module),
                "{module} should be filtered"
            );
        }
    }

    #[test]
    fn database_and_server_modules_are_filtered() {
        for module in ["sqlx", "sea_orm", "axum", "tower"] {
            assert!(
                FILTERED_MODULES.contains(&module),
                "{module} should be filtered"
            );
        }
    }

    #[test]
    fn only_trace_level_shows_dependency_logs() {
        assert!(!Logger::should_filter_dependencies(LevelFilter::Trace));
        for level in [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
        ] {
            assert!(Logger::should_filter_dependencies(level));
        }
    }

    #[test]
    fn log_config_builds_with_and_without_filters() {
        let _filtered = Logger::build_log_config(true);
        let _unfiltered = Logger::build_log_config(false);
    }

    #[test]
    fn level_filters_convert_one_to_one() {
        let pairs = [
            (LevelFilter::Off, simplelog::LevelFilter::Off),
            (LevelFilter::Error, simplelog::LevelFilter::Error),
            (LevelFilter::Warn, simplelog::LevelFilter::Warn),
            (LevelFilter::Info, simplelog::LevelFilter::Info),
            (LevelFilter::Debug, simplelog::LevelFilter::Debug),
            (LevelFilter::Trace, simplelog::LevelFilter::Trace),
        ];
        for (level, expected) in pairs {
            assert_eq!(Logger::convert_level_filter(level) as u8, expected as u8);
        }
    }
}
