use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` when the variable is unset or invalid.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place and return `false`.
pub fn init_logging(default_level: LevelFilter) -> bool {
    let filter =
        EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init().is_ok()
}

/// Stable label for an error category, for structured log fields.
#[inline]
pub fn error_label(error: &fanella_infra::ApiError) -> &'static str {
    use fanella_infra::ApiErrorCategory;

    match error.category() {
        ApiErrorCategory::Service => "service",
        ApiErrorCategory::Caller => "caller",
        ApiErrorCategory::Local => "local",
        ApiErrorCategory::Transport => "transport",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fanella_infra::ApiError;

    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(LevelFilter::WARN);
        assert!(!init_logging(LevelFilter::DEBUG));
    }

    #[test]
    fn test_error_labels() {
        assert_eq!(error_label(&ApiError::Service { status: 500 }), "service");
        assert_eq!(error_label(&ApiError::Timeout(Duration::from_secs(1))), "transport");
    }
}
